//! Record statuses and the option sets the list filters offer.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Lifecycle status shared by items, users and promotions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Disable,
    Deleted,
    Pending,
    Block,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Disable => "DISABLE",
            Status::Deleted => "DELETED",
            Status::Pending => "PENDING",
            Status::Block => "BLOCK",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Status::Active),
            "DISABLE" => Ok(Status::Disable),
            "DELETED" => Ok(Status::Deleted),
            "PENDING" => Ok(Status::Pending),
            "BLOCK" => Ok(Status::Block),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown status `{other}`"
            ))),
        }
    }
}

/// Group of statuses requested through `/api/v1/status?type=...`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    General,
    User,
}

impl StatusType {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusType::General => "general",
            StatusType::User => "user",
        }
    }

    /// Statuses valid for records of this type, in display order.
    pub const fn statuses(self) -> &'static [Status] {
        match self {
            StatusType::General => &[Status::Active, Status::Disable, Status::Deleted],
            StatusType::User => &[
                Status::Active,
                Status::Pending,
                Status::Block,
                Status::Deleted,
            ],
        }
    }
}

impl FromStr for StatusType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "general" => Ok(StatusType::General),
            "user" => Ok(StatusType::User),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown status type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("active".parse::<Status>().unwrap(), Status::Active);
        assert!("archived".parse::<Status>().is_err());
    }

    #[test]
    fn serializes_in_upper_case() {
        assert_eq!(serde_json::to_string(&Status::Disable).unwrap(), "\"DISABLE\"");
    }

    #[test]
    fn general_statuses_are_fixed() {
        let names: Vec<_> = StatusType::General
            .statuses()
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(names, vec!["ACTIVE", "DISABLE", "DELETED"]);
    }
}
