//! DTOs exposed by the JSON API endpoints.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::status::StatusType;

/// Body of `/api/v1/{items,users,promotions}`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

/// Body of `/api/v1/status`, keyed by the requested status type.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StatusResponse(BTreeMap<&'static str, Vec<String>>);

impl StatusResponse {
    pub fn new(status_type: StatusType, statuses: Vec<String>) -> Self {
        Self(BTreeMap::from([(status_type.as_str(), statuses)]))
    }
}
