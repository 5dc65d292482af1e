//! Repository traits and their Diesel implementation.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::item::{Item, NewItem};
use crate::domain::promotion::{NewPromotion, Promotion};
use crate::domain::status::Status;
use crate::domain::types::{ItemId, UserEmail};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::view::params::{PaginateParams, STATUS_FILTER_FIELD, SortDirection};

pub mod errors;
pub mod item;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod promotion;
pub mod user;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        let skipped = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Filters, ordering and paging shared by every list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<Status>,
    /// Inclusive lower and exclusive upper bound on `created_at`.
    pub created_between: Option<(NaiveDateTime, NaiveDateTime)>,
    pub order: Option<(String, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = Some(term).filter(|t| !t.is_empty());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some((field.into(), direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Pattern for `LIKE` comparisons on the search term.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|term| format!("%{term}%"))
    }
}

impl From<&PaginateParams> for ListQuery {
    fn from(params: &PaginateParams) -> Self {
        let mut query = ListQuery::new()
            .search(params.search())
            .paginate(params.page(), params.per_page());

        if let Some(filter) = params.filter() {
            if filter.field() == STATUS_FILTER_FIELD {
                match filter.value().parse() {
                    Ok(status) => query = query.status(status),
                    Err(err) => log::warn!("Ignoring status filter: {err}"),
                }
            } else {
                log::warn!("Ignoring filter on unsupported field `{}`", filter.field());
            }
        }

        if let Some(range) = params.dates() {
            let start = range.start.and_time(NaiveTime::MIN);
            let end = range.end.and_time(NaiveTime::MIN) + TimeDelta::days(1);
            query.created_between = Some((start, end));
        }

        if let Some(field) = params.order() {
            query = query.order_by(field, params.sort());
        }

        query
    }
}

pub trait ItemReader {
    fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<Item>>;
    fn list_items(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Item>)>;
}

pub trait ItemWriter {
    fn create_items(&self, new_items: &[NewItem]) -> RepositoryResult<usize>;
}

pub trait UserReader {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

pub trait PromotionReader {
    fn list_promotions(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Promotion>)>;
}

pub trait PromotionWriter {
    fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Applies a sort direction to a boxed query for one column.
macro_rules! order_by {
    ($query:expr, $direction:expr, $column:expr) => {
        match $direction {
            $crate::view::params::SortDirection::Asc => $query.order($column.asc()),
            $crate::view::params::SortDirection::Desc => $query.order($column.desc()),
            $crate::view::params::SortDirection::None => $query,
        }
    };
}
pub(crate) use order_by;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::view::params::{Intent, ParamsWire};

    #[test]
    fn list_query_follows_paginate_params() {
        let params = PaginateParams::default()
            .apply(Intent::Paginate {
                page_index: 2,
                rows: 50,
            })
            .apply(Intent::Search("  shirt ".into()))
            .apply(Intent::FilterByStatus("DISABLE".into()))
            .apply(Intent::FilterByDate {
                start: NaiveDate::from_ymd_opt(2024, 1, 1),
                end: NaiveDate::from_ymd_opt(2024, 1, 31),
            });

        let query = ListQuery::from(&params);

        assert_eq!(query.search.as_deref(), Some("shirt"));
        assert_eq!(query.search_pattern().as_deref(), Some("%shirt%"));
        assert_eq!(query.status, Some(Status::Disable));
        assert_eq!(
            query.order,
            Some(("id".to_string(), SortDirection::Desc))
        );
        let pagination = query.pagination.unwrap();
        assert_eq!((pagination.offset(), pagination.limit()), (100, 50));

        let (start, end) = query.created_between.unwrap();
        assert_eq!(start.to_string(), "2024-01-01 00:00:00");
        assert_eq!(end.to_string(), "2024-02-01 00:00:00");
    }

    #[test]
    fn unknown_status_filter_is_ignored() {
        let params = PaginateParams::default().apply(Intent::FilterByStatus("GONE".into()));
        assert_eq!(ListQuery::from(&params).status, None);
    }

    #[test]
    fn offset_of_far_pages_does_not_overflow() {
        let params = PaginateParams::from(ParamsWire {
            page: Some(1_000_000_000_000_000_000),
            per_page: Some(1000),
            ..ParamsWire::default()
        });
        let pagination = ListQuery::from(&params).pagination.unwrap();
        assert!(pagination.offset() > 0);
        assert_eq!(pagination.limit(), 1000);

        let raw = Pagination {
            page: usize::MAX,
            per_page: 1000,
        };
        assert_eq!(raw.offset(), i64::MAX);
    }
}
