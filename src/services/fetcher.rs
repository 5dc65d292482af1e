//! [`ListFetcher`] backed by a repository list query.

use actix_web::web;

use crate::domain::status::StatusType;
use crate::repository::ListQuery;
use crate::repository::errors::RepositoryResult;
use crate::services::api::status_options;
use crate::view::list_view::{FetchError, FetchResponse, ListFetcher};
use crate::view::params::PaginateParams;

/// Repository call producing one page of records and the total count.
pub type ListFn<R, T> = fn(&R, ListQuery) -> RepositoryResult<(usize, Vec<T>)>;

/// Runs a repository list query on the blocking thread pool.
pub struct RepositoryFetcher<R, T> {
    repo: R,
    list: ListFn<R, T>,
}

impl<R, T> RepositoryFetcher<R, T> {
    pub fn new(repo: R, list: ListFn<R, T>) -> Self {
        Self { repo, list }
    }
}

impl<R, T> ListFetcher for RepositoryFetcher<R, T>
where
    R: Clone + Send + 'static,
    T: Send + 'static,
{
    type Record = T;

    async fn fetch(&self, params: &PaginateParams) -> Result<FetchResponse<T>, FetchError> {
        let repo = self.repo.clone();
        let list = self.list;
        let query = ListQuery::from(params);

        let (total, records) = web::block(move || list(&repo, query))
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?
            .map_err(|err| {
                log::error!("Failed to list records: {err}");
                FetchError::Source(err.to_string())
            })?;

        Ok(FetchResponse {
            records,
            total: Some(total),
        })
    }

    async fn fetch_statuses(&self, status_type: StatusType) -> Result<Vec<String>, FetchError> {
        Ok(status_options(status_type))
    }
}
