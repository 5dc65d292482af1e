//! Payloads of the JSON list and status endpoints.

use crate::domain::item::Item;
use crate::domain::promotion::Promotion;
use crate::domain::status::StatusType;
use crate::domain::user::User;
use crate::dto::api::{ListResponse, StatusResponse};
use crate::repository::{ItemReader, ListQuery, PromotionReader, UserReader};
use crate::services::ServiceResult;
use crate::view::params::PaginateParams;

/// Raw status values offered for `status_type`, without the `ALL` sentinel.
pub fn status_options(status_type: StatusType) -> Vec<String> {
    status_type
        .statuses()
        .iter()
        .map(|status| status.as_str().to_string())
        .collect()
}

pub fn list_statuses(status_type: StatusType) -> StatusResponse {
    StatusResponse::new(status_type, status_options(status_type))
}

pub fn list_items<R>(repo: &R, params: &PaginateParams) -> ServiceResult<ListResponse<Item>>
where
    R: ItemReader + ?Sized,
{
    let (total, data) = repo.list_items(ListQuery::from(params)).map_err(|err| {
        log::error!("Failed to list items: {err}");
        err
    })?;
    Ok(ListResponse { data, total })
}

pub fn list_users<R>(repo: &R, params: &PaginateParams) -> ServiceResult<ListResponse<User>>
where
    R: UserReader + ?Sized,
{
    let (total, data) = repo.list_users(ListQuery::from(params)).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;
    Ok(ListResponse { data, total })
}

pub fn list_promotions<R>(
    repo: &R,
    params: &PaginateParams,
) -> ServiceResult<ListResponse<Promotion>>
where
    R: PromotionReader + ?Sized,
{
    let (total, data) = repo
        .list_promotions(ListQuery::from(params))
        .map_err(|err| {
            log::error!("Failed to list promotions: {err}");
            err
        })?;
    Ok(ListResponse { data, total })
}
