use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;

use crate::domain::status::StatusType;
use crate::repository::DieselRepository;
use crate::services::api as api_service;
use crate::view::params::{PaginateParams, ParamsWire};

#[derive(Deserialize)]
struct ApiV1StatusQueryParams {
    #[serde(rename = "type")]
    status_type: StatusType,
}

#[get("/v1/items")]
pub async fn api_v1_items(
    params: web::Query<ParamsWire>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = PaginateParams::from(params.into_inner());
    match api_service::list_items(repo.get_ref(), &params) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Failed to list items: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/users")]
pub async fn api_v1_users(
    params: web::Query<ParamsWire>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = PaginateParams::from(params.into_inner());
    match api_service::list_users(repo.get_ref(), &params) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Failed to list users: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/promotions")]
pub async fn api_v1_promotions(
    params: web::Query<ParamsWire>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = PaginateParams::from(params.into_inner());
    match api_service::list_promotions(repo.get_ref(), &params) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Failed to list promotions: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/status")]
pub async fn api_v1_status(params: web::Query<ApiV1StatusQueryParams>) -> impl Responder {
    HttpResponse::Ok().json(api_service::list_statuses(params.status_type))
}
