use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::promotions::CreatePromotionForm;
use crate::models::config::ServerConfig;
use crate::paths;
use crate::repository::{DieselRepository, PromotionReader};
use crate::routes::{IntentQuery, base_context, intent_redirect, redirect, render_template};
use crate::services::ServiceError;
use crate::services::fetcher::RepositoryFetcher;
use crate::services::lists::{ListScreen, load_table};
use crate::services::promotions as promotion_service;
use crate::view::params::{PaginateParams, ParamsWire};

#[get("/promotions")]
pub async fn show_promotions(
    params: web::Query<ParamsWire>,
    intent: web::Query<IntentQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = PaginateParams::from(params.into_inner());
    if let Some(response) = intent_redirect(paths::PROMOTIONS, &params, &intent) {
        return response;
    }

    let translate = &server_config.translate;
    let fetcher = RepositoryFetcher::new(
        repo.get_ref().clone(),
        <DieselRepository as PromotionReader>::list_promotions,
    );
    let table = load_table(
        fetcher,
        ListScreen::promotions(translate),
        params,
        intent.audit,
        &server_config.image_base_url,
        translate,
    )
    .await;

    let mut context = base_context(&flash_messages, "promotions", translate);
    context.insert("table", &table);
    context.insert("create_url", paths::PROMOTION_CREATE);

    render_template(&tera, "list/index.html", &context)
}

#[get("/promotions/create")]
pub async fn new_promotion(
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "promotions", &server_config.translate);
    render_template(&tera, "promotions/create.html", &context)
}

#[post("/promotions/create")]
pub async fn create_promotion(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<CreatePromotionForm>,
) -> impl Responder {
    match promotion_service::create_promotion(repo.get_ref(), form, &server_config.upload_dir) {
        Ok(promotion) => {
            FlashMessage::success(format!("Promotion {} created.", promotion.title)).send();
            redirect(paths::PROMOTIONS)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(paths::PROMOTION_CREATE)
        }
        Err(err) => {
            log::error!("Failed to create promotion: {err}");
            FlashMessage::error("Failed to create promotion.").send();
            redirect(paths::PROMOTION_CREATE)
        }
    }
}
