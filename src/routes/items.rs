use actix_multipart::form::MultipartForm;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::items::UploadItemsForm;
use crate::models::config::ServerConfig;
use crate::paths;
use crate::repository::{DieselRepository, ItemReader};
use crate::routes::{IntentQuery, base_context, intent_redirect, redirect, render_template};
use crate::services::ServiceError;
use crate::services::fetcher::RepositoryFetcher;
use crate::services::items as item_service;
use crate::services::lists::{ListScreen, load_table};
use crate::view::params::{PaginateParams, ParamsWire};

#[get("/items")]
pub async fn show_items(
    params: web::Query<ParamsWire>,
    intent: web::Query<IntentQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = PaginateParams::from(params.into_inner());
    if let Some(response) = intent_redirect(paths::ITEMS, &params, &intent) {
        return response;
    }

    let translate = &server_config.translate;
    let fetcher = RepositoryFetcher::new(
        repo.get_ref().clone(),
        <DieselRepository as ItemReader>::list_items,
    );
    let table = load_table(
        fetcher,
        ListScreen::items(translate),
        params,
        intent.audit,
        &server_config.image_base_url,
        translate,
    )
    .await;

    let mut context = base_context(&flash_messages, "items", translate);
    context.insert("table", &table);
    context.insert("export_url", paths::ITEM_EXPORT);
    context.insert("import_url", paths::ITEM_IMPORT);

    render_template(&tera, "list/index.html", &context)
}

#[get("/items/export")]
pub async fn export_items(repo: web::Data<DieselRepository>) -> impl Responder {
    match item_service::export_items(repo.get_ref()) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename("items.csv".to_string())],
            })
            .body(body),
        Err(err) => {
            log::error!("Failed to export items: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/items/import")]
pub async fn import_items(
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadItemsForm>,
) -> impl Responder {
    match item_service::import_items(repo.get_ref(), &form) {
        Ok(created) => FlashMessage::success(format!("Imported {created} items.")).send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to import items: {err}");
            FlashMessage::error("Failed to import items.").send();
        }
    }
    redirect(paths::ITEMS)
}

#[get("/items/{item_id}")]
pub async fn show_item(
    item_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let item = match item_service::show_item(repo.get_ref(), item_id.into_inner()) {
        Ok(item) => item,
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Item not found.").send();
            return redirect(paths::ITEMS);
        }
        Err(err) => {
            log::error!("Failed to load item: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let sizes: Vec<String> = item
        .item_size
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();

    let translate = &server_config.translate;
    let mut context = base_context(&flash_messages, "items", translate);
    context.insert("status_label", &translate.status_label(item.status.as_str()));
    context.insert("item", &item);
    context.insert("sizes", &sizes);
    context.insert("image_base_url", &server_config.image_base_url);

    render_template(&tera, "items/show.html", &context)
}
