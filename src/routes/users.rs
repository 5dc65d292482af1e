use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::users::CreateUserForm;
use crate::models::config::ServerConfig;
use crate::paths;
use crate::repository::{DieselRepository, UserReader};
use crate::routes::{IntentQuery, base_context, intent_redirect, redirect, render_template};
use crate::services::ServiceError;
use crate::services::fetcher::RepositoryFetcher;
use crate::services::lists::{ListScreen, load_table};
use crate::services::users as user_service;
use crate::view::params::{PaginateParams, ParamsWire};

#[get("/users")]
pub async fn show_users(
    params: web::Query<ParamsWire>,
    intent: web::Query<IntentQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = PaginateParams::from(params.into_inner());
    if let Some(response) = intent_redirect(paths::USERS, &params, &intent) {
        return response;
    }

    let translate = &server_config.translate;
    let fetcher = RepositoryFetcher::new(
        repo.get_ref().clone(),
        <DieselRepository as UserReader>::list_users,
    );
    let table = load_table(
        fetcher,
        ListScreen::users(translate),
        params,
        intent.audit,
        &server_config.image_base_url,
        translate,
    )
    .await;

    let mut context = base_context(&flash_messages, "users", translate);
    context.insert("table", &table);
    context.insert("create_url", paths::USER_CREATE);

    render_template(&tera, "list/index.html", &context)
}

#[get("/users/create")]
pub async fn new_user(
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "users", &server_config.translate);
    render_template(&tera, "users/create.html", &context)
}

#[post("/users/create")]
pub async fn create_user(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<CreateUserForm>,
) -> impl Responder {
    match user_service::create_user(repo.get_ref(), form, &server_config.upload_dir) {
        Ok(user) => {
            FlashMessage::success(format!("User {} created.", user.name)).send();
            redirect(paths::USERS)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(paths::USER_CREATE)
        }
        Err(err) => {
            log::error!("Failed to create user: {err}");
            FlashMessage::error("Failed to create user.").send();
            redirect(paths::USER_CREATE)
        }
    }
}
