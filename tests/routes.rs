use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use diesel::prelude::*;
use serde_json::Value;
use shop_admin::models::config::{DatabaseOptions, ServerConfig};
use shop_admin::repository::{
    DieselRepository, ItemReader, ItemWriter, ListQuery, PromotionReader, UserReader,
};
use shop_admin::routes::alert_level_to_str;
use shop_admin::routes::api::{api_v1_items, api_v1_promotions, api_v1_status, api_v1_users};
use shop_admin::routes::items::{export_items, import_items, show_item, show_items};
use shop_admin::routes::main::show_index;
use shop_admin::routes::promotions::{create_promotion, new_promotion, show_promotions};
use shop_admin::routes::users::{create_user, new_user, show_users};
use shop_admin::domain::types::UserEmail;
use shop_admin::schema::users;
use shop_admin::view::translate::Translate;
use tera::Tera;

mod common;

fn server_config(upload_dir: &str) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        templates_dir: String::new(),
        secret: String::new(),
        upload_dir: upload_dir.into(),
        image_base_url: "/uploads".into(),
        db: DatabaseOptions::default(),
        translate: Translate::default(),
    }
}

fn seeded_repo(test_db: &common::TestDb) -> DieselRepository {
    let repo = DieselRepository::new(test_db.pool());
    let mut shirt = common::new_item("SH-01", "Linen shirt");
    shirt.product_photo = vec!["a.png".into(), "b.png".into(), "c.png".into(), "d.png".into()];
    shirt.item_size = Some(r#"["S","M"]"#.into());
    repo.create_items(&[shirt, common::new_item("HT-01", "Straw hat")])
        .unwrap();
    repo
}

macro_rules! init_app {
    ($repo:expr, $config:expr) => {{
        let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
        let message_store = CookieMessageStore::builder(Key::from(&[7u8; 64])).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();
        test::init_service(
            App::new()
                .wrap(message_framework)
                .service(
                    web::scope("/api")
                        .service(api_v1_items)
                        .service(api_v1_users)
                        .service(api_v1_promotions)
                        .service(api_v1_status),
                )
                .service(show_index)
                .service(export_items)
                .service(import_items)
                .service(show_items)
                .service(show_item)
                .service(show_users)
                .service(new_user)
                .service(create_user)
                .service(show_promotions)
                .service(new_promotion)
                .service(create_promotion)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new($config)),
        )
        .await
    }};
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

const BOUNDARY: &str = "----shop-admin-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Encodes `parts` as a `multipart/form-data` body.
fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\
                         Content-Type: text/plain\r\n\r\n{value}\r\n"
                    )
                    .as_bytes(),
                );
            }
            Part::File(name, file_name, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post_multipart(uri: &str, parts: &[Part<'_>]) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart(parts))
}

fn user_parts<'a>(email: &'a str, confirm: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("name", "Jane Admin"),
        Part::Text("email", email),
        Part::Text("phone", "+14155552671"),
        Part::Text("password", "s3cret!pass"),
        Part::Text("confirm_password", confirm),
    ]
}

/// Follows a redirect carrying the flash cookie and returns the page body.
macro_rules! follow_redirect {
    ($app:expr, $resp:expr) => {{
        let cookies: Vec<Cookie<'static>> = $resp
            .response()
            .cookies()
            .map(|cookie| cookie.into_owned())
            .collect();
        let mut req = test::TestRequest::get().uri(&location(&$resp));
        for cookie in cookies {
            req = req.cookie(cookie);
        }
        let page = test::call_service(&$app, req.to_request()).await;
        assert_eq!(page.status(), StatusCode::OK);
        String::from_utf8(test::read_body(page).await.to_vec()).unwrap()
    }};
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn test_index_redirects_to_items() {
    let test_db = common::TestDb::new("test_index_redirect.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool()),
        server_config("uploads")
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/items");
}

#[actix_web::test]
async fn test_list_intent_redirects_to_canonical_url() {
    let test_db = common::TestDb::new("test_list_intent.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool()),
        server_config("uploads")
    );

    let req = test::TestRequest::get()
        .uri("/items?page=3&per_page=50&intent=search&q=+shirt+&audit=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert!(target.starts_with("/items?"));
    assert!(target.contains("per_page=50"));
    assert!(target.contains("search=shirt"));
    assert!(target.ends_with("&audit=true"));

    let req = test::TestRequest::get()
        .uri("/items?page=3&per_page=50&search=shirt&intent=reset")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/items?page=1&per_page=10&sort=DESC&order=id");
}

#[actix_web::test]
async fn test_item_list_renders_rows() {
    let test_db = common::TestDb::new("test_item_list_page.db");
    let app = init_app!(seeded_repo(&test_db), server_config("uploads"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/items").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("Linen shirt"));
    assert!(html.contains("Straw hat"));
    assert!(html.contains("+1"));
    assert!(html.contains("Total - 2 | 1 of 1"));
}

#[actix_web::test]
async fn test_item_detail_and_missing_item() {
    let test_db = common::TestDb::new("test_item_detail.db");
    let app = init_app!(seeded_repo(&test_db), server_config("uploads"));

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/items/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("SH-01"));
    assert!(html.contains("S, M"));

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/items/99").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/items");
}

#[actix_web::test]
async fn test_item_export_is_csv_attachment() {
    let test_db = common::TestDb::new("test_item_export.db");
    let app = init_app!(seeded_repo(&test_db), server_config("uploads"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/items/export").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("items.csv"));

    let csv = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("code,name,"));
    assert!(lines.next().unwrap().starts_with("SH-01,Linen shirt,"));
    assert!(lines.next().unwrap().starts_with("HT-01,Straw hat,"));
}

#[actix_web::test]
async fn test_api_items_returns_page_and_total() {
    let test_db = common::TestDb::new("test_api_items.db");
    let app = init_app!(seeded_repo(&test_db), server_config("uploads"));

    let req = test::TestRequest::get()
        .uri("/api/v1/items?page=1&per_page=10&search=shirt")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["code"], "SH-01");
    assert_eq!(body["data"][0]["product_photo"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::get()
        .uri("/api/v1/users?filter=status&value=ACTIVE")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["data"], Value::Array(vec![]));
}

#[actix_web::test]
async fn test_api_status_lists_options_by_type() {
    let test_db = common::TestDb::new("test_api_status.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool()),
        server_config("uploads")
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/status?type=user")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        serde_json::json!({"user": ["ACTIVE", "PENDING", "BLOCK", "DELETED"]})
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/status?type=other")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_user_create_form_renders() {
    let test_db = common::TestDb::new("test_user_create_form.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool()),
        server_config("uploads")
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/create").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("confirm_password"));
}

#[actix_web::test]
async fn test_user_create_persists_hashed_password() {
    let test_db = common::TestDb::new("test_user_create_post.db");
    let repo = DieselRepository::new(test_db.pool());
    let uploads = tempfile::tempdir().unwrap();
    let app = init_app!(
        repo.clone(),
        server_config(uploads.path().to_str().unwrap())
    );

    let mut parts = user_parts("Jane@Example.com", "s3cret!pass");
    parts.push(Part::File("profile", "me.png", b"png"));
    let req = post_multipart("/users/create", &parts).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");

    let html = follow_redirect!(app, resp);
    assert!(html.contains("User Jane Admin created."));
    assert!(html.contains("jane@example.com"));

    let email = UserEmail::new("jane@example.com").unwrap();
    let user = repo.get_user_by_email(&email).unwrap().unwrap();
    let profile = user.profile.unwrap();
    assert!(uploads.path().join(&profile).exists());

    let mut conn = test_db.pool().get().unwrap();
    let stored_hash: String = users::table
        .select(users::password_hash)
        .first(&mut conn)
        .unwrap();
    assert!(stored_hash.starts_with("$argon2id$"));
    assert!(!stored_hash.contains("s3cret!pass"));
}

#[actix_web::test]
async fn test_user_create_rejects_mismatched_passwords() {
    let test_db = common::TestDb::new("test_user_create_invalid.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone(), server_config("uploads"));

    let parts = user_parts("jane@example.com", "other!pass");
    let req = post_multipart("/users/create", &parts).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users/create");

    let html = follow_redirect!(app, resp);
    assert!(html.contains("validation errors"));

    let (total, _) = repo.list_users(ListQuery::new()).unwrap();
    assert_eq!(total, 0);
}

#[actix_web::test]
async fn test_promotion_create_stores_banner() {
    let test_db = common::TestDb::new("test_promotion_create_post.db");
    let repo = DieselRepository::new(test_db.pool());
    let uploads = tempfile::tempdir().unwrap();
    let app = init_app!(
        repo.clone(),
        server_config(uploads.path().to_str().unwrap())
    );

    let parts = [
        Part::Text("title", "Spring sale"),
        Part::Text("url", "https://shop.example.com/spring"),
        Part::File("image", "banner.webp", b"webp"),
    ];
    let req = post_multipart("/promotions/create", &parts).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/promotions");

    let html = follow_redirect!(app, resp);
    assert!(html.contains("Promotion Spring sale created."));

    let (total, promotions) = repo.list_promotions(ListQuery::new()).unwrap();
    assert_eq!(total, 1);
    let image = promotions[0].image.clone().unwrap();
    assert!(image.ends_with(".webp"));
    assert_eq!(std::fs::read(uploads.path().join(image)).unwrap(), b"webp");
}

#[actix_web::test]
async fn test_promotion_create_rejects_invalid_url() {
    let test_db = common::TestDb::new("test_promotion_create_invalid.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone(), server_config("uploads"));

    let parts = [
        Part::Text("title", "Spring sale"),
        Part::Text("url", "not a url"),
    ];
    let req = post_multipart("/promotions/create", &parts).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/promotions/create");

    let html = follow_redirect!(app, resp);
    assert!(html.contains("validation errors"));
    let (total, _) = repo.list_promotions(ListQuery::new()).unwrap();
    assert_eq!(total, 0);
}

#[actix_web::test]
async fn test_item_import_creates_rows() {
    let test_db = common::TestDb::new("test_item_import_post.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone(), server_config("uploads"));

    let csv = b"code,name,price,item_color\nSC-09,Silk scarf,12.5,#f00|#0f0\nHT-09,Felt hat,30,\n";
    let resp = test::call_service(
        &app,
        post_multipart("/items/import", &[Part::File("csv", "items.csv", csv)]).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/items");

    let html = follow_redirect!(app, resp);
    assert!(html.contains("Imported 2 items."));
    assert!(html.contains("Silk scarf"));

    let (total, items) = repo.list_items(ListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[1].item_color, vec!["#f00", "#0f0"]);
}

#[actix_web::test]
async fn test_item_import_rejects_rows_without_name() {
    let test_db = common::TestDb::new("test_item_import_invalid.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone(), server_config("uploads"));

    let csv = b"code,name\nSC-09,Silk scarf\nHT-09,\n";
    let resp = test::call_service(
        &app,
        post_multipart("/items/import", &[Part::File("csv", "items.csv", csv)]).to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/items");

    let html = follow_redirect!(app, resp);
    assert!(html.contains("invalid name"));
    let (total, _) = repo.list_items(ListQuery::new()).unwrap();
    assert_eq!(total, 0);
}
