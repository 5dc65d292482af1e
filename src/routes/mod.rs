//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::view::list_view::table_href;
use crate::view::params::{Intent, PaginateParams, parse_date};
use crate::view::translate::Translate;

pub mod api;
pub mod items;
pub mod main;
pub mod promotions;
pub mod users;

/// Maps a flash message level to the alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context entries every page needs: alerts, the active menu entry and the
/// interface labels.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    translate: &Translate,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("translate", translate);
    context
}

/// Intent submitted by a list screen control, next to the current
/// paginate parameters.
#[derive(Debug, Default, Deserialize)]
pub struct IntentQuery {
    pub intent: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub page_index: Option<usize>,
    pub rows: Option<usize>,
    pub sort_field: Option<String>,
    pub sort_order: Option<i8>,
    #[serde(default)]
    pub audit: bool,
}

impl IntentQuery {
    /// The submitted intent, or `None` for a plain page load.
    pub fn intent(&self) -> Option<Intent> {
        let intent = match self.intent.as_deref()? {
            "search" => Intent::Search(self.q.clone().unwrap_or_default().trim().to_string()),
            "status" => Intent::FilterByStatus(self.status.clone()?),
            "date" => Intent::FilterByDate {
                start: self.start.as_deref().and_then(parse_date),
                end: self.end.as_deref().and_then(parse_date),
            },
            "page" => Intent::Paginate {
                page_index: self.page_index?,
                rows: self.rows?,
            },
            "sort" => Intent::Sort {
                field: self.sort_field.clone()?,
                order_code: self.sort_order.unwrap_or(0),
            },
            "reset" => Intent::Reset,
            other => {
                log::warn!("Ignoring unknown list intent `{other}`");
                return None;
            }
        };
        Some(intent)
    }
}

/// Redirect to the canonical list URL once a submitted intent is applied.
pub fn intent_redirect(
    base_path: &str,
    params: &PaginateParams,
    query: &IntentQuery,
) -> Option<HttpResponse> {
    let intent = query.intent()?;
    Some(redirect(&table_href(
        base_path,
        &params.apply(intent),
        query.audit,
    )))
}
