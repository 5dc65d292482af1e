//! List screens: column sets and the per-request list view lifecycle.

use serde::Serialize;

use crate::domain::status::StatusType;
use crate::view::columns::{ColumnDescriptor, ColumnSet};
use crate::view::list_view::{FetchOutcome, ListFetcher, ListView};
use crate::view::params::PaginateParams;
use crate::view::render::RenderContext;
use crate::view::table::TableView;
use crate::view::translate::Translate;

/// Static description of one list screen.
pub struct ListScreen {
    pub title: String,
    pub base_path: &'static str,
    pub status_type: StatusType,
    pub columns: ColumnSet,
}

impl ListScreen {
    pub fn items(translate: &Translate) -> Self {
        Self {
            title: translate.item_list.clone(),
            base_path: crate::paths::ITEMS,
            status_type: StatusType::General,
            columns: ColumnSet::new(vec![
                ColumnDescriptor::new("id", "ID"),
                ColumnDescriptor::new("thumbnail_photo", "Photo"),
                ColumnDescriptor::new("code", "Code"),
                ColumnDescriptor::new("name", "Name"),
                ColumnDescriptor::new("description", "Description"),
                ColumnDescriptor::new("content", "Content").hidden(),
                ColumnDescriptor::new("price", "Price"),
                ColumnDescriptor::new("sell_price", "Sell Price"),
                ColumnDescriptor::new("out_of_stock", "Out Of Stock").hidden(),
                ColumnDescriptor::new("product_photo", "Gallery"),
                ColumnDescriptor::new("item_color", "Colors"),
                ColumnDescriptor::new("item_size", "Sizes"),
                ColumnDescriptor::new("status", "Status"),
            ]),
        }
    }

    pub fn users(translate: &Translate) -> Self {
        Self {
            title: translate.user_list.clone(),
            base_path: crate::paths::USERS,
            status_type: StatusType::User,
            columns: ColumnSet::new(vec![
                ColumnDescriptor::new("id", "ID"),
                ColumnDescriptor::new("profile", "Profile"),
                ColumnDescriptor::new("name", "Name"),
                ColumnDescriptor::new("email", "Email"),
                ColumnDescriptor::new("phone", "Phone"),
                ColumnDescriptor::new("status", "Status"),
            ]),
        }
    }

    pub fn promotions(translate: &Translate) -> Self {
        Self {
            title: translate.promotion_list.clone(),
            base_path: crate::paths::PROMOTIONS,
            status_type: StatusType::General,
            columns: ColumnSet::new(vec![
                ColumnDescriptor::new("id", "ID"),
                ColumnDescriptor::new("image", "Banner"),
                ColumnDescriptor::new("title", "Title"),
                ColumnDescriptor::new("url", "Url"),
                ColumnDescriptor::new("status", "Status"),
            ]),
        }
    }
}

/// Mounts a list view for `params`, renders it and tears it down.
pub async fn load_table<F>(
    fetcher: F,
    screen: ListScreen,
    params: PaginateParams,
    show_audit: bool,
    image_base_url: &str,
    translate: &Translate,
) -> TableView
where
    F: ListFetcher,
    F::Record: Serialize,
{
    let view = ListView::new(fetcher, screen.columns, screen.status_type, params);
    view.set_show_audit(show_audit);

    if view.mount().await == FetchOutcome::Failed {
        log::warn!("Rendering `{}` without fresh data", screen.base_path);
    }

    let ctx = RenderContext {
        base_path: screen.base_path,
        image_base_url,
        translate,
    };
    let table = view.table(&screen.title, &ctx);
    view.unmount();
    table
}
