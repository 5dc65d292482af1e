use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::status::Status;
use crate::domain::types::{ItemCode, ItemId, ItemName, RichContent};

/// Catalogue item as shown in the item list and detail screens.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub code: ItemCode,
    pub name: ItemName,
    pub description: Option<String>,
    pub content: Option<RichContent>,
    pub price: Option<f64>,
    pub sell_price: Option<f64>,
    pub out_of_stock: bool,
    pub status: Status,
    /// Image name of the list thumbnail.
    pub thumbnail_photo: Option<String>,
    /// Image names of the product gallery.
    pub product_photo: Vec<String>,
    /// Color codes the item is offered in.
    pub item_color: Vec<String>,
    /// Sizes, kept as the serialized JSON list the storefront writes.
    pub item_size: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated payload for inserting an item.
#[derive(Clone, Debug, PartialEq)]
pub struct NewItem {
    pub code: ItemCode,
    pub name: ItemName,
    pub description: Option<String>,
    pub content: Option<RichContent>,
    pub price: Option<f64>,
    pub sell_price: Option<f64>,
    pub out_of_stock: bool,
    pub status: Status,
    pub thumbnail_photo: Option<String>,
    pub product_photo: Vec<String>,
    pub item_color: Vec<String>,
    pub item_size: Option<String>,
}

impl NewItem {
    /// Builds an active, in-stock item with no optional data.
    #[must_use]
    pub fn new(code: ItemCode, name: ItemName) -> Self {
        Self {
            code,
            name,
            description: None,
            content: None,
            price: None,
            sell_price: None,
            out_of_stock: false,
            status: Status::Active,
            thumbnail_photo: None,
            product_photo: Vec::new(),
            item_color: Vec::new(),
            item_size: None,
        }
    }
}
