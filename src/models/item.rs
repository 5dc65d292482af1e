use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::item::{Item as DomainItem, NewItem as DomainNewItem};
use crate::domain::types::{ItemCode, ItemId, ItemName, RichContent, TypeConstraintError};
use crate::models::{decode_list, encode_list};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::item::Item`].
pub struct Item {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub price: Option<f64>,
    pub sell_price: Option<f64>,
    pub out_of_stock: bool,
    pub status: String,
    pub thumbnail_photo: Option<String>,
    pub product_photo: String,
    pub item_color: String,
    pub item_size: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::items)]
/// Insertable form of [`Item`].
pub struct NewItem<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub content: Option<&'a str>,
    pub price: Option<f64>,
    pub sell_price: Option<f64>,
    pub out_of_stock: bool,
    pub status: &'static str,
    pub thumbnail_photo: Option<&'a str>,
    pub product_photo: String,
    pub item_color: String,
    pub item_size: Option<&'a str>,
}

impl TryFrom<Item> for DomainItem {
    type Error = TypeConstraintError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::new(item.id)?,
            code: ItemCode::new(item.code)?,
            name: ItemName::new(item.name)?,
            description: item.description,
            content: item.content.map(RichContent::from_stored),
            price: item.price,
            sell_price: item.sell_price,
            out_of_stock: item.out_of_stock,
            status: item.status.parse()?,
            thumbnail_photo: item.thumbnail_photo,
            product_photo: decode_list("product_photo", &item.product_photo),
            item_color: decode_list("item_color", &item.item_color),
            item_size: item.item_size,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewItem> for NewItem<'a> {
    fn from(item: &'a DomainNewItem) -> Self {
        Self {
            code: item.code.as_str(),
            name: item.name.as_str(),
            description: item.description.as_deref(),
            content: item.content.as_ref().map(RichContent::as_str),
            price: item.price,
            sell_price: item.sell_price,
            out_of_stock: item.out_of_stock,
            status: item.status.as_str(),
            thumbnail_photo: item.thumbnail_photo.as_deref(),
            product_photo: encode_list(&item.product_photo),
            item_color: encode_list(&item.item_color),
            item_size: item.item_size.as_deref(),
        }
    }
}
