//! CSV import and export rows for catalogue items.

use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::{Deserialize, Serialize};

use crate::domain::item::{Item, NewItem};
use crate::domain::types::{ItemCode, ItemName, RichContent};
use crate::forms::FormError;

#[derive(MultipartForm)]
pub struct UploadItemsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

/// One line of the item CSV file. Lists are separated by `|`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ItemCsvRow {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    #[serde(default)]
    pub out_of_stock: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thumbnail_photo: Option<String>,
    #[serde(default)]
    pub product_photo: Option<String>,
    #[serde(default)]
    pub item_color: Option<String>,
    #[serde(default)]
    pub item_size: Option<String>,
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TryFrom<ItemCsvRow> for NewItem {
    type Error = FormError;

    fn try_from(row: ItemCsvRow) -> Result<Self, Self::Error> {
        let mut item = NewItem::new(ItemCode::new(row.code)?, ItemName::new(row.name)?);
        item.description = non_blank(row.description);
        item.content = non_blank(row.content).map(RichContent::new).transpose()?;
        item.price = row.price;
        item.sell_price = row.sell_price;
        item.out_of_stock = row.out_of_stock.unwrap_or(false);
        if let Some(status) = non_blank(row.status) {
            item.status = status.parse()?;
        }
        item.thumbnail_photo = non_blank(row.thumbnail_photo);
        item.product_photo = split_list(row.product_photo);
        item.item_color = split_list(row.item_color);
        let sizes = split_list(row.item_size);
        if !sizes.is_empty() {
            item.item_size = Some(
                serde_json::to_string(&sizes)
                    .map_err(|err| FormError::InvalidValue(err.to_string()))?,
            );
        }
        Ok(item)
    }
}

impl From<&Item> for ItemCsvRow {
    fn from(item: &Item) -> Self {
        let sizes: Vec<String> = item
            .item_size
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        let joined = |list: &[String]| Some(list.join("|")).filter(|s| !s.is_empty());

        Self {
            code: item.code.to_string(),
            name: item.name.to_string(),
            description: item.description.clone(),
            content: item.content.as_ref().map(|c| c.as_str().to_string()),
            price: item.price,
            sell_price: item.sell_price,
            out_of_stock: Some(item.out_of_stock),
            status: Some(item.status.to_string()),
            thumbnail_photo: item.thumbnail_photo.clone(),
            product_photo: joined(&item.product_photo),
            item_color: joined(&item.item_color),
            item_size: joined(&sizes),
        }
    }
}

/// Parses item rows from CSV text with a header line.
pub fn parse_items_csv<R: Read>(reader: R) -> Result<Vec<NewItem>, FormError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .deserialize::<ItemCsvRow>()
        .map(|row| NewItem::try_from(row?))
        .collect()
}

impl UploadItemsForm {
    pub fn parse(&self) -> Result<Vec<NewItem>, FormError> {
        let file = std::fs::File::open(self.csv.file.path())?;
        parse_items_csv(file)
    }
}
