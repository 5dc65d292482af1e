//! Item detail, CSV import and CSV export.

use crate::domain::item::Item;
use crate::domain::types::ItemId;
use crate::forms::items::{ItemCsvRow, UploadItemsForm};
use crate::repository::{ItemReader, ItemWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult};
use crate::view::params::SortDirection;

/// Loads one item for the detail screen.
pub fn show_item<R>(repo: &R, item_id: i32) -> ServiceResult<Item>
where
    R: ItemReader + ?Sized,
{
    let item_id = ItemId::new(item_id)?;
    repo.get_item_by_id(item_id)
        .map_err(|err| {
            log::error!("Failed to load item {item_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Parses the uploaded CSV file and creates the items in bulk.
pub fn import_items<R>(repo: &R, form: &UploadItemsForm) -> ServiceResult<usize>
where
    R: ItemWriter + ?Sized,
{
    let items = form.parse().map_err(|err| {
        log::error!("Failed to parse items: {err}");
        ServiceError::Form(format!("Failed to parse items: {err}"))
    })?;

    let created = repo.create_items(&items).map_err(|err| {
        log::error!("Failed to import items: {err}");
        err
    })?;
    log::info!("Imported {created} items");

    Ok(created)
}

/// Serializes every item, oldest first, as CSV with a header line.
pub fn export_items<R>(repo: &R) -> ServiceResult<Vec<u8>>
where
    R: ItemReader + ?Sized,
{
    let (_, items) = repo
        .list_items(ListQuery::new().order_by("id", SortDirection::Asc))
        .map_err(|err| {
            log::error!("Failed to list items for export: {err}");
            err
        })?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in &items {
        writer
            .serialize(ItemCsvRow::from(item))
            .map_err(|err| ServiceError::Internal(format!("csv export failed: {err}")))?;
    }
    writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(format!("csv export failed: {err}")))
}
