use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::item::{Item, NewItem};
use crate::domain::types::ItemId;
use crate::models::item::{Item as DbItem, NewItem as DbNewItem};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ItemReader, ItemWriter, ListQuery, order_by};
use crate::schema::items;

impl ItemReader for DieselRepository {
    fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<Item>> {
        let mut conn = self.conn()?;
        let item = items::table
            .find(id.get())
            .select(DbItem::as_select())
            .first::<DbItem>(&mut conn)
            .optional()?;

        Ok(item.map(Item::try_from).transpose()?)
    }

    fn list_items(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Item>)> {
        let mut conn = self.conn()?;
        let pattern = query.search_pattern();

        let query_builder = || {
            let mut rows = items::table.into_boxed::<Sqlite>();

            if let Some(pattern) = &pattern {
                rows = rows.filter(
                    items::name
                        .like(pattern.clone())
                        .or(items::code.like(pattern.clone()))
                        .or(items::description.assume_not_null().like(pattern.clone())),
                );
            }
            if let Some(status) = query.status {
                rows = rows.filter(items::status.eq(status.as_str()));
            }
            if let Some((start, end)) = query.created_between {
                rows = rows
                    .filter(items::created_at.ge(start))
                    .filter(items::created_at.lt(end));
            }
            rows
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut rows = query_builder();
        rows = match &query.order {
            Some((field, direction)) => match field.as_str() {
                "id" => order_by!(rows, direction, items::id),
                "code" => order_by!(rows, direction, items::code),
                "name" => order_by!(rows, direction, items::name),
                "price" => order_by!(rows, direction, items::price),
                "sell_price" => order_by!(rows, direction, items::sell_price),
                "out_of_stock" => order_by!(rows, direction, items::out_of_stock),
                "status" => order_by!(rows, direction, items::status),
                "created_at" => order_by!(rows, direction, items::created_at),
                "updated_at" => order_by!(rows, direction, items::updated_at),
                other => {
                    log::warn!("Ignoring sort on unsupported item field `{other}`");
                    rows.order(items::id.desc())
                }
            },
            None => rows.order(items::id.desc()),
        };
        if let Some(pagination) = &query.pagination {
            rows = rows.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = rows
            .select(DbItem::as_select())
            .load::<DbItem>(&mut conn)?
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }
}

impl ItemWriter for DieselRepository {
    fn create_items(&self, new_items: &[NewItem]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewItem> = new_items.iter().map(Into::into).collect();

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(items::table)
                .values(&insertables)
                .execute(conn)
        })?;

        Ok(affected)
    }
}
