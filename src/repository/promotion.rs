use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::promotion::{NewPromotion, Promotion};
use crate::models::promotion::{NewPromotion as DbNewPromotion, Promotion as DbPromotion};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ListQuery, PromotionReader, PromotionWriter, order_by};
use crate::schema::promotions;

impl PromotionReader for DieselRepository {
    fn list_promotions(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Promotion>)> {
        let mut conn = self.conn()?;
        let pattern = query.search_pattern();

        let query_builder = || {
            let mut rows = promotions::table.into_boxed::<Sqlite>();

            if let Some(pattern) = &pattern {
                rows = rows.filter(
                    promotions::title
                        .like(pattern.clone())
                        .or(promotions::url.like(pattern.clone())),
                );
            }
            if let Some(status) = query.status {
                rows = rows.filter(promotions::status.eq(status.as_str()));
            }
            if let Some((start, end)) = query.created_between {
                rows = rows
                    .filter(promotions::created_at.ge(start))
                    .filter(promotions::created_at.lt(end));
            }
            rows
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut rows = query_builder();
        rows = match &query.order {
            Some((field, direction)) => match field.as_str() {
                "id" => order_by!(rows, direction, promotions::id),
                "title" => order_by!(rows, direction, promotions::title),
                "url" => order_by!(rows, direction, promotions::url),
                "status" => order_by!(rows, direction, promotions::status),
                "created_at" => order_by!(rows, direction, promotions::created_at),
                "updated_at" => order_by!(rows, direction, promotions::updated_at),
                other => {
                    log::warn!("Ignoring sort on unsupported promotion field `{other}`");
                    rows.order(promotions::id.desc())
                }
            },
            None => rows.order(promotions::id.desc()),
        };
        if let Some(pagination) = &query.pagination {
            rows = rows
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let promotions = rows
            .select(DbPromotion::as_select())
            .load::<DbPromotion>(&mut conn)?
            .into_iter()
            .map(Promotion::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, promotions))
    }
}

impl PromotionWriter for DieselRepository {
    fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion> {
        let mut conn = self.conn()?;
        let insertable: DbNewPromotion = new_promotion.into();

        let created = diesel::insert_into(promotions::table)
            .values(&insertable)
            .returning(DbPromotion::as_returning())
            .get_result::<DbPromotion>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
