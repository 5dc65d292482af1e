use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::types::UserEmail;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ListQuery, UserReader, UserWriter, order_by};
use crate::schema::users;

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(User::try_from).transpose()?)
    }

    fn list_users(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        let mut conn = self.conn()?;
        let pattern = query.search_pattern();

        let query_builder = || {
            let mut rows = users::table.into_boxed::<Sqlite>();

            if let Some(pattern) = &pattern {
                rows = rows.filter(
                    users::name
                        .like(pattern.clone())
                        .or(users::email.like(pattern.clone()))
                        .or(users::phone.like(pattern.clone())),
                );
            }
            if let Some(status) = query.status {
                rows = rows.filter(users::status.eq(status.as_str()));
            }
            if let Some((start, end)) = query.created_between {
                rows = rows
                    .filter(users::created_at.ge(start))
                    .filter(users::created_at.lt(end));
            }
            rows
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut rows = query_builder();
        rows = match &query.order {
            Some((field, direction)) => match field.as_str() {
                "id" => order_by!(rows, direction, users::id),
                "name" => order_by!(rows, direction, users::name),
                "email" => order_by!(rows, direction, users::email),
                "phone" => order_by!(rows, direction, users::phone),
                "status" => order_by!(rows, direction, users::status),
                "created_at" => order_by!(rows, direction, users::created_at),
                "updated_at" => order_by!(rows, direction, users::updated_at),
                other => {
                    log::warn!("Ignoring sort on unsupported user field `{other}`");
                    rows.order(users::id.desc())
                }
            },
            None => rows.order(users::id.desc()),
        };
        if let Some(pagination) = &query.pagination {
            rows = rows.offset(pagination.offset()).limit(pagination.limit());
        }

        let users = rows
            .select(DbUser::as_select())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();

        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .returning(DbUser::as_returning())
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
