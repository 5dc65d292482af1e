//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::item::{Item, NewItem};
use crate::domain::promotion::{NewPromotion, Promotion};
use crate::domain::types::{ItemId, UserEmail};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ItemReader, ItemWriter, ListQuery, PromotionReader, PromotionWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl ItemReader for Repository {
        fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<Item>>;
        fn list_items(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Item>)>;
    }

    impl ItemWriter for Repository {
        fn create_items(&self, new_items: &[NewItem]) -> RepositoryResult<usize>;
    }

    impl UserReader for Repository {
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }

    impl PromotionReader for Repository {
        fn list_promotions(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Promotion>)>;
    }

    impl PromotionWriter for Repository {
        fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion>;
    }
}
