//! URL paths of the dashboard screens.

pub const INDEX: &str = "/";
pub const ITEMS: &str = "/items";
pub const ITEM_EXPORT: &str = "/items/export";
pub const ITEM_IMPORT: &str = "/items/import";
pub const USERS: &str = "/users";
pub const USER_CREATE: &str = "/users/create";
pub const PROMOTIONS: &str = "/promotions";
pub const PROMOTION_CREATE: &str = "/promotions/create";
