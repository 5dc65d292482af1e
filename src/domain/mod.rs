//! Domain aggregates exposed by the dashboard service layer.

pub mod item;
pub mod promotion;
pub mod status;
pub mod types;
pub mod user;
