//! List screen model shared by every data table in the dashboard.

pub mod columns;
pub mod list_view;
pub mod paginator;
pub mod params;
pub mod render;
pub mod table;
pub mod translate;
