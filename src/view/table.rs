//! Serializable table model handed to the list templates.

use serde::Serialize;

use crate::view::list_view::DateFilterState;
use crate::view::paginator::Paginator;
use crate::view::params::format_date;
use crate::view::render::Presentation;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub field: String,
    pub header: String,
    /// `1` descending, `-1` ascending, `0` unsorted.
    pub sort_code: i8,
    pub sort_href: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DateFilterView {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<DateFilterState> for DateFilterView {
    fn from(state: DateFilterState) -> Self {
        Self {
            start: state.start.map(format_date),
            end: state.end.map(format_date),
        }
    }
}

/// Search box, status dropdown and date range picker.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderView {
    pub search: String,
    pub status_options: Vec<StatusOptionView>,
    pub date_filter: DateFilterView,
    /// Current parameters, re-posted alongside every header intent.
    pub hidden_params: Vec<(String, String)>,
    pub show_audit: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FooterView {
    pub total: usize,
    pub reset_href: String,
    pub audit_href: String,
    pub show_audit: bool,
    /// Notice shown when the last refresh failed.
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub base_path: String,
    pub loading: bool,
    pub header: HeaderView,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<Presentation>>,
    pub footer: FooterView,
    pub paginator: Paginator,
    pub empty_message: String,
}
