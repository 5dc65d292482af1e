//! Paginate parameters: the query state behind every list screen.
//!
//! A [`PaginateParams`] value is never edited in place. Each user intent goes
//! through [`PaginateParams::apply`], which returns a fresh value, so anything
//! reading the parameters always sees a consistent snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page sizes offered by the paginator dropdown.
pub const PER_PAGE_OPTIONS: [usize; 6] = [10, 50, 100, 150, 500, 1000];
/// Highest page number accepted, so the row offset of any page fits an `i64`.
pub const MAX_PAGE: usize = i64::MAX as usize / PER_PAGE_OPTIONS[PER_PAGE_OPTIONS.len() - 1];
/// Status filter sentinel meaning "no status filter".
pub const ALL_STATUSES: &str = "ALL";
/// Field name written into `filter` by the status filter.
pub const STATUS_FILTER_FIELD: &str = "status";
/// Wire pattern for `start_date`/`end_date` (two-digit year).
pub const DATE_FORMAT: &str = "%y-%m-%d";
const FULL_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("page size {0} is not one of the offered options")]
    UnsupportedPerPage(usize),
    #[error("unknown sort direction `{0}`")]
    UnknownSort(String),
}

/// Sort direction sent to the list endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// Maps the table widget's sort-order code: `1` is descending, anything
    /// else ascending.
    pub const fn from_ui_code(code: i8) -> Self {
        if code == 1 {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// Sort-order code handed back to the table widget.
    pub const fn ui_code(self) -> i8 {
        match self {
            SortDirection::Desc => 1,
            SortDirection::Asc => -1,
            SortDirection::None => 0,
        }
    }

    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            SortDirection::Asc => Some("ASC"),
            SortDirection::Desc => Some("DESC"),
            SortDirection::None => None,
        }
    }

    fn parse(raw: &str) -> Result<Self, ParamsError> {
        match raw.trim().to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            "" => Ok(SortDirection::None),
            other => Err(ParamsError::UnknownSort(other.to_string())),
        }
    }
}

/// Page size restricted to [`PER_PAGE_OPTIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PerPage(usize);

impl PerPage {
    pub fn new(value: usize) -> Result<Self, ParamsError> {
        if PER_PAGE_OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ParamsError::UnsupportedPerPage(value))
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PerPage {
    fn default() -> Self {
        Self(PER_PAGE_OPTIONS[0])
    }
}

/// A `filter`/`value` pair. Both halves are always non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldFilter {
    field: String,
    value: String,
}

impl FieldFilter {
    /// Returns `None` unless both the field and the value are non-empty.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Option<Self> {
        let field = field.into().trim().to_string();
        let value = value.into().trim().to_string();
        if field.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self { field, value })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Inclusive creation-date bounds. Both ends are always present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parses a wire date in either the two-digit or the four-digit year form.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let format = if raw.len() == 8 {
        DATE_FORMAT
    } else {
        FULL_DATE_FORMAT
    };
    NaiveDate::parse_from_str(raw, format).ok()
}

/// Formats a date with the fixed wire pattern.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One user action on a list screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Paginator change. `page_index` is the widget's 0-based index.
    Paginate { page_index: usize, rows: usize },
    Search(String),
    /// Column header click. `order_code` is the widget's sort-order code.
    Sort { field: String, order_code: i8 },
    FilterByStatus(String),
    FilterByDate {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Reset,
}

/// Query state requested from the list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "ParamsWire", from = "ParamsWire")]
pub struct PaginateParams {
    page: usize,
    per_page: PerPage,
    sort: SortDirection,
    order: Option<String>,
    filter: Option<FieldFilter>,
    search: String,
    dates: Option<DateRange>,
}

impl Default for PaginateParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: PerPage::default(),
            sort: SortDirection::Desc,
            order: Some("id".to_string()),
            filter: None,
            search: String::new(),
            dates: None,
        }
    }
}

impl PaginateParams {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page.get()
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn filter(&self) -> Option<&FieldFilter> {
        self.filter.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn dates(&self) -> Option<DateRange> {
        self.dates
    }

    /// Row offset of the first record on the current page.
    pub fn first(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page.get())
    }

    /// Produces the parameters that result from `intent`.
    #[must_use]
    pub fn apply(&self, intent: Intent) -> Self {
        let mut next = self.clone();
        match intent {
            Intent::Paginate { page_index, rows } => {
                next.page = page_index.saturating_add(1).min(MAX_PAGE);
                match PerPage::new(rows) {
                    Ok(per_page) => next.per_page = per_page,
                    Err(err) => log::warn!("Keeping page size {}: {err}", self.per_page.get()),
                }
            }
            Intent::Search(query) => {
                next.search = query;
            }
            Intent::Sort { field, order_code } => {
                next.sort = SortDirection::from_ui_code(order_code);
                next.order = Some(field).filter(|f| !f.trim().is_empty());
            }
            Intent::FilterByStatus(value) => {
                next.filter = if value == ALL_STATUSES {
                    None
                } else {
                    FieldFilter::new(STATUS_FILTER_FIELD, value)
                };
            }
            Intent::FilterByDate { start, end } => {
                next.dates = match (start, end) {
                    (Some(start), Some(end)) => Some(DateRange { start, end }),
                    _ => None,
                };
            }
            Intent::Reset => return Self::default(),
        }
        next
    }

    /// Encodes the parameters as a URL query string.
    pub fn to_query(&self) -> String {
        match serde_html_form::to_string(ParamsWire::from(self.clone())) {
            Ok(query) => query,
            Err(err) => {
                log::error!("Failed to encode paginate params: {err}");
                String::new()
            }
        }
    }

    /// Flat `(key, value)` pairs, used for hidden form inputs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let wire = ParamsWire::from(self.clone());
        let mut pairs = vec![("page", self.page.to_string())];
        pairs.push(("per_page", self.per_page.get().to_string()));
        let optional = [
            ("sort", wire.sort),
            ("order", wire.order),
            ("filter", wire.filter),
            ("value", wire.value),
            ("search", wire.search),
            ("start_date", wire.start_date),
            ("end_date", wire.end_date),
        ];
        pairs.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        );
        pairs
    }
}

/// Flat representation exchanged with the list endpoint and the browser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<PaginateParams> for ParamsWire {
    fn from(params: PaginateParams) -> Self {
        let (filter, value) = match params.filter {
            Some(FieldFilter { field, value }) => (Some(field), Some(value)),
            None => (None, None),
        };
        let (start_date, end_date) = match params.dates {
            Some(range) => (Some(format_date(range.start)), Some(format_date(range.end))),
            None => (None, None),
        };
        Self {
            page: Some(params.page),
            per_page: Some(params.per_page.get()),
            sort: params.sort.as_str().map(str::to_string),
            order: params.order,
            filter,
            value,
            search: Some(params.search).filter(|s| !s.is_empty()),
            start_date,
            end_date,
        }
    }
}

impl From<ParamsWire> for PaginateParams {
    /// Normalizes untrusted input: unpaired filter or date halves are
    /// dropped together and unsupported values fall back to defaults.
    fn from(wire: ParamsWire) -> Self {
        let defaults = PaginateParams::default();

        let page = wire
            .page
            .filter(|p| *p > 0)
            .unwrap_or(defaults.page)
            .min(MAX_PAGE);

        let per_page = match wire.per_page {
            Some(n) => PerPage::new(n).unwrap_or_else(|err| {
                log::warn!("Falling back to default page size: {err}");
                defaults.per_page
            }),
            None => defaults.per_page,
        };

        let (sort, order) = match (non_empty(wire.sort), non_empty(wire.order)) {
            (None, None) => (defaults.sort, defaults.order),
            (sort, order) => {
                let sort = sort.map_or(SortDirection::None, |raw| {
                    SortDirection::parse(&raw).unwrap_or_else(|err| {
                        log::warn!("Ignoring sort direction: {err}");
                        SortDirection::None
                    })
                });
                (sort, order)
            }
        };

        let filter = match (non_empty(wire.filter), non_empty(wire.value)) {
            (Some(field), Some(value)) => FieldFilter::new(field, value),
            (None, None) => None,
            _ => {
                log::warn!("Dropping unpaired filter/value parameters");
                None
            }
        };

        let dates = match (non_empty(wire.start_date), non_empty(wire.end_date)) {
            (Some(start), Some(end)) => match (parse_date(&start), parse_date(&end)) {
                (Some(start), Some(end)) => Some(DateRange { start, end }),
                _ => {
                    log::warn!("Dropping unparsable date range {start}..{end}");
                    None
                }
            },
            (None, None) => None,
            _ => {
                log::warn!("Dropping unpaired start_date/end_date parameters");
                None
            }
        };

        Self {
            page,
            per_page,
            sort,
            order,
            filter,
            search: wire.search.unwrap_or_default(),
            dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_pairs_consistent(params: &PaginateParams) {
        let wire = ParamsWire::from(params.clone());
        assert_eq!(wire.filter.is_some(), wire.value.is_some());
        assert_eq!(wire.start_date.is_some(), wire.end_date.is_some());
    }

    #[test]
    fn paginate_converts_zero_based_index() {
        let params = PaginateParams::default().apply(Intent::Paginate {
            page_index: 2,
            rows: 50,
        });
        assert_eq!(params.page(), 3);
        assert_eq!(params.per_page(), 50);
        assert_eq!(params.first(), 100);
    }

    #[test]
    fn paginate_keeps_page_size_outside_offered_set() {
        let params = PaginateParams::default().apply(Intent::Paginate {
            page_index: 0,
            rows: 33,
        });
        assert_eq!(params.per_page(), 10);
    }

    #[test]
    fn search_only_touches_search() {
        let before = PaginateParams::default()
            .apply(Intent::Paginate {
                page_index: 1,
                rows: 50,
            })
            .apply(Intent::FilterByStatus("ACTIVE".into()));
        let after = before.apply(Intent::Search("red shirt".into()));

        assert_eq!(after.search(), "red shirt");
        assert_eq!(after.page(), before.page());
        assert_eq!(after.per_page(), before.per_page());
        assert_eq!(after.filter(), before.filter());
        assert_eq!(after.sort(), before.sort());
    }

    #[test]
    fn sort_maps_ui_codes() {
        let desc = PaginateParams::default().apply(Intent::Sort {
            field: "price".into(),
            order_code: 1,
        });
        assert_eq!(desc.sort(), SortDirection::Desc);
        assert_eq!(desc.order(), Some("price"));

        for code in [-1, 0, 5] {
            let asc = desc.apply(Intent::Sort {
                field: "name".into(),
                order_code: code,
            });
            assert_eq!(asc.sort(), SortDirection::Asc);
            assert_eq!(asc.order(), Some("name"));
        }
    }

    #[test]
    fn status_filter_sets_both_halves() {
        let params = PaginateParams::default().apply(Intent::FilterByStatus("DISABLE".into()));
        let filter = params.filter().unwrap();
        assert_eq!(filter.field(), "status");
        assert_eq!(filter.value(), "DISABLE");
        assert_pairs_consistent(&params);
    }

    #[test]
    fn all_sentinel_clears_filter_regardless_of_prior_value() {
        let filtered = PaginateParams::default().apply(Intent::FilterByStatus("ACTIVE".into()));
        let cleared = filtered.apply(Intent::FilterByStatus(ALL_STATUSES.into()));
        assert!(cleared.filter().is_none());
        assert_pairs_consistent(&cleared);

        let wire = ParamsWire::from(cleared);
        assert!(wire.filter.is_none());
        assert!(wire.value.is_none());
    }

    #[test]
    fn empty_status_value_never_sets_filter_alone() {
        let params = PaginateParams::default().apply(Intent::FilterByStatus(String::new()));
        assert!(params.filter().is_none());
        assert_pairs_consistent(&params);
    }

    #[test]
    fn date_filter_uses_two_digit_year_pattern() {
        let params = PaginateParams::default().apply(Intent::FilterByDate {
            start: Some(date(2024, 1, 1)),
            end: Some(date(2024, 1, 31)),
        });
        let wire = ParamsWire::from(params.clone());
        assert_eq!(wire.start_date.as_deref(), Some("24-01-01"));
        assert_eq!(wire.end_date.as_deref(), Some("24-01-31"));

        let cleared = params.apply(Intent::FilterByDate {
            start: Some(date(2024, 1, 1)),
            end: None,
        });
        let wire = ParamsWire::from(cleared.clone());
        assert!(wire.start_date.is_none());
        assert!(wire.end_date.is_none());
        assert!(!cleared.to_query().contains("start_date"));
        assert!(!cleared.to_query().contains("end_date"));
    }

    #[test]
    fn reset_returns_defaults() {
        let params = PaginateParams::default()
            .apply(Intent::Search("shirt".into()))
            .apply(Intent::FilterByStatus("ACTIVE".into()))
            .apply(Intent::Reset);
        assert_eq!(params, PaginateParams::default());
    }

    #[test]
    fn wire_drops_unpaired_halves() {
        let wire = ParamsWire {
            filter: Some("status".into()),
            start_date: Some("24-01-01".into()),
            ..ParamsWire::default()
        };
        let params = PaginateParams::from(wire);
        assert!(params.filter().is_none());
        assert!(params.dates().is_none());
    }

    #[test]
    fn wire_rejects_unsupported_page_size_and_zero_page() {
        let params = PaginateParams::from(ParamsWire {
            page: Some(0),
            per_page: Some(7),
            ..ParamsWire::default()
        });
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 10);
    }

    #[test]
    fn query_string_round_trips_through_the_form_codec() {
        let params = PaginateParams::default()
            .apply(Intent::Search("red shirt".into()))
            .apply(Intent::FilterByDate {
                start: Some(date(2024, 1, 1)),
                end: Some(date(2024, 1, 31)),
            });
        let query = params.to_query();
        let parsed: PaginateParams = serde_html_form::from_str(&query).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn huge_page_numbers_are_clamped() {
        let params = PaginateParams::from(ParamsWire {
            page: Some(usize::MAX),
            per_page: Some(1000),
            ..ParamsWire::default()
        });
        assert_eq!(params.page(), MAX_PAGE);
        assert!(i64::try_from(params.first()).is_ok());

        let jumped = PaginateParams::default().apply(Intent::Paginate {
            page_index: usize::MAX,
            rows: 10,
        });
        assert_eq!(jumped.page(), MAX_PAGE);
        assert_eq!(jumped.first(), (MAX_PAGE - 1) * 10);
    }

    #[test]
    fn parse_date_accepts_both_year_forms() {
        assert_eq!(parse_date("24-01-31"), Some(date(2024, 1, 31)));
        assert_eq!(parse_date("2024-01-31"), Some(date(2024, 1, 31)));
        assert_eq!(parse_date("31/01/2024"), None);
    }
}
