//! List view orchestrator.
//!
//! A [`ListView`] is one mounted list screen. It owns the current
//! [`PaginateParams`], the last applied page, the loading flag and the filter
//! widgets' state, and it is driven from a single task: state lives in
//! `Cell`/`RefCell` and no borrow is held across an await.
//!
//! Every fetch takes a ticket from a generation counter. When the fetch
//! resolves, its result is applied only if the ticket is still the latest one
//! and the view is still mounted; otherwise it is dropped.

use std::cell::{Cell, Ref, RefCell};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::status::StatusType;
use crate::view::columns::ColumnSet;
use crate::view::paginator::Paginator;
use crate::view::params::{ALL_STATUSES, Intent, PaginateParams, SortDirection};
use crate::view::render::{RenderContext, render};
use crate::view::table::{
    ColumnHeader, DateFilterView, FooterView, HeaderView, StatusOptionView, TableView,
};

/// Failure reported by a [`ListFetcher`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected status code {0}")]
    Status(u16),
    #[error("list source failure: {0}")]
    Source(String),
}

/// Raw answer of the list endpoint. `total` may be missing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FetchResponse<R> {
    pub records: Vec<R>,
    pub total: Option<usize>,
}

/// Records of the current page plus the total record count.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<R> {
    pub records: Vec<R>,
    pub total: usize,
}

impl<R> ListPage<R> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }

    /// Takes the reported total, or the number of returned records when the
    /// source did not report one.
    pub fn from_response(response: FetchResponse<R>) -> Self {
        let total = response.total.unwrap_or(response.records.len());
        Self {
            records: response.records,
            total,
        }
    }
}

/// Source of list pages and status options for a [`ListView`].
#[allow(async_fn_in_trait)]
pub trait ListFetcher {
    type Record;

    async fn fetch(
        &self,
        params: &PaginateParams,
    ) -> Result<FetchResponse<Self::Record>, FetchError>;

    async fn fetch_statuses(&self, status_type: StatusType) -> Result<Vec<String>, FetchError>;
}

/// What happened to the result of one fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was replaced.
    Applied,
    /// The fetch failed; the previous page was kept.
    Failed,
    /// A newer fetch was started before this one resolved.
    Superseded,
    /// The view was unmounted before the fetch resolved.
    Discarded,
}

/// Bounds currently entered in the date filter widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateFilterState {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

struct ViewState<R> {
    params: PaginateParams,
    revision: u64,
    page: ListPage<R>,
    loading: bool,
    last_error: Option<String>,
    status_filter: String,
    date_filter: DateFilterState,
    show_audit: bool,
    statuses: Vec<String>,
    statuses_loaded: bool,
}

pub struct ListView<F: ListFetcher> {
    fetcher: F,
    columns: ColumnSet,
    status_type: StatusType,
    state: RefCell<ViewState<F::Record>>,
    generation: Cell<u64>,
    mounted: Cell<bool>,
}

impl<F: ListFetcher> ListView<F> {
    pub fn new(
        fetcher: F,
        columns: ColumnSet,
        status_type: StatusType,
        params: PaginateParams,
    ) -> Self {
        let status_filter = params
            .filter()
            .map_or_else(|| ALL_STATUSES.to_string(), |f| f.value().to_string());
        let date_filter = params
            .dates()
            .map(|range| DateFilterState {
                start: Some(range.start),
                end: Some(range.end),
            })
            .unwrap_or_default();

        Self {
            fetcher,
            columns,
            status_type,
            state: RefCell::new(ViewState {
                params,
                revision: 0,
                page: ListPage::empty(),
                loading: false,
                last_error: None,
                status_filter,
                date_filter,
                show_audit: false,
                statuses: vec![ALL_STATUSES.to_string()],
                statuses_loaded: false,
            }),
            generation: Cell::new(0),
            mounted: Cell::new(true),
        }
    }

    /// Loads the status options and the first page concurrently.
    pub async fn mount(&self) -> FetchOutcome {
        let ((), outcome) = futures::join!(self.load_statuses(), self.load());
        outcome
    }

    /// Stops applying fetch results. Fetches still in flight are discarded
    /// when they resolve.
    pub fn unmount(&self) {
        self.mounted.set(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Applies `intent` to the parameters and fetches the resulting page.
    pub async fn dispatch(&self, intent: Intent) -> FetchOutcome {
        self.replace_params(intent);
        self.load().await
    }

    /// Re-fetches the page for the current parameters.
    pub async fn refresh(&self) -> FetchOutcome {
        self.load().await
    }

    /// Swaps in the parameters produced by `intent` and updates the filter
    /// widgets' state. Exactly one replacement happens per call.
    pub fn replace_params(&self, intent: Intent) {
        let mut state = self.state.borrow_mut();
        match &intent {
            Intent::FilterByStatus(value) => state.status_filter = value.clone(),
            Intent::FilterByDate { start, end } => {
                state.date_filter = DateFilterState {
                    start: *start,
                    end: *end,
                };
            }
            Intent::Reset => {
                state.status_filter = ALL_STATUSES.to_string();
                state.date_filter = DateFilterState::default();
            }
            Intent::Paginate { .. } | Intent::Search(_) | Intent::Sort { .. } => {}
        }
        let next = state.params.apply(intent);
        state.params = next;
        state.revision += 1;
    }

    pub fn set_show_audit(&self, show: bool) {
        self.state.borrow_mut().show_audit = show;
    }

    pub fn params(&self) -> PaginateParams {
        self.state.borrow().params.clone()
    }

    /// Number of parameter replacements since the view was created.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn total(&self) -> usize {
        self.state.borrow().page.total
    }

    pub fn page(&self) -> Ref<'_, ListPage<F::Record>> {
        Ref::map(self.state.borrow(), |state| &state.page)
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    pub fn status_options(&self) -> Vec<String> {
        self.state.borrow().statuses.clone()
    }

    pub fn status_filter(&self) -> String {
        self.state.borrow().status_filter.clone()
    }

    pub fn date_filter(&self) -> DateFilterState {
        self.state.borrow().date_filter
    }

    async fn load(&self) -> FetchOutcome {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);

        let params = {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.params.clone()
        };
        log::debug!("Fetching list page #{ticket}: {}", params.to_query());

        let result = self.fetcher.fetch(&params).await;

        if !self.mounted.get() {
            log::debug!("Discarding list page #{ticket}: view unmounted");
            return FetchOutcome::Discarded;
        }
        if self.generation.get() != ticket {
            log::debug!("Dropping stale list page #{ticket}");
            return FetchOutcome::Superseded;
        }

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match result {
            Ok(response) => {
                state.page = ListPage::from_response(response);
                state.last_error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                log::warn!("Keeping previous list page, fetch #{ticket} failed: {err}");
                state.last_error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    async fn load_statuses(&self) {
        if self.state.borrow().statuses_loaded {
            return;
        }
        let result = self.fetcher.fetch_statuses(self.status_type).await;
        if !self.mounted.get() {
            return;
        }
        let mut state = self.state.borrow_mut();
        match result {
            Ok(statuses) => {
                state
                    .statuses
                    .extend(statuses.into_iter().filter(|s| s != ALL_STATUSES));
                state.statuses_loaded = true;
            }
            Err(err) => {
                log::warn!(
                    "Failed to load `{}` status options: {err}",
                    self.status_type.as_str()
                );
            }
        }
    }
}

impl<F> ListView<F>
where
    F: ListFetcher,
    F::Record: Serialize,
{
    /// Renders the current state into the table model used by templates.
    pub fn table(&self, title: &str, ctx: &RenderContext<'_>) -> TableView {
        let state = self.state.borrow();
        let params = &state.params;
        let show_audit = state.show_audit;
        let translate = ctx.translate;

        let href = |p: &PaginateParams| table_href(ctx.base_path, p, show_audit);

        let visible = self.columns.visible(show_audit);

        let columns = visible
            .iter()
            .map(|column| {
                let sorted = params.order() == Some(column.field.as_str());
                let current = if sorted {
                    params.sort()
                } else {
                    SortDirection::None
                };
                // Clicking a descending column flips it to ascending.
                let next_code = if current == SortDirection::Desc { -1 } else { 1 };
                ColumnHeader {
                    field: column.field.clone(),
                    header: column.header.clone(),
                    sort_code: current.ui_code(),
                    sort_href: href(&params.apply(Intent::Sort {
                        field: column.field.clone(),
                        order_code: next_code,
                    })),
                }
            })
            .collect();

        let rows = state
            .page
            .records
            .iter()
            .filter_map(|record| match serde_json::to_value(record) {
                Ok(value) => Some(value),
                Err(err) => {
                    log::error!("Failed to serialize list record: {err}");
                    None
                }
            })
            .map(|record| {
                visible
                    .iter()
                    .enumerate()
                    .map(|(index, column)| render(&record, column, index, ctx))
                    .collect()
            })
            .collect();

        let status_options = state
            .statuses
            .iter()
            .map(|status| StatusOptionView {
                value: status.clone(),
                label: if status == ALL_STATUSES {
                    status.clone()
                } else {
                    translate.status_label(status)
                },
                selected: *status == state.status_filter,
            })
            .collect();

        let header = HeaderView {
            search: params.search().to_string(),
            status_options,
            date_filter: DateFilterView::from(state.date_filter),
            hidden_params: params
                .to_pairs()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            show_audit,
        };

        let total = state.page.total;
        let footer = FooterView {
            total,
            reset_href: href(&params.apply(Intent::Reset)),
            audit_href: table_href(ctx.base_path, params, !show_audit),
            show_audit,
            error: state.last_error.as_ref().map(|_| translate.load_failed.clone()),
        };

        TableView {
            title: title.to_string(),
            base_path: ctx.base_path.to_string(),
            loading: state.loading,
            header,
            columns,
            rows,
            footer,
            paginator: Paginator::new(params, total, &translate.total, href),
            empty_message: translate.empty.clone(),
        }
    }
}

/// Link to the list screen for `params`, keeping the audit toggle.
pub fn table_href(base_path: &str, params: &PaginateParams, show_audit: bool) -> String {
    let audit = if show_audit { "&audit=true" } else { "" };
    format!("{base_path}?{}{audit}", params.to_query())
}
