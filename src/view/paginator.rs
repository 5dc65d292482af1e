//! Paginator model: page links, page-size options and the page report.

use serde::Serialize;

use crate::view::params::{Intent, PER_PAGE_OPTIONS, PaginateParams};

/// Page numbers to show, with `None` marking a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// `None` renders as an ellipsis.
    pub page: Option<usize>,
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowsOption {
    pub rows: usize,
    pub href: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Paginator {
    /// Offset of the first row on the current page.
    pub first: usize,
    pub rows: usize,
    pub total_records: usize,
    pub current_page: usize,
    pub total_pages: usize,
    /// "Total - {totalRecords} | {currentPage} of {totalPages}".
    pub report: String,
    pub first_href: Option<String>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub last_href: Option<String>,
    pub pages: Vec<PageLink>,
    pub rows_options: Vec<RowsOption>,
}

impl Paginator {
    /// Builds the paginator for `params`, turning every control into the
    /// link produced by `href` for the resulting parameters.
    pub fn new<H>(params: &PaginateParams, total_records: usize, total_label: &str, href: H) -> Self
    where
        H: Fn(&PaginateParams) -> String,
    {
        let rows = params.per_page();
        let current_page = params.page();
        let total_pages = total_records.div_ceil(rows);

        let link = |page: usize| href(&params.apply(Self::page_change(page - 1, rows)));
        let nav = |page: usize, enabled: bool| enabled.then(|| link(page));

        let pages = get_pages(total_pages, current_page, 1, 2, 2, 1)
            .into_iter()
            .map(|page| PageLink {
                page,
                href: page.filter(|p| *p != current_page).map(&link),
                current: page == Some(current_page),
            })
            .collect();

        let rows_options = PER_PAGE_OPTIONS
            .iter()
            .map(|&option| RowsOption {
                rows: option,
                href: href(&params.apply(Self::page_change(0, option))),
                selected: option == rows,
            })
            .collect();

        Self {
            first: params.first(),
            rows,
            total_records,
            current_page,
            total_pages,
            report: format!(
                "{total_label} - {total_records} | {current_page} of {}",
                total_pages.max(1)
            ),
            first_href: nav(1, current_page > 1),
            prev_href: nav(current_page.saturating_sub(1).max(1), current_page > 1),
            next_href: nav(current_page.saturating_add(1), current_page < total_pages),
            last_href: nav(total_pages.max(1), current_page < total_pages),
            pages,
            rows_options,
        }
    }

    /// Intent emitted by the widget for a 0-based page index and row count.
    pub fn page_change(page_index: usize, rows: usize) -> Intent {
        Intent::Paginate { page_index, rows }
    }
}
