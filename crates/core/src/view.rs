//! Per-navigation view context and list render states.

use crate::filter::FilterTerm;
use crate::pagination::Pagination;
use crate::types::BoxId;

/// Everything a records view needs to know about where it is.
///
/// Built once per navigation and handed to the data layer instead of
/// reading route parameters ad hoc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub box_id: Option<BoxId>,
    pub container: Option<String>,
    pub filter: String,
    pub pagination: Pagination,
}

impl ViewContext {
    pub fn new(box_id: Option<BoxId>) -> Self {
        Self {
            box_id,
            ..Self::default()
        }
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn parsed_filter(&self) -> FilterTerm {
        FilterTerm::parse(&self.filter)
    }

    /// Both the box and the container are known, so a records request can
    /// be issued.
    pub fn is_resolved(&self) -> bool {
        self.box_id.is_some() && self.container.is_some()
    }
}

/// The three mutually exclusive render states of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState<'a, T> {
    Loading,
    Empty,
    Rows(&'a [T]),
}

impl<'a, T> ListState<'a, T> {
    /// Decide what to render. Checked in order: not yet loaded, loaded but
    /// empty, loaded with rows.
    pub fn classify(data: Option<&'a [T]>, is_loading: bool) -> Self {
        match data {
            None => Self::Loading,
            Some(_) if is_loading => Self::Loading,
            Some([]) => Self::Empty,
            Some(rows) => Self::Rows(rows),
        }
    }
}
