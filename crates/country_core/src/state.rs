use crate::view_model::{CountryRowView, ListViewModel};
use crate::{Country, UiState};

const DEFAULT_PAGE_SIZE: usize = 20;

/// Scroll bookkeeping for the list.
///
/// `pending_restore` survives view teardown and is applied the next time rows
/// are inserted into a non-empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub offset: usize,
    pub pending_restore: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    latest: UiState<Vec<Country>>,
    rows: Vec<Country>,
    spinner_visible: bool,
    view_attached: bool,
    scroll: ScrollState,
    notice: Option<String>,
    page_size: usize,
    dirty: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            latest: UiState::Loading,
            rows: Vec::new(),
            spinner_visible: true,
            view_attached: true,
            scroll: ScrollState::default(),
            notice: None,
            page_size: DEFAULT_PAGE_SIZE,
            dirty: false,
        }
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page size of zero shows every row.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Seeds the scroll position to restore once rows first arrive, without
    /// marking the state dirty.
    pub fn with_initial_scroll(mut self, offset: usize) -> Self {
        self.scroll.pending_restore = Some(offset);
        self
    }

    pub fn latest(&self) -> &UiState<Vec<Country>> {
        &self.latest
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn view(&self) -> ListViewModel {
        let start = self.scroll.offset.min(self.rows.len());
        let end = if self.page_size == 0 {
            self.rows.len()
        } else {
            (start + self.page_size).min(self.rows.len())
        };
        ListViewModel {
            spinner_visible: self.spinner_visible,
            rows: self.rows[start..end]
                .iter()
                .enumerate()
                .map(|(i, country)| CountryRowView {
                    index: start + i,
                    title: country.title(),
                    code: country.code.clone(),
                    capital: country.capital.clone(),
                })
                .collect(),
            total_rows: self.rows.len(),
            scroll_offset: self.scroll.offset,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn apply_countries(&mut self, state: UiState<Vec<Country>>) {
        match &state {
            UiState::Loading => {
                self.spinner_visible = true;
            }
            UiState::Success(countries) => {
                self.spinner_visible = false;
                if self.view_attached {
                    self.submit_rows(countries.clone());
                }
            }
            UiState::Error(err) => {
                self.spinner_visible = false;
                self.notice = Some(err.message.clone());
            }
        }
        self.latest = state;
        self.mark_dirty();
    }

    pub(crate) fn apply_scroll(&mut self, offset: usize) {
        if self.rows.is_empty() {
            self.scroll.pending_restore = Some(offset);
        } else {
            self.scroll.offset = self.clamp_offset(offset);
            self.scroll.pending_restore = Some(self.scroll.offset);
        }
        self.mark_dirty();
    }

    pub(crate) fn detach_view(&mut self) {
        if !self.view_attached {
            return;
        }
        self.scroll.pending_restore = Some(self.scroll.offset);
        self.view_attached = false;
        self.rows.clear();
        self.scroll.offset = 0;
        self.mark_dirty();
    }

    pub(crate) fn attach_view(&mut self) {
        if self.view_attached {
            return;
        }
        self.view_attached = true;
        // The observed state is replayed into the fresh view.
        if let UiState::Success(countries) = &self.latest {
            let countries = countries.clone();
            self.submit_rows(countries);
        }
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    fn submit_rows(&mut self, rows: Vec<Country>) {
        self.rows = rows;
        if self.rows.is_empty() {
            // Restoring into an empty list is deferred until rows arrive.
            self.scroll.offset = 0;
            return;
        }
        let target = self.scroll.pending_restore.take().unwrap_or(self.scroll.offset);
        self.scroll.offset = self.clamp_offset(target);
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.rows.len().saturating_sub(1))
    }
}
