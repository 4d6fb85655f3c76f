use service::SortDirection;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Who moved the page index.
///
/// The table surface echoes back every index change it is told to apply, the
/// same way a paginator widget fires its change event when set
/// programmatically. Tagging the origin lets the cursor consume such echoes
/// without issuing a second fetch for one user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    User,
    Programmatic,
}

/// Page index/size and sort key/direction driving one measurement query.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationCursor {
    page_index: u32,
    page_size: u32,
    sort_key: Option<String>,
    sort_direction: Option<SortDirection>,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: None,
            sort_direction: None,
        }
    }
}

impl PaginationCursor {
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Applies a page-change event. Returns whether a reload is due: a
    /// user-driven change always reloads, a programmatic echo never does
    /// (the mutation that caused it already reloaded).
    pub fn set_page(&mut self, index: u32, size: u32, origin: PageOrigin) -> bool {
        self.page_index = index;
        self.page_size = size;

        origin == PageOrigin::User
    }

    /// Changing the sort invalidates the page position, so the index resets
    /// to 0. The caller issues exactly one reload for the whole mutation.
    pub fn set_sort(&mut self, key: Option<String>, direction: Option<SortDirection>) {
        self.sort_key = key;
        self.sort_direction = direction;
        self.page_index = 0;
    }

    /// Filter changes invalidate the page position but leave sort untouched.
    pub fn reset_for_new_filter(&mut self) {
        self.page_index = 0;
    }

    /// Server-side sort parameter, present only when both key and direction
    /// are set.
    pub fn sort_param(&self) -> Option<String> {
        match (&self.sort_key, self.sort_direction) {
            (Some(key), Some(direction)) => Some(format!("{key},{direction}")),
            _ => None,
        }
    }
}
