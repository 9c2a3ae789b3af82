//! Widget state management.
//!
//! [`WidgetState`] is the page-state model behind the comments widget. It
//! decides which page to fetch in response to user actions and records the
//! outcome of each fetch. It performs no I/O: every transition that needs a
//! fetch returns the [`PageRequest`] to run, and the caller reports back with
//! [`WidgetState::finish_load`].

use ghcomments_config::Config;
use ghcomments_protocol::{CommentPage, PageNavigation, PageRequest, PaginationHeaders};

/// What the widget is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet; the "show comments" button is visible.
    #[default]
    Hidden,
    /// A fetch for `page` is in flight.
    Loading {
        /// The page being fetched.
        page: u32,
    },
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    ///
    /// The previously loaded page, if any, stays on screen.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

/// The widget options that shape state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Wait for the user before loading the first page.
    pub use_show_comments_button: bool,
    /// Offer a refresh control.
    pub allow_refreshing_comments: bool,
    /// Page size sent with every request.
    pub comments_per_page: u8,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for WidgetOptions {
    fn from(config: &Config) -> Self {
        Self {
            use_show_comments_button: config.use_show_comments_button,
            allow_refreshing_comments: config.allow_refreshing_comments,
            comments_per_page: config.comments_per_page,
        }
    }
}

/// The comments widget state.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Options the widget was created with.
    pub options: WidgetOptions,
    /// Current phase.
    pub phase: Phase,
    /// The most recently loaded page.
    pub page: Option<CommentPage>,
    /// Scroll offset into the rendered comment list, in rows.
    pub scroll: u16,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
}

impl WidgetState {
    /// Creates the initial state; nothing is loaded yet.
    #[must_use]
    pub fn new(options: WidgetOptions) -> Self {
        Self {
            options,
            phase: Phase::Hidden,
            page: None,
            scroll: 0,
            help_visible: false,
        }
    }

    /// Returns the request to run when the widget first appears.
    ///
    /// Without the "show comments" button the first page loads right away.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_tui::state::{Phase, WidgetOptions, WidgetState};
    ///
    /// let options = WidgetOptions {
    ///     use_show_comments_button: false,
    ///     allow_refreshing_comments: true,
    ///     comments_per_page: 25,
    /// };
    /// let mut state = WidgetState::new(options);
    ///
    /// let request = state.start().unwrap();
    /// assert_eq!((request.page, request.per_page), (1, 25));
    /// assert_eq!(state.phase, Phase::Loading { page: 1 });
    /// ```
    pub fn start(&mut self) -> Option<PageRequest> {
        if self.options.use_show_comments_button {
            None
        } else {
            Some(self.begin_load(1))
        }
    }

    /// Handles the "show comments" button.
    ///
    /// Loads the first page when the button is showing. After a first load
    /// that failed with nothing on screen, it retries that load.
    pub fn show_comments(&mut self) -> Option<PageRequest> {
        match self.phase {
            Phase::Hidden => Some(self.begin_load(1)),
            Phase::Failed { .. } if self.page.is_none() => Some(self.begin_load(1)),
            _ => None,
        }
    }

    /// Handles a pagination control.
    ///
    /// Returns `None` when the control is disabled: nothing is loaded yet, a
    /// fetch is in flight, the current response did not advertise the
    /// relation, or refresh is turned off.
    pub fn navigate(&mut self, navigation: PageNavigation) -> Option<PageRequest> {
        if self.is_loading() {
            return None;
        }
        let page = self.page.as_ref()?;
        if navigation == PageNavigation::Refresh && !self.options.allow_refreshing_comments {
            return None;
        }

        let target = page.pagination.target(navigation, page.page)?;
        Some(self.begin_load(target))
    }

    /// Returns `true` when `navigation` would currently trigger a fetch.
    #[must_use]
    pub fn can_navigate(&self, navigation: PageNavigation) -> bool {
        if self.is_loading() {
            return false;
        }
        if navigation == PageNavigation::Refresh && !self.options.allow_refreshing_comments {
            return false;
        }
        self.page
            .as_ref()
            .is_some_and(|page| page.pagination.allows(navigation))
    }

    /// Records the outcome of a fetch started by this state.
    ///
    /// A successful load replaces the page and resets scrolling. A failure
    /// keeps the previous page so the user can still read and navigate it.
    pub fn finish_load(&mut self, result: Result<CommentPage, String>) {
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.phase = Phase::Loaded;
                self.scroll = 0;
            }
            Err(message) => {
                self.phase = Phase::Failed { message };
            }
        }
    }

    /// Returns `true` while a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Returns the page number on screen, or being loaded when nothing is.
    #[must_use]
    pub fn current_page(&self) -> Option<u32> {
        self.page.as_ref().map(|page| page.page).or(match self.phase {
            Phase::Loading { page } => Some(page),
            _ => None,
        })
    }

    /// Returns the pagination slots of the page on screen.
    #[must_use]
    pub fn pagination(&self) -> PaginationHeaders {
        self.page
            .as_ref()
            .map(|page| page.pagination)
            .unwrap_or_default()
    }

    /// Returns the failure message, if the last fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::replace(&mut self.help_visible, false)
    }

    /// Scrolls the comment list by `delta` rows.
    ///
    /// Positive deltas scroll down. The offset never goes below zero; use
    /// [`clamp_scroll`](Self::clamp_scroll) to bound it from above.
    pub fn scroll_by(&mut self, delta: i32) {
        let magnitude = u16::try_from(delta.unsigned_abs()).unwrap_or(u16::MAX);
        self.scroll = if delta >= 0 {
            self.scroll.saturating_add(magnitude)
        } else {
            self.scroll.saturating_sub(magnitude)
        };
    }

    /// Clamps the scroll offset to `max`.
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll = self.scroll.min(max);
    }

    fn begin_load(&mut self, page: u32) -> PageRequest {
        self.phase = Phase::Loading { page };
        PageRequest::new(page, self.options.comments_per_page)
    }
}
