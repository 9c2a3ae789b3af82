//! Main application struct and run loop.
//!
//! [`App`] owns the widget state and the comment fetcher. Messages from the
//! terminal go through [`App::update`], which may ask for an [`Effect`]: a
//! page fetch or opening the browser. The run loop performs effects one at a
//! time, so at most one fetch is ever in flight.

use ghcomments_config::IssueUri;
use ghcomments_github::{CommentFetcher, load_page};
use ghcomments_protocol::{Message, PageRequest};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tracing::{debug, info, warn};

use crate::{
    event::{event_to_message, poll_event},
    layout::{HEADER_HEIGHT, MAX_CONTENT_WIDTH, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, PAGINATION_HEIGHT},
    state::{WidgetOptions, WidgetState},
    terminal::AppTerminal,
    widgets::{render_comment_list, render_help_overlay, render_pagination_bar, render_show_comments_button},
};

/// A side effect requested by [`App::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a page of comments.
    Fetch(PageRequest),
    /// Open a URL in the system browser.
    OpenInBrowser(String),
}

/// The comments widget application.
pub struct App<F> {
    fetcher: F,
    issue: IssueUri,
    state: WidgetState,
    should_quit: bool,
    /// Whether the header was shown in the last render.
    header_visible: bool,
    /// Rows of the comment list visible in the last render.
    viewport_height: u16,
    /// Largest scroll offset for the last rendered page.
    max_scroll: u16,
}

impl<F: CommentFetcher> App<F> {
    /// Creates the widget for `issue`, fetching pages through `fetcher`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ghcomments_config::IssueUri;
    /// use ghcomments_github::GitHubClient;
    /// use ghcomments_tui::{App, WidgetOptions};
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = GitHubClient::new(None).await?;
    /// let issue = IssueUri::parse("rust-lang/rust#1")?;
    /// let app = App::new(client, issue, WidgetOptions::default());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(fetcher: F, issue: IssueUri, options: WidgetOptions) -> Self {
        Self {
            fetcher,
            issue,
            state: WidgetState::new(options),
            should_quit: false,
            header_visible: true,
            viewport_height: 0,
            max_scroll: 0,
        }
    }

    /// Returns a reference to the widget state.
    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Returns the issue whose comments are shown.
    #[must_use]
    pub fn issue(&self) -> &IssueUri {
        &self.issue
    }

    /// Returns whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the effect to perform when the widget first appears.
    pub fn start(&mut self) -> Option<Effect> {
        self.state.start().map(Effect::Fetch)
    }

    /// Updates the widget state based on a message.
    ///
    /// While the help overlay is visible, any message other than `Quit`
    /// only dismisses it.
    pub fn update(&mut self, msg: Message) -> Option<Effect> {
        if msg.is_terminating() {
            self.should_quit = true;
            return None;
        }

        if self.state.help_visible {
            let _ = self.state.dismiss_help();
            return None;
        }

        match msg {
            Message::ShowComments => self.state.show_comments().map(Effect::Fetch),
            Message::Navigate(navigation) => {
                let request = self.state.navigate(navigation);
                if request.is_none() {
                    debug!(?navigation, "navigation not available");
                }
                request.map(Effect::Fetch)
            }
            Message::ScrollUp => self.scroll(-1),
            Message::ScrollDown => self.scroll(1),
            Message::PageUp => self.scroll(-self.page_step()),
            Message::PageDown => self.scroll(self.page_step()),
            Message::OpenInBrowser => Some(Effect::OpenInBrowser(self.issue.html_url())),
            Message::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            Message::Escape | Message::Quit => None,
        }
    }

    fn scroll(&mut self, delta: i32) -> Option<Effect> {
        self.state.scroll_by(delta);
        self.state.clamp_scroll(self.max_scroll);
        None
    }

    fn page_step(&self) -> i32 {
        i32::from(self.viewport_height.saturating_sub(1).max(1))
    }

    /// Fetches `request` and records the outcome in the widget state.
    pub async fn load(&mut self, request: PageRequest) {
        info!(issue = %self.issue, page = request.page, "loading comments");
        let result = load_page(&self.fetcher, &self.issue, request).await;
        if let Err(e) = &result {
            warn!(error = %e, transient = e.is_transient(), "failed to load comments");
        }
        self.state.finish_load(result.map_err(|e| e.to_string()));
    }

    /// Performs an effect returned by [`start`](Self::start) or
    /// [`update`](Self::update).
    pub async fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch(request) => self.load(request).await,
            Effect::OpenInBrowser(url) => {
                if let Err(e) = open::that(&url) {
                    warn!(error = %e, %url, "failed to open browser");
                }
            }
        }
    }

    /// Renders the widget to the given frame.
    ///
    /// Below the minimum size a "terminal too small" message is shown; on
    /// short terminals the header is hidden.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            render_terminal_too_small(frame, area);
            return;
        }

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;

        let content_area = if show_header {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                .split(area);
            self.render_header(frame, chunks[0]);
            chunks[1]
        } else {
            area
        };

        let width = content_area.width.min(MAX_CONTENT_WIDTH);
        let column = Rect {
            x: content_area.x + (content_area.width - width) / 2,
            width,
            ..content_area
        };

        if self.state.page.is_none() && !self.state.is_loading() {
            self.viewport_height = 0;
            self.max_scroll = 0;
            render_show_comments_button(self.state.error(), column, frame.buffer_mut());
        } else {
            self.render_comments(frame, column);
        }

        if self.state.help_visible {
            render_help_overlay(
                self.state.options.allow_refreshing_comments,
                area,
                frame.buffer_mut(),
            );
        }
    }

    /// Renders the comment list with the error line and pagination bar.
    fn render_comments(&mut self, frame: &mut Frame, area: Rect) {
        let error_height = u16::from(self.state.error().is_some() && self.state.page.is_some());
        let [error_area, list_area, bar_area] = Layout::vertical([
            Constraint::Length(error_height),
            Constraint::Min(0),
            Constraint::Length(PAGINATION_HEIGHT),
        ])
        .areas(area);

        if let Some(error) = self.state.error() {
            let line = Line::from(vec![
                Span::styled(
                    " \u{26A0} ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.to_string(), Style::default().fg(Color::Red)),
            ]);
            frame.render_widget(Paragraph::new(line), error_area);
        }

        match &self.state.page {
            Some(page) => {
                let title = format!(" Comments ({}) ", page.comments.len());
                self.max_scroll = render_comment_list(
                    &page.comments,
                    &title,
                    self.state.scroll,
                    list_area,
                    frame.buffer_mut(),
                );
                self.viewport_height = list_area.height.saturating_sub(2);
                self.state.clamp_scroll(self.max_scroll);
            }
            None => {
                let loading = Paragraph::new(Span::styled(
                    "Loading comments\u{2026}",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
                frame.render_widget(loading, list_area);
            }
        }

        render_pagination_bar(&self.state, bar_area, frame.buffer_mut());
    }

    /// Renders the header bar with the issue and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "ghcomments",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(self.issue.to_string(), Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail. Fetch failures are
    /// shown in the widget and never end the loop.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ghcomments_config::IssueUri;
    /// use ghcomments_github::GitHubClient;
    /// use ghcomments_tui::{App, WidgetOptions, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let client = GitHubClient::new(None).await?;
    ///     let issue = IssueUri::parse("rust-lang/rust#1")?;
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(client, issue, WidgetOptions::default());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        let mut pending = self.start();

        loop {
            terminal.draw(|frame| self.view(frame))?;

            // Draw first so the loading state is visible during the fetch.
            if let Some(effect) = pending.take() {
                self.perform(effect).await;
                continue;
            }

            if let Some(event) = poll_event()?
                && let Some(msg) = event_to_message(&event)
            {
                pending = self.update(msg);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}\u{00D7}{})\nMinimum size: {}\u{00D7}{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ghcomments_github::{Error, FetchedComments, Result};
    use ghcomments_protocol::{GithubComment, GithubUser, PageNavigation};

    use super::*;
    use crate::state::Phase;
    use crate::test_utils::{buffer_to_string, test_terminal};

    /// Serves a thread of `total` pages, `per_page` comments each, with
    /// GitHub-style `Link` headers.
    struct ThreadFetcher {
        total: u32,
        fail_pages: Vec<u32>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ThreadFetcher {
        fn new(total: u32) -> Self {
            Self {
                total,
                fail_pages: Vec::new(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_pages.push(page);
            self
        }

        fn requested_pages(&self) -> Vec<u32> {
            self.requests.lock().unwrap().iter().map(|r| r.page).collect()
        }

        fn link(&self, page: u32) -> Option<String> {
            let url = |p: u32| format!("<https://api.github.com/repos/o/r/issues/1/comments?page={p}&per_page=10>");
            let mut parts = Vec::new();
            if page < self.total {
                parts.push(format!(r#"{}; rel="next""#, url(page + 1)));
                parts.push(format!(r#"{}; rel="last""#, url(self.total)));
            }
            if page > 1 {
                parts.push(format!(r#"{}; rel="first""#, url(1)));
                parts.push(format!(r#"{}; rel="previous""#, url(page - 1)));
            }
            (!parts.is_empty()).then(|| parts.join(", "))
        }
    }

    impl CommentFetcher for ThreadFetcher {
        async fn fetch_comments(&self, _issue: &IssueUri, request: PageRequest) -> Result<FetchedComments> {
            self.requests.lock().unwrap().push(request);
            if self.fail_pages.contains(&request.page) {
                return Err(Error::Status {
                    status: 502,
                    message: "Bad Gateway".to_string(),
                });
            }
            let comments = (0..request.per_page)
                .map(|i| GithubComment {
                    id: u64::from(request.page) * 100 + u64::from(i),
                    html_url: String::new(),
                    body_html: String::new(),
                    body: Some(format!("comment {} on page {}", i + 1, request.page)),
                    user: GithubUser {
                        login: if i == 0 { "owner".to_string() } else { format!("user{i}") },
                        avatar_url: String::new(),
                    },
                    author_association: if i == 0 { "OWNER" } else { "NONE" }.to_string(),
                    created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
                })
                .collect();
            Ok(FetchedComments {
                comments,
                link: self.link(request.page),
            })
        }
    }

    fn options(button: bool, refresh: bool, per_page: u8) -> WidgetOptions {
        WidgetOptions {
            use_show_comments_button: button,
            allow_refreshing_comments: refresh,
            comments_per_page: per_page,
        }
    }

    fn app(fetcher: ThreadFetcher, options: WidgetOptions) -> App<ThreadFetcher> {
        App::new(fetcher, IssueUri::new("octocat", "hello-world", 42), options)
    }

    async fn drive(app: &mut App<ThreadFetcher>, msg: Message) {
        if let Some(effect) = app.update(msg) {
            app.perform(effect).await;
        }
    }

    fn render(app: &mut App<ThreadFetcher>, width: u16, height: u16) -> String {
        let mut terminal = test_terminal(width, height);
        terminal.draw(|frame| app.view(frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[tokio::test]
    async fn start_without_button_loads_first_page() {
        let mut app = app(ThreadFetcher::new(3), options(false, true, 10));

        let effect = app.start();
        assert_eq!(effect, Some(Effect::Fetch(PageRequest::new(1, 10))));
        app.perform(effect.unwrap()).await;

        let page = app.state().page.as_ref().unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.comments.len(), 10);
        assert_eq!(page.pagination.next, Some(2));
        assert_eq!(page.pagination.last, Some(3));
        assert_eq!(page.pagination.previous, None);
    }

    #[tokio::test]
    async fn button_waits_for_user() {
        let fetcher = ThreadFetcher::new(1);
        let mut app = app(fetcher, options(true, true, 5));

        assert_eq!(app.start(), None);
        let content = render(&mut app, 80, 20);
        assert!(content.contains("Show comments"));

        drive(&mut app, Message::ShowComments).await;
        assert_eq!(app.state().phase, Phase::Loaded);
        assert_eq!(app.fetcher.requested_pages(), vec![1]);
        assert_eq!(app.fetcher.requests.lock().unwrap()[0].per_page, 5);
    }

    #[tokio::test]
    async fn navigation_walks_the_thread() {
        let mut app = app(ThreadFetcher::new(3), options(true, true, 10));
        drive(&mut app, Message::ShowComments).await;

        drive(&mut app, Message::Navigate(PageNavigation::Next)).await;
        assert_eq!(app.state().current_page(), Some(2));

        drive(&mut app, Message::Navigate(PageNavigation::Last)).await;
        assert_eq!(app.state().current_page(), Some(3));
        assert!(!app.state().can_navigate(PageNavigation::Next));

        drive(&mut app, Message::Navigate(PageNavigation::Previous)).await;
        assert_eq!(app.state().current_page(), Some(2));

        drive(&mut app, Message::Navigate(PageNavigation::First)).await;
        assert_eq!(app.state().current_page(), Some(1));

        assert_eq!(app.fetcher.requested_pages(), vec![1, 2, 3, 2, 1]);
    }

    #[tokio::test]
    async fn disabled_controls_do_not_fetch() {
        let mut app = app(ThreadFetcher::new(1), options(true, false, 10));
        drive(&mut app, Message::ShowComments).await;

        for navigation in [
            PageNavigation::First,
            PageNavigation::Previous,
            PageNavigation::Next,
            PageNavigation::Last,
            PageNavigation::Refresh,
        ] {
            assert_eq!(app.update(Message::Navigate(navigation)), None);
        }
        assert_eq!(app.fetcher.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn refresh_reloads_current_page() {
        let mut app = app(ThreadFetcher::new(2), options(true, true, 10));
        drive(&mut app, Message::ShowComments).await;
        drive(&mut app, Message::Navigate(PageNavigation::Next)).await;
        drive(&mut app, Message::Navigate(PageNavigation::Refresh)).await;

        assert_eq!(app.fetcher.requested_pages(), vec![1, 2, 2]);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_page_and_shows_error() {
        let mut app = app(ThreadFetcher::new(3).failing_on(2), options(true, true, 3));
        drive(&mut app, Message::ShowComments).await;
        drive(&mut app, Message::Navigate(PageNavigation::Next)).await;

        assert_eq!(app.state().current_page(), Some(1));
        assert_eq!(app.state().error(), Some("GitHub returned 502: Bad Gateway"));

        let content = render(&mut app, 80, 30);
        assert!(content.contains("GitHub returned 502: Bad Gateway"));
        assert!(content.contains("comment 1 on page 1"));
    }

    #[tokio::test]
    async fn failed_first_load_offers_retry() {
        let mut app = app(ThreadFetcher::new(1).failing_on(1), options(true, true, 10));
        drive(&mut app, Message::ShowComments).await;

        let content = render(&mut app, 80, 20);
        assert!(content.contains("Press Enter to retry"));

        let effect = app.update(Message::ShowComments);
        assert_eq!(effect, Some(Effect::Fetch(PageRequest::new(1, 10))));
    }

    #[tokio::test]
    async fn view_shows_comments_and_pagination() {
        let mut app = app(ThreadFetcher::new(4), options(true, true, 2));
        drive(&mut app, Message::ShowComments).await;

        let content = render(&mut app, 80, 30);
        assert!(content.contains("ghcomments"));
        assert!(content.contains("octocat/hello-world/issues/42"));
        assert!(content.contains("Comments (2)"));
        assert!(content.contains("@owner"));
        assert!(content.contains("Owner"));
        assert!(content.contains("@user1"));
        assert!(content.contains("comment 2 on page 1"));
        assert!(content.contains("Page 1 of 4"));
    }

    #[tokio::test]
    async fn loading_state_is_rendered() {
        let mut app = app(ThreadFetcher::new(1), options(false, true, 10));
        app.start();

        let content = render(&mut app, 80, 20);
        assert!(content.contains("Loading comments"));
        assert!(content.contains("Loading page 1"));
    }

    #[test]
    fn open_in_browser_targets_issue() {
        let mut app = app(ThreadFetcher::new(1), options(true, true, 10));
        assert_eq!(
            app.update(Message::OpenInBrowser),
            Some(Effect::OpenInBrowser(
                "https://github.com/octocat/hello-world/issues/42".to_string()
            ))
        );
    }

    #[test]
    fn quit_message_sets_should_quit() {
        let mut app = app(ThreadFetcher::new(1), options(true, true, 10));
        assert!(!app.should_quit());
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn help_blocks_other_messages() {
        let mut app = app(ThreadFetcher::new(2), options(true, true, 10));
        drive(&mut app, Message::ShowComments).await;

        app.update(Message::ToggleHelp);
        assert!(app.state().help_visible);
        assert!(render(&mut app, 80, 30).contains("Press any key to close"));

        assert_eq!(app.update(Message::Navigate(PageNavigation::Next)), None);
        assert!(!app.state().help_visible);
        assert_eq!(app.fetcher.requested_pages(), vec![1]);

        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn scrolling_is_clamped_to_content() {
        let mut app = app(ThreadFetcher::new(1), options(true, true, 20));
        drive(&mut app, Message::ShowComments).await;
        render(&mut app, 80, 20);

        for _ in 0..500 {
            app.update(Message::ScrollDown);
        }
        let max = app.state().scroll;
        assert!(max > 0);
        app.update(Message::PageDown);
        assert_eq!(app.state().scroll, max);

        app.update(Message::PageUp);
        assert!(app.state().scroll < max);
        for _ in 0..500 {
            app.update(Message::ScrollUp);
        }
        assert_eq!(app.state().scroll, 0);
    }

    #[tokio::test]
    async fn new_page_resets_scroll() {
        let mut app = app(ThreadFetcher::new(2), options(true, true, 20));
        drive(&mut app, Message::ShowComments).await;
        render(&mut app, 80, 20);
        app.update(Message::PageDown);
        assert!(app.state().scroll > 0);

        drive(&mut app, Message::Navigate(PageNavigation::Next)).await;
        assert_eq!(app.state().scroll, 0);
    }

    #[test]
    fn view_shows_too_small_message() {
        let mut app = app(ThreadFetcher::new(1), options(true, true, 10));

        let content = render(&mut app, 80, 8);
        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));

        let content = render(&mut app, 30, 24);
        assert!(content.contains("Terminal too small"));
    }

    #[test]
    fn snapshot_terminal_too_small() {
        let mut app = app(ThreadFetcher::new(1), options(true, true, 10));
        insta::assert_snapshot!("terminal_too_small", render(&mut app, 39, 2));
    }

    #[test]
    fn view_hides_header_in_compact_mode() {
        let mut app = app(ThreadFetcher::new(1), options(true, true, 10));

        let content = render(&mut app, 80, 11);
        assert!(!app.header_visible);
        assert!(content.contains("Show comments"));

        let content = render(&mut app, 80, 15);
        assert!(app.header_visible);
        assert!(content.contains("ghcomments"));
    }
}
