//! End-to-end tests of the fetch, parse and navigate cycle.
//!
//! A canned fetcher replays GitHub-shaped responses so the whole pipeline
//! runs without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use ghcomments_config::IssueUri;
use ghcomments_github::{CommentFetcher, Error, FetchedComments, Result, comments::decode_comments, load_page};
use ghcomments_protocol::{Message, PageNavigation, PageRequest, PaginationHeaders};
use ghcomments_tui::{App, Effect, WidgetOptions};

const PAGE_ONE: &str = r#"[
    {
        "id": 1,
        "html_url": "https://github.com/octocat/hello-world/issues/7#issuecomment-1",
        "body": "First!",
        "body_html": "<p>First!</p>",
        "user": {"login": "octocat", "avatar_url": "https://avatars.githubusercontent.com/u/583231"},
        "author_association": "OWNER",
        "created_at": "2024-05-01T10:00:00Z"
    },
    {
        "id": 2,
        "html_url": "https://github.com/octocat/hello-world/issues/7#issuecomment-2",
        "body_html": "<p>Only <em>html</em> here</p>",
        "user": {"login": "hubot", "avatar_url": "https://avatars.githubusercontent.com/u/480938"},
        "author_association": "CONTRIBUTOR",
        "created_at": "2024-05-02T11:30:00Z"
    }
]"#;

const PAGE_TWO: &str = r#"[
    {
        "id": 3,
        "html_url": "https://github.com/octocat/hello-world/issues/7#issuecomment-3",
        "body": "Last word",
        "body_html": "<p>Last word</p>",
        "user": {"login": "monalisa", "avatar_url": "https://avatars.githubusercontent.com/u/2"},
        "author_association": "NONE",
        "created_at": "2024-05-03T09:15:00Z"
    }
]"#;

const LINK_PAGE_ONE: &str = r#"<https://api.github.com/repositories/1296269/issues/7/comments?page=2&per_page=2>; rel="next", <https://api.github.com/repositories/1296269/issues/7/comments?page=2&per_page=2>; rel="last""#;

const LINK_PAGE_TWO: &str = r#"<https://api.github.com/repositories/1296269/issues/7/comments?page=1&per_page=2>; rel="previous", <https://api.github.com/repositories/1296269/issues/7/comments?page=1&per_page=2>; rel="first""#;

/// Replays one canned body and `Link` header per page.
struct Replay {
    pages: HashMap<u32, (&'static str, Option<&'static str>)>,
    seen: Mutex<Vec<PageRequest>>,
}

impl Replay {
    fn two_pages() -> Self {
        Self {
            pages: HashMap::from([
                (1, (PAGE_ONE, Some(LINK_PAGE_ONE))),
                (2, (PAGE_TWO, Some(LINK_PAGE_TWO))),
            ]),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl CommentFetcher for Replay {
    async fn fetch_comments(&self, _issue: &IssueUri, request: PageRequest) -> Result<FetchedComments> {
        self.seen.lock().unwrap().push(request);
        let (body, link) = self.pages.get(&request.page).ok_or(Error::Status {
            status: 404,
            message: "Not Found".to_string(),
        })?;
        Ok(FetchedComments {
            comments: decode_comments(body)?,
            link: link.map(str::to_string),
        })
    }
}

fn issue() -> IssueUri {
    IssueUri::parse("https://github.com/octocat/hello-world/issues/7").unwrap()
}

#[tokio::test]
async fn first_page_maps_comments_and_pagination() {
    let fetcher = Replay::two_pages();

    let page = load_page(&fetcher, &issue(), PageRequest::first(2)).await.unwrap();

    assert_eq!(
        page.pagination,
        PaginationHeaders {
            next: Some(2),
            previous: None,
            first: None,
            last: Some(2),
        }
    );
    assert_eq!(page.comments.len(), 2);

    let owner = &page.comments[0];
    assert_eq!(owner.user.username, "octocat");
    assert!(owner.user.is_repository_owner);
    assert_eq!(owner.display_text(), "First!");

    let contributor = &page.comments[1];
    assert!(!contributor.user.is_repository_owner);
    assert_eq!(contributor.markdown, None);
    assert_eq!(contributor.display_text(), "Only html here");
}

#[tokio::test]
async fn last_page_advertises_previous_and_first() {
    let fetcher = Replay::two_pages();

    let page = load_page(&fetcher, &issue(), PageRequest::new(2, 2)).await.unwrap();

    assert_eq!(page.pagination.previous, Some(1));
    assert_eq!(page.pagination.first, Some(1));
    assert!(!page.pagination.allows(PageNavigation::Next));
    assert!(!page.pagination.allows(PageNavigation::Last));
    assert_eq!(page.last_page(), Some(2));
}

#[tokio::test]
async fn missing_page_surfaces_status_error() {
    let fetcher = Replay::two_pages();

    let err = load_page(&fetcher, &issue(), PageRequest::new(9, 2)).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));
}

#[tokio::test]
async fn widget_pages_through_the_thread() {
    let fetcher = Replay::two_pages();
    let options = WidgetOptions {
        use_show_comments_button: false,
        allow_refreshing_comments: true,
        comments_per_page: 2,
    };
    let mut app = App::new(&fetcher, issue(), options);

    let start = app.start().expect("loads without a button");
    app.perform(start).await;
    assert_eq!(app.state().current_page(), Some(1));

    // Page 1 has no previous page.
    assert_eq!(app.update(Message::Navigate(PageNavigation::Previous)), None);

    let next = app.update(Message::Navigate(PageNavigation::Next));
    assert_eq!(next, Some(Effect::Fetch(PageRequest::new(2, 2))));
    app.perform(next.unwrap()).await;
    assert_eq!(app.state().current_page(), Some(2));
    assert_eq!(app.state().page.as_ref().unwrap().comments[0].user.username, "monalisa");

    let first = app.update(Message::Navigate(PageNavigation::First)).unwrap();
    app.perform(first).await;
    assert_eq!(app.state().current_page(), Some(1));

    let pages: Vec<u32> = fetcher.seen.lock().unwrap().iter().map(|r| r.page).collect();
    assert_eq!(pages, vec![1, 2, 1]);
}
