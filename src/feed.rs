//! Feed pagination over the per-community post indexes.
//!
//! The storage side only orders within a community; merging communities,
//! applying the cursor and dropping blocked authors all happen here, in
//! plain functions, so the paging rules are testable without a backend.

use std::collections::HashSet;

use crate::model::Post;

/// Posts per feed page.
pub const FEED_PAGE_SIZE: usize = 20;

/// The multi-value community filter is capped at 10 entries; members of
/// more communities see posts from the first 10 only. Documented behavior,
/// preserved from the original deployment.
pub const FEED_COMMUNITY_FILTER_LIMIT: usize = 10;

/// Opaque position marker: the last index row of the previous page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCursor {
    pub(crate) created_at_ms: i64,
    pub(crate) post_id: String,
}

/// One page of the home feed.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    /// Marker for the next page; `None` when this page was empty.
    pub cursor: Option<FeedCursor>,
    /// True iff the page filled completely (pre-filtering).
    pub has_more: bool,
}

impl FeedPage {
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            cursor: None,
            has_more: false,
        }
    }
}

/// Applies the community-filter cap, logging when ids are dropped.
pub(crate) fn effective_communities(ids: &[String]) -> &[String] {
    if ids.len() > FEED_COMMUNITY_FILTER_LIMIT {
        log::debug!(
            "feed query truncated to the first {FEED_COMMUNITY_FILTER_LIMIT} of {} communities",
            ids.len()
        );
        &ids[..FEED_COMMUNITY_FILTER_LIMIT]
    } else {
        ids
    }
}

/// True when `(ms, id)` sorts strictly after the cursor in feed order
/// (newest first, id descending on equal stamps).
fn after_cursor(ms: i64, id: &str, cursor: &FeedCursor) -> bool {
    ms < cursor.created_at_ms || (ms == cursor.created_at_ms && *id < *cursor.post_id)
}

/// Merges per-community index rows into one page.
///
/// `rows` are `(post id, createdAt ms)` candidates, at most a page's worth
/// per community, already bounded by the cursor on the storage side (the
/// bound is inclusive; exact cursor ties are re-filtered here).
pub(crate) fn select_window(
    rows: Vec<(String, i64)>,
    cursor: Option<&FeedCursor>,
    page_size: usize,
) -> (Vec<(String, i64)>, bool) {
    let mut candidates: Vec<(String, i64)> = match cursor {
        Some(c) => rows.into_iter().filter(|(id, ms)| after_cursor(*ms, id, c)).collect(),
        None => rows,
    };
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    candidates.truncate(page_size);
    let has_more = candidates.len() == page_size;
    (candidates, has_more)
}

/// Cursor pointing at the last selected row.
pub(crate) fn cursor_from_window(window: &[(String, i64)]) -> Option<FeedCursor> {
    window.last().map(|(id, ms)| FeedCursor {
        created_at_ms: *ms,
        post_id: id.clone(),
    })
}

/// Blocked-author filtering is not part of the storage query and must run
/// after every page fetch, including load-more fetches.
pub fn without_blocked(posts: Vec<Post>, blocked: &HashSet<String>) -> Vec<Post> {
    if blocked.is_empty() {
        return posts;
    }
    posts.into_iter().filter(|post| !blocked.contains(&post.author_id)).collect()
}
