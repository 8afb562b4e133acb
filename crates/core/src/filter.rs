//! In-memory post filtering by category, tags, and free-text search.
//!
//! [`PostFilter`] is the pure predicate. [`PostListView`] is the list
//! view-model built on top of it: it owns a loaded page of posts plus the
//! current selections and re-derives the visible list after every change.
//! There is no index; each recomputation is linear in the number of posts.

use tokio::time::Instant;

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::types::DbId;

/// The fields the filter needs from a post.
pub trait FilterablePost {
    fn post_id(&self) -> DbId;
    fn category_id(&self) -> Option<DbId>;
    fn has_tag(&self, tag_id: DbId) -> bool;
    fn title(&self) -> &str;
    fn content(&self) -> &str;
}

/// Filter selections. The default value matches every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Only posts in this category, when set.
    pub category_id: Option<DbId>,
    /// Posts must carry every one of these tags.
    pub tag_ids: Vec<DbId>,
    /// Case-insensitive substring of title or content. Empty matches all.
    pub query: String,
}

impl PostFilter {
    /// `true` when no selection is active.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.tag_ids.is_empty() && self.query.is_empty()
    }

    pub fn matches<P: FilterablePost>(&self, post: &P) -> bool {
        let matches_category = match self.category_id {
            None => true,
            Some(id) => post.category_id() == Some(id),
        };
        let matches_tags = self.tag_ids.iter().all(|&tag_id| post.has_tag(tag_id));

        matches_category && matches_tags && self.matches_query(post)
    }

    /// Keep the posts that match, preserving input order.
    pub fn apply<'a, P: FilterablePost>(&self, posts: &'a [P]) -> Vec<&'a P> {
        posts.iter().filter(|post| self.matches(*post)).collect()
    }

    fn matches_query<P: FilterablePost>(&self, post: &P) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        post.title().to_lowercase().contains(&needle)
            || post.content().to_lowercase().contains(&needle)
    }
}

/// View-model for a post list page.
///
/// Owned by a single viewer and discarded with it. Local edits such as
/// [`PostListView::remove_post`] are a best-effort cache of what the server
/// holds, never a source of truth.
#[derive(Debug, Clone)]
pub struct PostListView<P> {
    posts: Vec<P>,
    category_id: Option<DbId>,
    tag_ids: Vec<DbId>,
    query: Debouncer<String>,
    visible: Vec<usize>,
}

impl<P: FilterablePost> PostListView<P> {
    pub fn new(posts: Vec<P>) -> Self {
        let mut view = Self {
            posts,
            category_id: None,
            tag_ids: Vec::new(),
            query: Debouncer::new(String::new(), SEARCH_DEBOUNCE),
            visible: Vec::new(),
        };
        view.refresh();
        view
    }

    /// Swap in a freshly loaded list, keeping the selections.
    pub fn replace_posts(&mut self, posts: Vec<P>) {
        self.posts = posts;
        self.refresh();
    }

    /// Select a category, or `None` for all categories.
    pub fn select_category(&mut self, category_id: Option<DbId>) {
        self.category_id = category_id;
        self.refresh();
    }

    /// Add the tag to the selection, or remove it if already selected.
    pub fn toggle_tag(&mut self, tag_id: DbId) {
        if let Some(pos) = self.tag_ids.iter().position(|&id| id == tag_id) {
            self.tag_ids.remove(pos);
        } else {
            self.tag_ids.push(tag_id);
        }
        self.refresh();
    }

    /// Record a keystroke in the search box. Takes effect on a later
    /// [`PostListView::tick`] once the input has been quiet long enough.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query.push(query.into(), now);
    }

    /// Advance the debounce clock. Returns `true` if the visible list changed
    /// because the search query settled.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.query.poll(now) {
            self.refresh();
            return true;
        }
        false
    }

    /// Optimistically drop a post after a successful delete call.
    pub fn remove_post(&mut self, post_id: DbId) -> Option<P> {
        let pos = self.posts.iter().position(|p| p.post_id() == post_id)?;
        let removed = self.posts.remove(pos);
        self.refresh();
        Some(removed)
    }

    /// The selections currently in effect (settled query only).
    pub fn filter(&self) -> PostFilter {
        PostFilter {
            category_id: self.category_id,
            tag_ids: self.tag_ids.clone(),
            query: self.query.settled().clone(),
        }
    }

    pub fn selected_tags(&self) -> &[DbId] {
        &self.tag_ids
    }

    pub fn visible(&self) -> Vec<&P> {
        self.visible.iter().map(|&i| &self.posts[i]).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn refresh(&mut self) {
        let filter = self.filter();
        self.visible = self
            .posts
            .iter()
            .enumerate()
            .filter(|(_, post)| filter.matches(*post))
            .map(|(i, _)| i)
            .collect();
    }
}
