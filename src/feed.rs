//! Community feed state: remote-loaded posts, optimistic submission, and
//! local-only upvotes.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

use crate::model::Post;
use crate::remote::{ApiError, PostDraft};
use crate::sync::{FallbackPolicy, Loaded};

pub const POST_TAGS: [&str; 5] = [
    "Near Campus",
    "Happy Hour",
    "Vegetarian",
    "Dessert",
    "Grocery Hack",
];

/// Fixed author placeholder for locally composed posts.
pub const POST_AUTHOR: &str = "You";

pub struct FeedView {
    pub posts: Loaded<Post>,
    draft: String,
    tag_index: usize,
    last_submit_error: Option<String>,
}

impl FeedView {
    pub fn new() -> Self {
        Self {
            posts: Loaded::new("community", FallbackPolicy::OnFailureOrEmpty),
            draft: String::new(),
            tag_index: 0,
            last_submit_error: None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn tag(&self) -> &str {
        POST_TAGS[self.tag_index]
    }

    pub fn cycle_tag(&mut self) {
        self.tag_index = (self.tag_index + 1) % POST_TAGS.len();
    }

    pub fn select_tag(&mut self, tag: &str) -> bool {
        match POST_TAGS.iter().position(|t| *t == tag) {
            Some(i) => {
                self.tag_index = i;
                true
            }
            None => false,
        }
    }

    pub fn last_submit_error(&self) -> Option<&str> {
        self.last_submit_error.as_deref()
    }

    /// Validate the draft for submission. Whitespace-only drafts are silent
    /// no-ops. The draft buffer is deliberately not cleared here: it survives
    /// until the server confirms, so a failed send never loses the text.
    pub fn begin_submit(&mut self) -> Option<PostDraft> {
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        self.last_submit_error = None;
        Some(PostDraft {
            text: text.to_string(),
            tag: self.tag().to_string(),
            author: POST_AUTHOR.to_string(),
        })
    }

    /// Prepend the server-confirmed record and clear the draft.
    pub fn apply_submitted(&mut self, post: Post) {
        self.posts.items_mut().insert(0, post);
        self.draft.clear();
        self.last_submit_error = None;
    }

    /// Drop the mutation, keep the draft, surface the cause.
    pub fn submit_failed(&mut self, err: &ApiError) {
        let cause = err.cause();
        warn!(cause = %cause, "community post submit failed");
        self.last_submit_error = Some(cause);
    }

    /// Local-only vote bump; not synchronized to the backend, so it does not
    /// survive a reload. Unknown ids are a no-op.
    pub fn upvote(&mut self, id: &str) -> bool {
        match self.posts.items_mut().iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.votes += 1;
                true
            }
            None => false,
        }
    }
}

impl Default for FeedView {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative label for a post, preferring the server timestamp over the
/// literal label fallback records carry.
pub fn time_label(post: &Post, now: OffsetDateTime) -> String {
    if let Some(created) = post.created_at.as_deref()
        && let Ok(ts) = OffsetDateTime::parse(created, &Rfc3339)
    {
        return relative(now - ts);
    }
    post.time.clone().unwrap_or_default()
}

fn relative(elapsed: time::Duration) -> String {
    let minutes = elapsed.whole_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}
