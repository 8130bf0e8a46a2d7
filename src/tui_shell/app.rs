use anyhow::Result;

use crate::chat::ChatSession;
use crate::config::ApiConfig;
use crate::eats::EatsView;
use crate::fallback;
use crate::feed::FeedView;
use crate::model::Recipe;
use crate::sync::{FallbackPolicy, Loaded};

use super::backend::{self, BackendEvent, BackendHandle, Job};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Tab {
    Home,
    Eats,
    Recipes,
    Community,
}

impl Tab {
    pub(super) const ALL: [Tab; 4] = [Tab::Home, Tab::Eats, Tab::Recipes, Tab::Community];

    pub(super) fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Eats => "Cheap Eats",
            Tab::Recipes => "Recipes",
            Tab::Community => "Community",
        }
    }

    pub(super) fn next(self) -> Tab {
        let i = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(i + 1) % Tab::ALL.len()]
    }

    pub(super) fn prev(self) -> Tab {
        let i = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(i + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Which text buffer, if any, receives typed characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Focus {
    None,
    Search,
    Chat,
    Composer,
}

/// All view state, owned exclusively by the event-loop thread. Each view's
/// collection is created here at startup (view mount), mutated in place by
/// optimistic operations, and dropped with the app.
pub(super) struct App {
    backend: BackendHandle,

    pub(super) tab: Tab,
    pub(super) focus: Focus,

    pub(super) eats: EatsView,
    pub(super) feed: FeedView,
    pub(super) recipes: Loaded<Recipe>,
    pub(super) chat: ChatSession,

    pub(super) eats_selected: usize,
    pub(super) feed_selected: usize,

    pub(super) post_in_flight: bool,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(api: ApiConfig) -> Result<Self> {
        let backend = backend::spawn(api)?;
        let mut app = Self {
            backend,
            tab: Tab::Home,
            focus: Focus::None,
            eats: EatsView::new(),
            feed: FeedView::new(),
            recipes: Loaded::new("recipes", FallbackPolicy::OnFailureOrEmpty),
            chat: ChatSession::new(),
            eats_selected: 0,
            feed_selected: 0,
            post_in_flight: false,
            quit: false,
        };
        // One load per collection at mount; reloads only on explicit request.
        app.load_restaurants();
        app.load_posts();
        app.load_recipes();
        Ok(app)
    }

    fn send_job(&self, job: Job) {
        // Worker gone means we are shutting down; drop the job.
        let _ = self.backend.job_tx.send(job);
    }

    pub(super) fn load_restaurants(&mut self) {
        let epoch = self.eats.list.begin_load();
        self.send_job(Job::LoadRestaurants { epoch });
    }

    pub(super) fn load_posts(&mut self) {
        let epoch = self.feed.posts.begin_load();
        self.send_job(Job::LoadPosts { epoch });
    }

    pub(super) fn load_recipes(&mut self) {
        let epoch = self.recipes.begin_load();
        self.send_job(Job::LoadRecipes { epoch });
    }

    /// Submit the composer draft. Gated on one in-flight submission; the
    /// draft buffer survives until the server confirms.
    pub(super) fn submit_post(&mut self) {
        if self.post_in_flight {
            return;
        }
        if let Some(draft) = self.feed.begin_submit() {
            self.post_in_flight = true;
            self.send_job(Job::SubmitPost { draft });
        }
    }

    /// Send the chat input; the session's single-flight gate makes this a
    /// no-op while a send is outstanding.
    pub(super) fn send_chat(&mut self) {
        if let Some(outbound) = self.chat.begin_submit() {
            self.send_job(Job::SendChat { outbound });
        }
    }

    pub(super) fn upvote_selected(&mut self) {
        let id = match self.feed.posts.items().get(self.feed_selected) {
            Some(post) => post.id.clone(),
            None => return,
        };
        self.feed.upvote(&id);
    }

    /// Apply everything the worker delivered since last frame.
    pub(super) fn drain_events(&mut self) {
        while let Ok(event) = self.backend.event_rx.try_recv() {
            self.apply(event);
        }
        self.clamp_selections();
    }

    fn apply(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Restaurants { epoch, outcome } => {
                self.eats
                    .list
                    .resolve(epoch, outcome, fallback::sample_restaurants);
            }
            BackendEvent::Posts { epoch, outcome } => {
                self.feed.posts.resolve(epoch, outcome, fallback::sample_posts);
            }
            BackendEvent::Recipes { epoch, outcome } => {
                self.recipes.resolve(epoch, outcome, fallback::sample_recipes);
            }
            BackendEvent::PostCreated { outcome } => {
                self.post_in_flight = false;
                match outcome {
                    Ok(post) => self.feed.apply_submitted(post),
                    Err(err) => self.feed.submit_failed(&err),
                }
            }
            BackendEvent::ChatDone { outcome } => {
                self.chat.complete(outcome);
            }
        }
    }

    pub(super) fn move_selection(&mut self, delta: i64) {
        let (selected, len) = match self.tab {
            Tab::Eats => (&mut self.eats_selected, self.eats.visible().len()),
            Tab::Community => (&mut self.feed_selected, self.feed.posts.items().len()),
            _ => return,
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        let next = (*selected as i64 + delta).clamp(0, len as i64 - 1);
        *selected = next as usize;
    }

    fn clamp_selections(&mut self) {
        let eats_len = self.eats.visible().len();
        if self.eats_selected >= eats_len {
            self.eats_selected = eats_len.saturating_sub(1);
        }
        let feed_len = self.feed.posts.items().len();
        if self.feed_selected >= feed_len {
            self.feed_selected = feed_len.saturating_sub(1);
        }
    }
}
