//! Background worker bridging the synchronous event loop and the async
//! remote client. Jobs go in over a channel; outcomes come back as events
//! polled each frame. Load events carry the requesting epoch so the owning
//! view can discard results that arrive after it moved on.

use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::debug;

use crate::chat::Outbound;
use crate::config::ApiConfig;
use crate::model::{Post, Recipe, Restaurant};
use crate::remote::{ApiError, ChatReply, PostDraft, RemoteClient};

pub(super) enum Job {
    LoadRestaurants { epoch: u64 },
    LoadPosts { epoch: u64 },
    LoadRecipes { epoch: u64 },
    SubmitPost { draft: PostDraft },
    SendChat { outbound: Outbound },
}

pub(super) enum BackendEvent {
    Restaurants {
        epoch: u64,
        outcome: Result<Vec<Restaurant>, ApiError>,
    },
    Posts {
        epoch: u64,
        outcome: Result<Vec<Post>, ApiError>,
    },
    Recipes {
        epoch: u64,
        outcome: Result<Vec<Recipe>, ApiError>,
    },
    PostCreated {
        outcome: Result<Post, ApiError>,
    },
    ChatDone {
        outcome: Result<ChatReply, ApiError>,
    },
}

pub(super) struct BackendHandle {
    pub(super) job_tx: Sender<Job>,
    pub(super) event_rx: Receiver<BackendEvent>,
}

/// Spawn the worker thread hosting the tokio runtime. The worker exits when
/// the handle (and with it the job sender) is dropped.
pub(super) fn spawn(api: ApiConfig) -> Result<BackendHandle> {
    let client = RemoteClient::new(&api)?;
    let (job_tx, job_rx) = unbounded::<Job>();
    let (event_tx, event_rx) = unbounded::<BackendEvent>();

    thread::Builder::new()
        .name("bites-backend".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Runtime::new().context("build tokio runtime") {
                Ok(rt) => rt,
                Err(err) => {
                    debug!(error = %err, "backend worker failed to start");
                    return;
                }
            };
            while let Ok(job) = job_rx.recv() {
                let client = client.clone();
                let tx = event_tx.clone();
                runtime.spawn(async move {
                    // Receiver may be gone during shutdown; nothing to do then.
                    let _ = tx.send(run_job(&client, job).await);
                });
            }
            runtime.shutdown_background();
        })
        .context("spawn backend worker")?;

    Ok(BackendHandle { job_tx, event_rx })
}

async fn run_job(client: &RemoteClient, job: Job) -> BackendEvent {
    match job {
        Job::LoadRestaurants { epoch } => BackendEvent::Restaurants {
            epoch,
            outcome: client.restaurants().await,
        },
        Job::LoadPosts { epoch } => BackendEvent::Posts {
            epoch,
            outcome: client.community_posts().await,
        },
        Job::LoadRecipes { epoch } => BackendEvent::Recipes {
            epoch,
            outcome: client.recipes().await,
        },
        Job::SubmitPost { draft } => BackendEvent::PostCreated {
            outcome: client.create_post(&draft).await,
        },
        Job::SendChat { outbound } => BackendEvent::ChatDone {
            outcome: client.chat(&outbound.message, &outbound.history).await,
        },
    }
}
