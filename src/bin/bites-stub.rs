//! Development backend serving the sample collections, so the client can be
//! exercised without the real campus service. Also spawned by the
//! integration tests (via `--addr 127.0.0.1:0` + `--addr-file`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;
use tracing::info;

use bites::fallback;
use bites::model::Post;

#[derive(Parser)]
#[command(name = "bites-stub")]
#[command(about = "Sample-data backend for the bites client", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5050")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,
}

struct StubState {
    posts: RwLock<Vec<Post>>,
    next_post_id: AtomicU64,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let state = Arc::new(StubState {
        posts: RwLock::new(fallback::sample_posts()),
        next_post_id: AtomicU64::new(1),
    });

    let api = Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/community", get(list_posts).post(create_post))
        .route("/recipes", get(list_recipes))
        .route("/chat/recipes", post(chat))
        .with_state(state);
    let app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .nest("/api", api);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    info!(addr = %local_addr, "bites-stub listening");
    eprintln!("bites-stub listening on {}", local_addr);
    if let Some(path) = args.addr_file.as_ref() {
        std::fs::write(path, format!("http://{}", local_addr))
            .with_context(|| format!("write addr file {}", path.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Bare array, Mongo-style `_id`, matching the live backend's shape.
async fn list_restaurants() -> Json<Value> {
    let items: Vec<Value> = fallback::sample_restaurants()
        .into_iter()
        .map(|r| {
            json!({
                "_id": r.id,
                "name": r.name,
                "rating": r.rating,
                "price_level": r.price_level,
                "distance_value": r.distance_value,
                "distance_text": r.distance_text,
                "duration_text": r.duration_text,
                "address": r.address,
            })
        })
        .collect();
    Json(Value::Array(items))
}

async fn list_posts(State(state): State<Arc<StubState>>) -> Json<Value> {
    let posts = state.posts.read().await;
    let items: Vec<Value> = posts.iter().map(post_json).collect();
    Json(json!({ "posts": items }))
}

#[derive(Deserialize)]
struct CreatePostRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    author: String,
}

async fn create_post(
    State(state): State<Arc<StubState>>,
    Json(req): Json<CreatePostRequest>,
) -> Json<Value> {
    let n = state.next_post_id.fetch_add(1, Ordering::Relaxed);
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    let post = Post {
        id: format!("srv-{}", n),
        text: req.text,
        votes: 0,
        tag: req.tag,
        author: req.author,
        created_at: Some(created_at),
        time: None,
    };
    let body = post_json(&post);
    state.posts.write().await.insert(0, post);
    Json(body)
}

async fn list_recipes() -> Json<Value> {
    let items: Vec<Value> = fallback::sample_recipes()
        .into_iter()
        .map(|r| json!({ "id": r.id, "title": r.title }))
        .collect();
    Json(json!({ "recipes": items }))
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    history: Vec<Value>,
}

async fn chat(Json(req): Json<ChatRequest>) -> Json<Value> {
    let turns = req.history.len();
    Json(json!({
        "reply": format!(
            "Toss {} in one pan with garlic and soy; rice on the side keeps it under $5.",
            if req.message.is_empty() { "whatever you have".to_string() } else { req.message }
        ),
        "tips": [
            "Frozen veggies are cheaper than fresh and cook faster",
            format!("You're {} messages into this session — save leftovers!", turns),
        ],
    }))
}

fn post_json(post: &Post) -> Value {
    json!({
        "_id": post.id,
        "text": post.text,
        "votes": post.votes,
        "tag": post.tag,
        "author": post.author,
        "createdAt": post.created_at,
        "time": post.time,
    })
}
