mod common;

use anyhow::Result;
use serde_json::{Value, json};

#[tokio::test]
async fn stub_routes_smoke() -> Result<()> {
    let guard = common::spawn_stub().await?;
    let root = guard.base_url.trim_end_matches("/api").to_string();
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/healthz", root)).send().await?;
    assert!(resp.status().is_success());

    let resp = client
        .get(format!("{}/restaurants", guard.base_url))
        .send()
        .await?;
    assert!(resp.status().is_success());
    let body: Value = resp.json().await?;
    let items = body.as_array().expect("bare array");
    assert!(!items.is_empty());
    assert!(items[0].get("_id").is_some());

    let resp = client
        .get(format!("{}/recipes", guard.base_url))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    assert!(body["recipes"].as_array().is_some_and(|r| !r.is_empty()));

    let resp = client.get(format!("{}/nope", guard.base_url)).send().await?;
    assert_eq!(resp.status().as_u16(), 404);
    Ok(())
}

#[tokio::test]
async fn stub_create_post_round_trips() -> Result<()> {
    let guard = common::spawn_stub().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/community", guard.base_url))
        .json(&json!({"text": "tip", "tag": "Dessert", "author": "You"}))
        .send()
        .await?;
    assert!(resp.status().is_success());
    let created: Value = resp.json().await?;
    assert_eq!(created["_id"], "srv-1");
    assert_eq!(created["tag"], "Dessert");
    assert!(created["createdAt"].as_str().is_some());

    let resp = client
        .get(format!("{}/community", guard.base_url))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    let posts = body["posts"].as_array().expect("posts array");
    assert_eq!(posts[0]["_id"], "srv-1");
    Ok(())
}
