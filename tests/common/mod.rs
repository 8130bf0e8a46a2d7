#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::Router;

/// Running `bites-stub` process; killed on drop.
pub struct StubGuard {
    /// Base URL including the `/api` prefix, ready for `ApiConfig::fixed`.
    pub base_url: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for StubGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn spawn_stub() -> Result<StubGuard> {
    let data_dir = tempfile::tempdir().context("create stub tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_bites-stub"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn bites-stub")?;

    let root = read_addr_file(&addr_file).await?;
    wait_for_healthz(&root).await?;

    Ok(StubGuard {
        base_url: format!("{}/api", root),
        _data_dir: data_dir,
        child,
    })
}

async fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }
        if let Ok(contents) = std::fs::read_to_string(addr_file) {
            let trimmed = contents.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

async fn wait_for_healthz(root: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("stub never became healthy at {}", root);
        }
        if let Ok(resp) = client.get(format!("{}/healthz", root)).send().await
            && resp.status().is_success()
        {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Serve an in-process router on an ephemeral port for failure injection.
/// Routes are mounted at the root; the returned base URL has no `/api`
/// prefix, so point `ApiConfig::fixed` straight at it.
pub async fn serve(router: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind mock listener")?;
    let addr = listener.local_addr().context("mock local addr")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}
