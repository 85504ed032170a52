use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use companies_api::app::{app, AppState};
use companies_api::config::AppConfig;
use companies_api::database::{MemoryCompanyStore, MemoryUserStore};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret:pass";

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Real router on a free port, backed by in-memory stores
    pub async fn spawn() -> Result<Self> {
        let users = MemoryUserStore::new().with_user(USERNAME, PASSWORD);
        let state = AppState::new(Arc::new(MemoryCompanyStore::new()), Arc::new(users));
        Self::spawn_with(state, &AppConfig::from_lookup(|_| None)).await
    }

    /// Real router on a free port with caller-supplied stores and config
    pub async fn spawn_with(state: AppState, config: &AppConfig) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let router = app(state, config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server");
        });

        let server = Self { base_url, handle };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
