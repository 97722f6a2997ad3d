#![allow(dead_code)]

use std::net::SocketAddr;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Variables that change what the landing page renders
const PAGE_ENV: &[&str] = &[
    "APP_ENV",
    "NODE_ENV",
    "VERCEL",
    "VERCEL_AUTOMATION_BYPASS_SECRET",
    "GREETINGS",
    "PORT",
];

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    /// Spawn the server binary with a clean page environment plus `vars`
    pub fn spawn_with(vars: &[(&str, &str)]) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_checkly-starter"));
        for name in PAGE_ENV {
            cmd.env_remove(name);
        }
        cmd.env("STARTER_PORT", port.to_string())
            .envs(vars.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    pub async fn start_with(vars: &[(&str, &str)]) -> Result<Self> {
        let server = Self::spawn_with(vars)?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Server with the default development configuration, killed when dropped
pub async fn ensure_server() -> Result<TestServer> {
    TestServer::start_with(&[]).await
}

/// Serve `router` in-process on an ephemeral port
pub async fn spawn_mock(router: axum::Router) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}

/// An address nothing is listening on
pub fn closed_addr() -> Result<SocketAddr> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(SocketAddr::from(([127, 0, 0, 1], port)))
}
