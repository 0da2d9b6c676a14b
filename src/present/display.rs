//! # Display Mirror
//!
//! Pushes the current game state to an external dashboard after every
//! change, so a second screen at the table can show the status bar and
//! tables without anyone typing there.
//!
//! ```text
//! POST <url>
//! { "name": "rusty-trains", "data": { "status": {..}, "holdings": {..}, .. } }
//! ```
//!
//! Pushes go through a [`DisplayQueue`] so they arrive in order. Failures
//! are logged and never reach the operator's prompt.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::status::StatusBar;
use super::tables::{self, Table};
use crate::core::event_log::Session;
use crate::core::ledger::Ledger;

/// Everything a dashboard needs to draw one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayContent {
    pub status: StatusBar,
    pub holdings: Table,
    pub values: Table,
    pub companies: Table,
}

impl DisplayContent {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            status: StatusBar::from_ledger(ledger),
            holdings: tables::holdings(ledger),
            values: tables::values(ledger),
            companies: tables::companies(ledger),
        }
    }
}

#[derive(Serialize, Debug)]
struct DisplayPost<'a> {
    name: &'a str,
    data: &'a DisplayContent,
}

#[derive(Debug)]
pub enum DisplayError {
    /// Connection refused, DNS, timeout.
    Network(String),
    /// The dashboard answered with a non-2xx status.
    Rejected { status: u16, message: String },
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Network(msg) => write!(f, "network error: {msg}"),
            DisplayError::Rejected { status, message } => {
                write!(f, "display rejected update (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for DisplayError {}

#[async_trait]
pub trait DisplayMirror: Send + Sync {
    async fn push(&self, name: &str, content: &DisplayContent) -> Result<(), DisplayError>;
}

/// Posts JSON to a dashboard URL with `reqwest`.
pub struct HttpDisplay {
    url: String,
    client: reqwest::Client,
}

impl HttpDisplay {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DisplayMirror for HttpDisplay {
    async fn push(&self, name: &str, content: &DisplayContent) -> Result<(), DisplayError> {
        let response = self
            .client
            .post(&self.url)
            .json(&DisplayPost {
                name,
                data: content,
            })
            .send()
            .await
            .map_err(|e| DisplayError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Display push for {}: {}", name, status);
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(DisplayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

/// How long [`DisplayQueue::close`] waits for queued pushes before giving up.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// One background task that pushes snapshots in the order they were queued.
///
/// ```text
/// mirror_session ──▶ mpsc ──▶ worker ──▶ DisplayMirror::push (one at a time)
/// ```
///
/// `close` drops the sender and waits for the worker, so the last state
/// reaches the dashboard before the process exits.
pub struct DisplayQueue {
    sender: mpsc::UnboundedSender<(String, DisplayContent)>,
    worker: JoinHandle<()>,
}

impl DisplayQueue {
    /// Start the worker. Must be called inside a tokio runtime.
    pub fn start(mirror: Arc<dyn DisplayMirror>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<(String, DisplayContent)>();
        let worker = tokio::spawn(async move {
            while let Some((name, content)) = receiver.recv().await {
                if let Err(e) = mirror.push(&name, &content).await {
                    warn!("Display update for {} failed: {}", name, e);
                }
            }
            debug!("Display queue drained");
        });
        Self { sender, worker }
    }

    pub fn send(&self, name: &str, content: DisplayContent) {
        if self.sender.send((name.to_string(), content)).is_err() {
            warn!("Display worker stopped, dropping update for {}", name);
        }
    }

    /// Finish queued pushes, waiting at most a few seconds.
    pub async fn close(self) {
        drop(self.sender);
        match tokio::time::timeout(DRAIN_TIMEOUT, self.worker).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Display worker failed: {}", e),
            Err(_) => warn!("Display updates still pending after {:?}, giving up", DRAIN_TIMEOUT),
        }
    }
}

/// Queue the active game, if any. Called by the front-ends after `Effect::Refresh`.
pub fn mirror_session(queue: Option<&DisplayQueue>, session: Option<&Session>) {
    if let (Some(queue), Some(session)) = (queue, session) {
        queue.send(session.name(), DisplayContent::from_ledger(session.ledger()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ledger_from;

    #[test]
    fn test_post_body_shape() {
        let ledger = ledger_from(&["MIKKO cash 10"]);
        let content = DisplayContent::from_ledger(&ledger);
        let body = serde_json::to_value(DisplayPost {
            name: "rusty-trains",
            data: &content,
        })
        .unwrap();

        assert_eq!(body["name"], "rusty-trains");
        assert_eq!(body["data"]["status"]["bank"], "TOTAL $10");
        assert_eq!(body["data"]["holdings"]["header"][0], "Player");
        assert_eq!(body["data"]["holdings"]["rows"][0][1], "$10");
    }

    #[test]
    fn test_unreachable_display_is_a_network_error() {
        let display = HttpDisplay::new("http://127.0.0.1:9/display".to_string());
        let content = DisplayContent::from_ledger(&Ledger::default());
        let result = tokio_test::block_on(display.push("g", &content));
        assert!(matches!(result, Err(DisplayError::Network(_))));
    }

    /// Records the bank item of every push; the first push is slow.
    struct Recorder {
        seen: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DisplayMirror for Recorder {
        async fn push(&self, _name: &str, content: &DisplayContent) -> Result<(), DisplayError> {
            let first = self.seen.lock().map(|seen| seen.is_empty()).unwrap_or(false);
            if first {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(content.status.bank.clone());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_queue_keeps_order_and_drains_on_close() {
        let recorder = Arc::new(Recorder {
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let queue = DisplayQueue::start(recorder.clone());

        let older = Session::replay("g", vec!["MIKKO cash 10".to_string()], "$");
        let newer = Session::replay("g", vec!["MIKKO cash 20".to_string()], "$");
        mirror_session(Some(&queue), Some(&older));
        mirror_session(Some(&queue), Some(&newer));
        mirror_session(Some(&queue), None);
        queue.close().await;

        assert_eq!(*recorder.seen.lock().unwrap(), ["TOTAL $10", "TOTAL $20"]);
    }
}
