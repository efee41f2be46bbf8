// src/backend/mod.rs
//! # Backend Client
//!
//! Blocking HTTP client for the scene-generation backend, plus a small
//! service wrapper that runs each call on a worker thread and returns results
//! over a channel so the render loop never blocks on the network.
//!
//! Failures are surfaced to the UI as text; there is no retry.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Asset metadata returned by `POST /generate_scene`.
///
/// Only `fileURL` is required; the rest is catalog metadata the backend may
/// or may not include.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedAsset {
    #[serde(rename = "fileURL")]
    pub file_url: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// One placement in the initial scene layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenePlacement {
    #[serde(rename = "fileURL")]
    pub file_url: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response of `GET /initialize_scene`.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneLayout {
    pub objects: Vec<ScenePlacement>,
}

/// Response of `POST /gemini_call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for BackendError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => BackendError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            other => BackendError::Transport(other.to_string()),
        }
    }
}

/// Blocking client for the scene backend.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    agent: ureq::Agent,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self { base_url, agent }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asks the backend for an asset matching the prompt.
    pub fn generate_scene(&self, prompt: &str) -> Result<GeneratedAsset, BackendError> {
        let response = self
            .agent
            .post(&format!("{}/generate_scene", self.base_url))
            .send_json(serde_json::json!({ "prompt": prompt }))?;
        Ok(response.into_json()?)
    }

    /// Fetches the initial room layout.
    pub fn initialize_scene(&self) -> Result<SceneLayout, BackendError> {
        let response = self
            .agent
            .get(&format!("{}/initialize_scene", self.base_url))
            .call()?;
        Ok(response.into_json()?)
    }

    /// Sends a chat prompt and returns the assistant's reply.
    pub fn chat(&self, prompt: &str) -> Result<ChatReply, BackendError> {
        let response = self
            .agent
            .post(&format!("{}/gemini_call", self.base_url))
            .send_json(serde_json::json!({ "prompt": prompt }))?;
        Ok(response.into_json()?)
    }

    /// Resolves a backend-relative `fileURL` against the base URL.
    pub fn resolve_url(&self, file_url: &str) -> String {
        if file_url.starts_with("http://") || file_url.starts_with("https://") {
            return file_url.to_string();
        }
        if let Some(stripped) = file_url.strip_prefix('/') {
            format!("{}/{}", self.base_url, stripped)
        } else {
            format!("{}/{}", self.base_url, file_url)
        }
    }
}

/// Completed backend call, delivered via [`BackendService::poll`].
#[derive(Debug)]
pub enum BackendEvent {
    LayoutReady(SceneLayout),
    LayoutFailed(String),
    GenerateReady { seq: u64, asset: GeneratedAsset },
    GenerateFailed { seq: u64, error: String },
    ChatReady(String),
    ChatFailed(String),
}

/// Runs backend calls on worker threads, one thread per request.
///
/// Generation requests carry a sequence number; `poll` drops results from
/// superseded requests so rapid repeated clicks resolve to the newest prompt.
pub struct BackendService {
    client: BackendClient,
    sender: Sender<BackendEvent>,
    receiver: Receiver<BackendEvent>,
    issued_generate: u64,
}

impl BackendService {
    pub fn new(client: BackendClient) -> Self {
        let (sender, receiver) = channel();
        Self {
            client,
            sender,
            receiver,
            issued_generate: 0,
        }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn request_layout(&self) {
        let client = self.client.clone();
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let event = match client.initialize_scene() {
                Ok(layout) => BackendEvent::LayoutReady(layout),
                Err(err) => {
                    log::error!("initialize_scene failed: {}", err);
                    BackendEvent::LayoutFailed(err.to_string())
                }
            };
            let _ = sender.send(event);
        });
    }

    /// Issues a generation request; returns its sequence number.
    pub fn request_generate(&mut self, prompt: String) -> u64 {
        self.issued_generate += 1;
        let seq = self.issued_generate;
        let client = self.client.clone();
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let event = match client.generate_scene(&prompt) {
                Ok(asset) => BackendEvent::GenerateReady { seq, asset },
                Err(err) => {
                    log::error!("generate_scene failed: {}", err);
                    BackendEvent::GenerateFailed {
                        seq,
                        error: err.to_string(),
                    }
                }
            };
            let _ = sender.send(event);
        });
        seq
    }

    pub fn request_chat(&self, prompt: String) {
        let client = self.client.clone();
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let event = match client.chat(&prompt) {
                Ok(reply) => BackendEvent::ChatReady(reply.response),
                Err(err) => {
                    log::error!("chat call failed: {}", err);
                    BackendEvent::ChatFailed(err.to_string())
                }
            };
            let _ = sender.send(event);
        });
    }

    /// Drains completed calls, dropping superseded generation results.
    pub fn poll(&self) -> Vec<BackendEvent> {
        self.receiver
            .try_iter()
            .filter(|event| match event {
                BackendEvent::GenerateReady { seq, .. }
                | BackendEvent::GenerateFailed { seq, .. } => {
                    if *seq != self.issued_generate {
                        log::debug!("discarding superseded generation result #{seq}");
                        false
                    } else {
                        true
                    }
                }
                _ => true,
            })
            .collect()
    }
}
