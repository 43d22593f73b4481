//! Asset loading outcome and retry bookkeeping for the companion object.
//!
//! Fetching bytes is the front-end's job (HTTP on the web, the filesystem on
//! native). The front-end reports each attempt back as an [`AssetEvent`] and
//! the [`AssetSlot`] decides whether to retry, accept the mesh, or fall back
//! to a placeholder so dependent scene setup is never stranded.

use crate::geometry::MeshData;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("request for {path} failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("request for {path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("malformed mesh: {message}")]
    Parse { message: String },
    #[error("asset contains no triangles")]
    Empty,
}

/// Completion event for one load attempt.
#[derive(Debug, Clone)]
pub enum AssetEvent {
    Loaded(MeshData),
    Failed(LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    /// An attempt is in flight. `attempt` counts from 1.
    Pending { attempt: u32 },
    Ready,
    /// Retries exhausted; a placeholder mesh was installed instead.
    Placeholder,
}

/// What the front-end should do after an event has been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetAction {
    None,
    Retry { path: String, attempt: u32 },
}

#[derive(Debug, Clone)]
pub struct AssetSlot {
    pub path: String,
    pub state: AssetState,
    pub max_attempts: u32,
    pub last_error: Option<LoadError>,
}

impl AssetSlot {
    pub fn new(path: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            path: path.into(),
            state: AssetState::Pending { attempt: 1 },
            max_attempts: max_attempts.max(1),
            last_error: None,
        }
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        !matches!(self.state, AssetState::Pending { .. })
    }

    /// Advance the slot on a completion event. Events arriving after the
    /// slot has settled are ignored. Returns the mesh to install, if any,
    /// alongside the follow-up action.
    pub fn resolve(&mut self, event: AssetEvent) -> (Option<Resolved>, AssetAction) {
        let AssetState::Pending { attempt } = self.state else {
            log::debug!("[asset] ignoring late event for {}", self.path);
            return (None, AssetAction::None);
        };
        match event {
            AssetEvent::Loaded(mesh) if mesh.is_empty() => {
                self.fail(attempt, LoadError::Empty)
            }
            AssetEvent::Loaded(mesh) => {
                log::info!(
                    "[asset] {} loaded ({} triangles, attempt {})",
                    self.path,
                    mesh.triangle_count(),
                    attempt
                );
                self.state = AssetState::Ready;
                (Some(Resolved::Asset(mesh)), AssetAction::None)
            }
            AssetEvent::Failed(err) => self.fail(attempt, err),
        }
    }

    fn fail(&mut self, attempt: u32, err: LoadError) -> (Option<Resolved>, AssetAction) {
        log::warn!(
            "[asset] {} attempt {}/{} failed: {}",
            self.path,
            attempt,
            self.max_attempts,
            err
        );
        self.last_error = Some(err);
        if attempt < self.max_attempts {
            let next = attempt + 1;
            self.state = AssetState::Pending { attempt: next };
            (
                None,
                AssetAction::Retry {
                    path: self.path.clone(),
                    attempt: next,
                },
            )
        } else {
            self.state = AssetState::Placeholder;
            (Some(Resolved::Placeholder), AssetAction::None)
        }
    }
}

/// Outcome handed to the scene once the slot settles.
#[derive(Debug, Clone)]
pub enum Resolved {
    Asset(MeshData),
    Placeholder,
}
