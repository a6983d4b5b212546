//! Persistence orchestration: draft/complete saves, autosave, and export.
//!
//! DESIGN
//! ======
//! The engine never talks to the network itself. Three collaborators are
//! reached through object-safe traits: the persistence gateway (design
//! CRUD), the renderer adapter (rasterization and thumbnails), and the
//! image uploader. The orchestrator decides when to call them: manual
//! draft saves, manual complete saves (thumbnail first), a trailing
//! debounced autosave, and export (which also performs a complete save —
//! observed behavior of the original editor, kept deliberately).
//!
//! All gateway calls go through one async mutex, so an autosave firing
//! mid-manual-save can never interleave partial payloads. The first
//! successful `create` records the design id; every later save becomes an
//! `update` of that record.
//!
//! ERROR HANDLING
//! ==============
//! Manual save and export failures propagate to the caller, which surfaces
//! a retryable notification; the in-memory document is never touched by a
//! failed save. Autosave failures are logged at `warn` and swallowed —
//! autosave must never interrupt editing. A failed thumbnail render or
//! upload downgrades a complete save to one without a thumbnail URL.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::codec::Document;

const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 30_000;
const DEFAULT_DRAFT_TITLE: &str = "Untitled";
const DEFAULT_COMPLETE_TITLE: &str = "Untitled Design";
const THUMBNAIL_FILENAME: &str = "thumbnail.png";

/// Errors from the persistence collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("gateway call failed: {0}")]
    Gateway(String),
    #[error("rasterization failed: {0}")]
    Render(String),
    #[error("image upload failed: {0}")]
    Upload(String),
}

/// Raster output formats the renderer adapter supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpg,
    Pdf,
}

impl ExportFormat {
    /// Conventional file extension for the format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

/// The payload sent to the persistence gateway on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub title: String,
    pub json_data: Document,
    pub is_draft: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// The gateway's record of a persisted design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub id: String,
    pub title: String,
    pub is_draft: bool,
}

/// Result of uploading an image file: hosted URL plus natural size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

/// Backend design storage (the REST API in production).
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Persist a new design, returning its record with the assigned id.
    async fn create(&self, payload: &SavePayload) -> Result<DesignRecord, PersistError>;
    /// Overwrite an existing design.
    async fn update(&self, id: &str, payload: &SavePayload) -> Result<DesignRecord, PersistError>;
}

/// Rasterization collaborator (the canvas renderer in production).
#[async_trait]
pub trait RendererAdapter: Send + Sync {
    /// Render the document to the given raster/print format.
    async fn rasterize(&self, document: &Document, format: ExportFormat) -> Result<Vec<u8>, PersistError>;
    /// Render the square dashboard thumbnail,
    /// [`THUMBNAIL_SIZE`](crate::consts::THUMBNAIL_SIZE) pixels on a side.
    async fn thumbnail(&self, document: &Document) -> Result<Vec<u8>, PersistError>;
}

/// Image hosting collaborator (the upload CDN in production).
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload raw image bytes, returning the hosted URL and natural size.
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedImage, PersistError>;
}

/// Bytes produced by an export, plus the design record from the complete
/// save that follows every export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    pub bytes: Vec<u8>,
    pub record: DesignRecord,
}

fn autosave_debounce_ms() -> u64 {
    std::env::var("AUTOSAVE_DEBOUNCE_MS")
        .map_or(None, |v| v.parse::<u64>().map_or(None, Some))
        .unwrap_or(DEFAULT_AUTOSAVE_DEBOUNCE_MS)
}

/// Decides when the external save/export collaborators are called and
/// serializes every gateway call through a single-flight gate.
pub struct PersistenceOrchestrator {
    gateway: Arc<dyn PersistenceGateway>,
    renderer: Arc<dyn RendererAdapter>,
    uploader: Arc<dyn ImageUploader>,
    /// Design id once the first `create` has succeeded.
    design_id: Mutex<Option<String>>,
    /// Single-flight gate: held across every gateway call.
    save_gate: Mutex<()>,
    /// Pending debounced autosave task, if any.
    autosave_task: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl PersistenceOrchestrator {
    /// Wire up the three collaborators. The autosave debounce interval
    /// comes from `AUTOSAVE_DEBOUNCE_MS`, default 30s.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        renderer: Arc<dyn RendererAdapter>,
        uploader: Arc<dyn ImageUploader>,
    ) -> Self {
        Self::with_debounce(gateway, renderer, uploader, Duration::from_millis(autosave_debounce_ms()))
    }

    /// As [`Self::new`] with an explicit debounce interval.
    #[must_use]
    pub fn with_debounce(
        gateway: Arc<dyn PersistenceGateway>,
        renderer: Arc<dyn RendererAdapter>,
        uploader: Arc<dyn ImageUploader>,
        debounce: Duration,
    ) -> Self {
        Self {
            gateway,
            renderer,
            uploader,
            design_id: Mutex::new(None),
            save_gate: Mutex::new(()),
            autosave_task: Mutex::new(None),
            debounce,
        }
    }

    /// Adopt the id of a design that already exists in the backend, so
    /// saves update it instead of creating a new record.
    pub async fn set_design_id(&self, id: String) {
        *self.design_id.lock().await = Some(id);
    }

    /// The persisted design id, once known.
    pub async fn design_id(&self) -> Option<String> {
        self.design_id.lock().await.clone()
    }

    /// Manual draft save: `isDraft = true`, no thumbnail.
    pub async fn save_draft(&self, document: Document, title: Option<String>) -> Result<DesignRecord, PersistError> {
        let payload = SavePayload {
            title: title.unwrap_or_else(|| DEFAULT_DRAFT_TITLE.to_owned()),
            canvas_width: document.canvas_width,
            canvas_height: document.canvas_height,
            json_data: document,
            is_draft: true,
            thumbnail_url: None,
        };
        self.persist(payload).await
    }

    /// Manual complete save: render and upload the thumbnail, then save
    /// with `isDraft = false`. A thumbnail failure is logged and the save
    /// proceeds without a URL.
    pub async fn save_complete(&self, document: Document, title: Option<String>) -> Result<DesignRecord, PersistError> {
        let thumbnail_url = match self.make_thumbnail(&document).await {
            Ok(url) => Some(url),
            Err(error) => {
                warn!(%error, "thumbnail generation failed; saving without one");
                None
            }
        };
        let payload = SavePayload {
            title: title.unwrap_or_else(|| DEFAULT_COMPLETE_TITLE.to_owned()),
            canvas_width: document.canvas_width,
            canvas_height: document.canvas_height,
            json_data: document,
            is_draft: false,
            thumbnail_url,
        };
        self.persist(payload).await
    }

    /// Rasterize the document, then perform the complete save that every
    /// export triggers. Both the raster bytes and the saved record are
    /// returned; either step's failure propagates.
    pub async fn export(
        &self,
        document: Document,
        format: ExportFormat,
        title: Option<String>,
    ) -> Result<ExportResult, PersistError> {
        let bytes = self.renderer.rasterize(&document, format).await?;
        info!(format = format.extension(), size = bytes.len(), "export rasterized");
        let record = self.save_complete(document, title).await?;
        Ok(ExportResult { bytes, record })
    }

    /// Schedule (or re-schedule) the trailing debounced autosave. Each
    /// call cancels the pending save, so a burst of edits produces exactly
    /// one draft save after the quiet interval. Empty documents are not
    /// autosaved. Failures are logged and swallowed.
    pub async fn schedule_autosave(self: &Arc<Self>, document: Document) {
        if document.elements.is_empty() {
            return;
        }
        let orchestrator = Arc::clone(self);
        let debounce = self.debounce;
        let task = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(error) = orchestrator.save_draft(document, None).await {
                warn!(%error, "autosave failed; will retry on next edit");
            } else {
                info!("autosave complete");
            }
        });
        let mut slot = self.autosave_task.lock().await;
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
    }

    /// Cancel a pending autosave without saving.
    pub async fn cancel_autosave(&self) {
        if let Some(task) = self.autosave_task.lock().await.take() {
            task.abort();
        }
    }

    /// Editor teardown: abort pending timers so no stale callback saves a
    /// discarded session.
    pub async fn shutdown(&self) {
        self.cancel_autosave().await;
    }

    async fn make_thumbnail(&self, document: &Document) -> Result<String, PersistError> {
        let bytes = self.renderer.thumbnail(document).await?;
        let uploaded = self.uploader.upload(bytes, THUMBNAIL_FILENAME).await?;
        Ok(uploaded.url)
    }

    /// Create-or-update through the single-flight gate.
    async fn persist(&self, payload: SavePayload) -> Result<DesignRecord, PersistError> {
        let _gate = self.save_gate.lock().await;
        let mut design_id = self.design_id.lock().await;
        let record = match design_id.as_deref() {
            Some(id) => self.gateway.update(id, &payload).await?,
            None => {
                let record = self.gateway.create(&payload).await?;
                *design_id = Some(record.id.clone());
                record
            }
        };
        info!(id = %record.id, is_draft = payload.is_draft, "design saved");
        Ok(record)
    }
}
