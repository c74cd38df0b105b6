//! # Background Catalog Fetch
//!
//! One asynchronous task per session fetches the preset catalog; its
//! result comes back to the session as an ordinary event, so the session
//! itself stays a single-threaded actor. The returned handle makes
//! teardown race-free: abort it and no late event arrives.

use apiforge_pipeline::{PresetCatalog, PresetError};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::events::SessionEvent;

/// Fetches the bundled preset templates, once per session
#[async_trait]
pub trait PresetLoader: Send + Sync {
    async fn fetch_all(&self) -> Result<PresetCatalog, PresetError>;
}

/// Handle to the in-flight fetch
pub struct CatalogTask {
    handle: JoinHandle<()>,
}

impl CatalogTask {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn the one-shot fetch. The result is delivered to `events` as
/// [`SessionEvent::CatalogLoaded`]; a failed fetch only logs, and the
/// session keeps working with tab-supplied templates.
pub fn spawn_catalog_fetch<L>(loader: L, events: mpsc::Sender<SessionEvent>) -> CatalogTask
where
    L: PresetLoader + 'static,
{
    let handle = tokio::spawn(async move {
        match loader.fetch_all().await {
            Ok(catalog) => {
                let _ = events.send(SessionEvent::CatalogLoaded(catalog)).await;
            }
            Err(err) => warn!("preset catalog fetch failed: {err}"),
        }
    });
    CatalogTask { handle }
}
