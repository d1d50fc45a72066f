//! Shared catalog handle with all-or-nothing rebuilds.
//!
//! Readers take cheap snapshots (`Arc<GraphCatalog>`). A rebuild populates a
//! fresh catalog without holding the lock and swaps it in only when the
//! whole build succeeded, so a query never sees a partial catalog.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::source::BridgeMetadata;
use crate::types::GirderKey;

use super::{CatalogBuilder, GraphCatalog, RebuildError};

/// Single-writer handle to the current catalog.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<GraphCatalog>>>,
}

impl SharedCatalog {
    /// Wrap an existing catalog.
    pub fn new(catalog: GraphCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The catalog as of now. Later rebuilds do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<GraphCatalog> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild from bridge metadata.
    pub fn rebuild<M: BridgeMetadata>(
        &self,
        metadata: &M,
        girder: GirderKey,
    ) -> Result<Arc<GraphCatalog>, RebuildError> {
        self.rebuild_with(|| CatalogBuilder::build(metadata, girder))
    }

    /// Rebuild with a custom population step.
    ///
    /// On error the previous catalog stays in place.
    pub fn rebuild_with<F>(&self, build: F) -> Result<Arc<GraphCatalog>, RebuildError>
    where
        F: FnOnce() -> Result<GraphCatalog, RebuildError>,
    {
        let catalog = match build() {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                tracing::error!(error = %e, "Graph catalog rebuild failed, keeping previous catalog");
                return Err(e);
            }
        };

        *self.current.write() = Arc::clone(&catalog);
        tracing::info!(entries = catalog.len(), "Graph catalog rebuilt");
        Ok(catalog)
    }
}
