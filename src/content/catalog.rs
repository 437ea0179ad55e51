//! Response catalog: preloaded or lazily loaded intent catalog.
//!
//! A file-backed catalog reads its intents file on first use and caches the
//! result. A failed read is not cached, so the next turn retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;

use super::intents::IntentCatalog;
use crate::error::Result;

#[derive(Debug)]
enum Source {
    Preloaded(Arc<IntentCatalog>),
    File {
        path: PathBuf,
        cache: RwLock<Option<Arc<IntentCatalog>>>,
    },
}

/// Access point for intent response variants.
#[derive(Debug)]
pub struct ResponseCatalog {
    source: Source,
}

impl ResponseCatalog {
    /// Wrap an already loaded catalog.
    pub fn preloaded(catalog: IntentCatalog) -> Self {
        Self {
            source: Source::Preloaded(Arc::new(catalog)),
        }
    }

    /// Read the catalog from `path` on first use.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::File {
                path: path.as_ref().to_path_buf(),
                cache: RwLock::new(None),
            },
        }
    }

    /// The catalog, loading it if needed.
    pub fn get(&self) -> Result<Arc<IntentCatalog>> {
        match &self.source {
            Source::Preloaded(catalog) => Ok(Arc::clone(catalog)),
            Source::File { path, cache } => {
                if let Some(catalog) = cache.read().as_ref() {
                    return Ok(Arc::clone(catalog));
                }

                let mut slot = cache.write();
                if let Some(catalog) = slot.as_ref() {
                    return Ok(Arc::clone(catalog));
                }

                match IntentCatalog::load(path) {
                    Ok(catalog) => {
                        info!("Loaded {} intents from {}", catalog.len(), path.display());
                        let catalog = Arc::new(catalog);
                        *slot = Some(Arc::clone(&catalog));
                        Ok(catalog)
                    }
                    Err(e) => {
                        warn!("Failed to load intents from {}: {e}", path.display());
                        Err(e)
                    }
                }
            }
        }
    }

    /// Whether the catalog is in memory.
    pub fn is_loaded(&self) -> bool {
        match &self.source {
            Source::Preloaded(_) => true,
            Source::File { cache, .. } => cache.read().is_some(),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Preloaded(_) => None,
            Source::File { path, .. } => Some(path),
        }
    }
}
