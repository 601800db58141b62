use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};

use crate::{
    analysis::{CompatibilityEngine, HarmonyEngine},
    compatibility::CompatibilityMemo,
    config::{AppConfig, StorageBackend},
    tarot::{FileStore, KeyValueStore, MemoryStore, ReadingRepository},
};

pub type Readings = ReadingRepository<Box<dyn KeyValueStore>>;

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    engine: Arc<dyn CompatibilityEngine>,
    memo: Arc<CompatibilityMemo>,
    readings: Arc<Readings>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store: Box<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::File => {
                ensure_storage_root(&config).await?;
                info!(path = %config.storage_path.display(), "tarot readings stored on disk");
                Box::new(FileStore::new(&config.storage_path))
            }
            StorageBackend::Memory => {
                warn!("tarot readings kept in memory and lost on restart");
                Box::new(MemoryStore::new())
            }
        };
        Ok(Self::with_parts(config, Arc::new(HarmonyEngine), store))
    }

    pub fn with_parts(
        config: AppConfig,
        engine: Arc<dyn CompatibilityEngine>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let readings = ReadingRepository::new(store);
        Self {
            config: Arc::new(config),
            engine,
            memo: Arc::new(CompatibilityMemo::new()),
            readings: Arc::new(readings),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn CompatibilityEngine {
        self.engine.as_ref()
    }

    pub fn memo(&self) -> &CompatibilityMemo {
        &self.memo
    }

    pub fn readings(&self) -> Arc<Readings> {
        Arc::clone(&self.readings)
    }
}

async fn ensure_storage_root(config: &AppConfig) -> Result<()> {
    let Some(parent) = config
        .storage_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    else {
        return Ok(());
    };

    fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create storage directory {}", parent.display()))
}
