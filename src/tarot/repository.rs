use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{reading::Interpretation, storage::KeyValueStore};

pub const STORAGE_KEY: &str = "tarot_readings";
pub const MAX_SAVED_READINGS: usize = 50;

const ID_FRAGMENT_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadSummary {
    pub title: String,
    #[serde(default)]
    pub title_ko: String,
    pub card_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    pub name: String,
    #[serde(default)]
    pub name_ko: String,
    pub is_reversed: bool,
    pub position: String,
}

/// A reading as submitted for saving, before an id and timestamp are assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTarotReading {
    #[serde(default)]
    pub question: String,
    pub spread: SpreadSummary,
    pub cards: Vec<SavedCard>,
    pub interpretation: Interpretation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub spread_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTarotReading {
    pub id: String,
    pub timestamp: i64,
    #[serde(flatten)]
    pub reading: NewTarotReading,
}

/// Newest-first list of saved readings kept under a single storage key.
pub struct ReadingRepository<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ReadingRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Stored readings, or an empty list when nothing is stored or it cannot be read.
    pub fn get_saved_readings(&self) -> Vec<SavedTarotReading> {
        match self.load() {
            Ok(readings) => readings,
            Err(err) => {
                error!(?err, "failed to load saved tarot readings");
                Vec::new()
            }
        }
    }

    /// Prepend the reading and cap the list. Persistence failures are logged, and the
    /// assigned record is returned either way.
    pub fn save_reading(&self, reading: NewTarotReading) -> SavedTarotReading {
        let timestamp = Utc::now().timestamp_millis();
        let saved = SavedTarotReading {
            id: generate_id(timestamp, &mut OsRng),
            timestamp,
            reading,
        };

        let _guard = self.lock_writes();
        let mut readings = self.get_saved_readings();
        readings.insert(0, saved.clone());
        readings.truncate(MAX_SAVED_READINGS);

        match self.persist(&readings) {
            Ok(()) => info!(id = %saved.id, "saved tarot reading"),
            Err(err) => error!(?err, id = %saved.id, "failed to persist tarot reading"),
        }
        saved
    }

    /// Remove the reading with `id`. Returns whether an entry was removed and persisted.
    pub fn delete_reading(&self, id: &str) -> bool {
        let _guard = self.lock_writes();
        let mut readings = self.get_saved_readings();
        let before = readings.len();
        readings.retain(|reading| reading.id != id);
        if readings.len() == before {
            return false;
        }

        match self.persist(&readings) {
            Ok(()) => true,
            Err(err) => {
                error!(?err, %id, "failed to delete tarot reading");
                false
            }
        }
    }

    pub fn get_reading_by_id(&self, id: &str) -> Option<SavedTarotReading> {
        self.get_saved_readings()
            .into_iter()
            .find(|reading| reading.id == id)
    }

    pub fn clear_readings(&self) {
        let _guard = self.lock_writes();
        if let Err(err) = self.store.remove_item(STORAGE_KEY) {
            error!(?err, "failed to clear saved tarot readings");
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Vec<SavedTarotReading>> {
        let Some(raw) = self.store.get_item(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).context("failed to parse saved tarot readings")
    }

    fn persist(&self, readings: &[SavedTarotReading]) -> Result<()> {
        let json = serde_json::to_string(readings).context("failed to encode tarot readings")?;
        self.store.set_item(STORAGE_KEY, &json)
    }
}

/// `tarot_<epoch-ms>_<base36 fragment>`.
fn generate_id<R: RngCore + ?Sized>(timestamp: i64, rng: &mut R) -> String {
    let fragment: String = (0..ID_FRAGMENT_LEN)
        .map(|_| BASE36[(rng.next_u32() % 36) as usize] as char)
        .collect();
    format!("tarot_{timestamp}_{fragment}")
}
