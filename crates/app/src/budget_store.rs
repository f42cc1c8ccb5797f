//! On-device storage for the budget screen.
//!
//! [`LocalStorage`] is a string key/value store kept as one file per key.
//! [`BudgetStore`] keeps the budget document under
//! [`BUDGET_STORAGE_KEY`] and tracks when it was last saved. There is no
//! conflict handling: the last save wins.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use wedplan_core::budget::{BudgetData, BUDGET_STORAGE_KEY};
use wedplan_core::types::Timestamp;
use wedplan_db::StoreError;

/// Key used by the storage self-test.
const SELF_TEST_KEY: &str = "test-key";
const SELF_TEST_VALUE: &str = "test-value";

// ---------------------------------------------------------------------------
// Key/value files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidQuery(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(path, value).await?;
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Budget document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    Success,
    Error,
}

/// What the budget screen shows about persistence.
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub method: &'static str,
    pub last_saved: Option<Timestamp>,
    pub save_status: Option<SaveStatus>,
}

#[derive(Debug, Default)]
struct SaveState {
    last_saved: Option<Timestamp>,
    save_status: Option<SaveStatus>,
}

pub struct BudgetStore {
    storage: LocalStorage,
    state: Mutex<SaveState>,
}

impl BudgetStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            state: Mutex::new(SaveState::default()),
        }
    }

    /// The saved document, or the defaults when nothing is stored or the
    /// stored document is unreadable. A storage failure is an error.
    pub async fn load(&self) -> Result<BudgetData, StoreError> {
        let Some(raw) = self.storage.get_item(BUDGET_STORAGE_KEY).await? else {
            return Ok(BudgetData::default());
        };
        match serde_json::from_str(&raw) {
            Ok(data) => Ok(data),
            Err(e) => {
                tracing::warn!(error = %e, "Stored budget unreadable, using defaults");
                Ok(BudgetData::default())
            }
        }
    }

    pub async fn save(&self, data: &BudgetData) -> Result<Timestamp, StoreError> {
        let result: Result<(), StoreError> = async {
            let raw = serde_json::to_string(data)?;
            self.storage.set_item(BUDGET_STORAGE_KEY, &raw).await
        }
        .await;

        let mut state = self.state.lock().await;
        match result {
            Ok(()) => {
                let now = Utc::now();
                state.last_saved = Some(now);
                state.save_status = Some(SaveStatus::Success);
                tracing::debug!(categories = data.categories.len(), "Budget saved");
                Ok(now)
            }
            Err(e) => {
                state.save_status = Some(SaveStatus::Error);
                Err(e)
            }
        }
    }

    /// Drop the stored document. The next load returns the defaults.
    pub async fn reset(&self) -> Result<BudgetData, StoreError> {
        self.storage.remove_item(BUDGET_STORAGE_KEY).await?;
        let mut state = self.state.lock().await;
        state.last_saved = None;
        state.save_status = None;
        Ok(BudgetData::default())
    }

    /// Write, read back and remove a test key.
    pub async fn self_test(&self) -> Result<bool, StoreError> {
        self.storage.set_item(SELF_TEST_KEY, SELF_TEST_VALUE).await?;
        let read = self.storage.get_item(SELF_TEST_KEY).await?;
        self.storage.remove_item(SELF_TEST_KEY).await?;
        Ok(read.as_deref() == Some(SELF_TEST_VALUE))
    }

    pub async fn info(&self) -> StorageInfo {
        let state = self.state.lock().await;
        StorageInfo {
            method: "local storage",
            last_saved: state.last_saved,
            save_status: state.save_status,
        }
    }
}
