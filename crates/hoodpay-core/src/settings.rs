//! # Settings Store
//!
//! Key-value storage for the two HoodPay credentials.
//! Values are free-form strings; nothing here checks them against the provider.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Option key holding the provider API key
pub const API_KEY_OPTION: &str = "hoodpay_api_key";

/// Option key holding the merchant business ID
pub const BUSINESS_ID_OPTION: &str = "hoodpay_business_id";

/// Credentials sent with every provider call
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token for the provider API
    pub api_key: String,

    /// Merchant account identifier used in every API path
    pub business_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, business_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            business_id: business_id.into(),
        }
    }

    /// Both values present
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.business_id.is_empty()
    }

    /// Fail with the standard configuration error unless both values are set
    pub fn require_complete(&self) -> PaymentResult<&Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(PaymentError::not_configured())
        }
    }

    /// Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("business_id", &self.business_id)
            .finish()
    }
}

/// Generic key-value option storage.
///
/// A missing key reads as `None`, which callers treat as empty.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> PaymentResult<Option<String>>;

    /// Persists immediately.
    fn set(&self, key: &str, value: &str) -> PaymentResult<()> {
        self.set_many(&[(key, value)])
    }

    /// Write several values as one unit: all are stored or none are.
    fn set_many(&self, entries: &[(&str, &str)]) -> PaymentResult<()>;
}

/// Shared handle to a settings store
pub type SharedSettingsStore = Arc<dyn SettingsStore>;

/// Read both credentials from a store, sourced once per request
pub fn load_credentials(store: &dyn SettingsStore) -> PaymentResult<Credentials> {
    Ok(Credentials {
        api_key: store.get(API_KEY_OPTION)?.unwrap_or_default(),
        business_id: store.get(BUSINESS_ID_OPTION)?.unwrap_or_default(),
    })
}

/// Overwrite both credentials
pub fn save_credentials(
    store: &dyn SettingsStore,
    api_key: &str,
    business_id: &str,
) -> PaymentResult<()> {
    store.set_many(&[(API_KEY_OPTION, api_key), (BUSINESS_ID_OPTION, business_id)])
}

fn poisoned() -> PaymentError {
    PaymentError::Storage("settings lock poisoned".to_string())
}

/// In-process store, lost on restart
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a value
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
        self
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> PaymentResult<Option<String>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> PaymentResult<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        for (key, value) in entries {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// TOML-file-backed store.
///
/// The whole file is rewritten on every write (temp file, then rename).
/// Writes block on file I/O; async callers should move them off the runtime.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileSettingsStore {
    /// Open the store at `path`. A missing file reads as empty.
    pub fn open(path: impl AsRef<Path>) -> PaymentResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                PaymentError::Storage(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(PaymentError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> PaymentResult<()> {
        let content = toml::to_string(values)
            .map_err(|e| PaymentError::Storage(format!("Failed to encode settings: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PaymentError::Storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)
            .map_err(|e| PaymentError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            PaymentError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> PaymentResult<Option<String>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> PaymentResult<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        let mut updated = values.clone();
        for (key, value) in entries {
            updated.insert(key.to_string(), value.to_string());
        }

        // Memory only changes once the file has been replaced.
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "hoodpay-settings-{}-{}.toml",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_empty_store_yields_incomplete_credentials() {
        let store = MemorySettingsStore::new();
        let creds = load_credentials(&store).unwrap();

        assert_eq!(creds, Credentials::default());
        assert!(!creds.is_complete());
        assert!(matches!(
            creds.require_complete(),
            Err(PaymentError::Configuration(_))
        ));
    }

    #[test]
    fn test_memory_round_trip() {
        let store = MemorySettingsStore::new();
        save_credentials(&store, "k1", "b1").unwrap();

        let creds = load_credentials(&store).unwrap();
        assert_eq!(creds.api_key, "k1");
        assert_eq!(creds.business_id, "b1");
        assert!(creds.is_complete());
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemorySettingsStore::new()
            .with_value(API_KEY_OPTION, "old")
            .with_value(BUSINESS_ID_OPTION, "old-biz");
        save_credentials(&store, "new", "").unwrap();

        let creds = load_credentials(&store).unwrap();
        assert_eq!(creds.api_key, "new");
        assert_eq!(creds.business_id, "");
        assert!(!creds.is_complete());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let path = temp_settings_path("reopen");
        let _ = std::fs::remove_file(&path);

        let store = FileSettingsStore::open(&path).unwrap();
        assert_eq!(store.get(API_KEY_OPTION).unwrap(), None);
        save_credentials(&store, "k1", "b1").unwrap();

        let reopened = FileSettingsStore::open(&path).unwrap();
        let creds = load_credentials(&reopened).unwrap();
        assert_eq!(creds, Credentials::new("k1", "b1"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let path = temp_settings_path("garbage");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let result = FileSettingsStore::open(&path);
        assert!(matches!(result, Err(PaymentError::Storage(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_file_write_keeps_both_values() {
        let path = temp_settings_path("failed-write");
        let _ = std::fs::remove_dir_all(&path);
        let _ = std::fs::remove_file(&path);

        let store = FileSettingsStore::open(&path).unwrap();
        store.set(API_KEY_OPTION, "old").unwrap();

        // A directory in place of the settings file makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = save_credentials(&store, "new", "new-biz");
        assert!(matches!(result, Err(PaymentError::Storage(_))));

        assert_eq!(store.get(API_KEY_OPTION).unwrap().as_deref(), Some("old"));
        assert_eq!(store.get(BUSINESS_ID_OPTION).unwrap(), None);

        std::fs::remove_dir_all(&path).unwrap();
        let _ = std::fs::remove_file(path.with_extension("toml.tmp"));
    }

    #[test]
    fn test_save_credentials_is_one_batch() {
        #[derive(Default)]
        struct CountingStore {
            inner: MemorySettingsStore,
            batches: std::sync::atomic::AtomicUsize,
        }

        impl SettingsStore for CountingStore {
            fn get(&self, key: &str) -> PaymentResult<Option<String>> {
                self.inner.get(key)
            }

            fn set_many(&self, entries: &[(&str, &str)]) -> PaymentResult<()> {
                self.batches
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                self.inner.set_many(entries)
            }
        }

        let store = CountingStore::default();
        save_credentials(&store, "k1", "b1").unwrap();

        assert_eq!(store.batches.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(
            load_credentials(&store).unwrap(),
            Credentials::new("k1", "b1")
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let creds = Credentials::new("secret-key", "biz");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("biz"));
        assert_eq!(creds.auth_header(), "Bearer secret-key");
    }
}
