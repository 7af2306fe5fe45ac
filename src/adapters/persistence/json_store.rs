//! Implements AnalysisStorePort using a JSON file.
//!
//! Keeps analyses across restarts. All reads are served from memory; every `put`
//! rewrites the file atomically.

use crate::domain::{AnalysisKey, AnalysisResult, DomainError};
use crate::ports::AnalysisStorePort;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// On-disk shape. JSON object keys must be strings, so entries are stored as a list.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    analyses: Vec<StoredAnalysis>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredAnalysis {
    key: AnalysisKey,
    result: AnalysisResult,
}

/// JSON file-based analysis storage.
pub struct JsonStore {
    path: std::path::PathBuf,
    cache: tokio::sync::RwLock<HashMap<AnalysisKey, AnalysisResult>>,
    /// Serializes writers of the shared temp file.
    save_lock: tokio::sync::Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(HashMap::new()),
            save_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Load entries from disk. A missing file starts empty; a corrupt one is ignored.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data: StoreFile = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "corrupt analysis store; starting empty");
                StoreFile::default()
            }),
            Err(_) => StoreFile::default(),
        };
        let entries: HashMap<AnalysisKey, AnalysisResult> = data
            .analyses
            .into_iter()
            .map(|a| (a.key, a.result))
            .collect();
        info!(path = %self.path.display(), count = entries.len(), "loaded analysis store");
        *self.cache.write().await = entries;
        Ok(())
    }

    /// Atomic save using write-replace pattern.
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn save(&self) -> Result<(), DomainError> {
        let _saving = self.save_lock.lock().await;
        let data = {
            let cache = self.cache.read().await;
            let mut analyses: Vec<StoredAnalysis> = cache
                .iter()
                .map(|(key, result)| StoredAnalysis {
                    key: key.clone(),
                    result: result.clone(),
                })
                .collect();
            analyses.sort_by(|a, b| a.key.to_string().cmp(&b.key.to_string()));
            StoreFile { analyses }
        };
        let json =
            serde_json::to_string_pretty(&data).map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create store dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl AnalysisStorePort for JsonStore {
    async fn get(&self, key: &AnalysisKey) -> Result<Option<AnalysisResult>, DomainError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn put(&self, key: &AnalysisKey, result: &AnalysisResult) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            cache.insert(key.clone(), result.clone());
        }
        self.save().await
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.cache.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisMode, RiskScore};

    fn temp_store_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("policy-tracker-test-{}-{}", name, std::process::id()))
            .join("analyses.json")
    }

    #[tokio::test]
    async fn test_put_survives_reload() {
        let path = temp_store_path("reload");
        let key = AnalysisKey::new("HR123", AnalysisMode::Constitution);
        let result = AnalysisResult {
            score: RiskScore::Extracted(8),
            body: "Risk Score: 8\nFirst Amendment concerns.".to_string(),
        };

        let store = JsonStore::new(&path);
        store.load().await.unwrap();
        store.put(&key, &result).await.unwrap();

        let reopened = JsonStore::new(&path);
        reopened.load().await.unwrap();
        assert_eq!(reopened.get(&key).await.unwrap(), Some(result));
        assert_eq!(reopened.len().await.unwrap(), 1);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let path = temp_store_path("missing");
        let store = JsonStore::new(&path);
        store.load().await.unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let path = temp_store_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonStore::new(&path);
        store.load().await.unwrap();
        assert_eq!(store.len().await.unwrap(), 0);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
