//! 加密账户持久化 Repository
//!
//! 整个账户列表作为一个整体读取和保存

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::StoredCryptoAccount;

const STORAGE_VERSION: u32 = 1;

/// Repository Trait
#[async_trait]
pub trait CryptoAccountsRepository: Send + Sync {
    /// 读取上次保存的账户列表，首次运行返回空列表
    async fn load(&self) -> Result<Vec<StoredCryptoAccount>>;

    /// 整体保存账户列表
    async fn save(&self, accounts: &[StoredCryptoAccount]) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredAccountsDocument {
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    accounts: Vec<StoredCryptoAccount>,
}

/// JSON 文件实现
///
/// 先写入同目录临时文件再重命名，保证保存要么完整成功要么不生效
pub struct JsonFileCryptoAccountsRepository {
    path: PathBuf,
}

impl JsonFileCryptoAccountsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl CryptoAccountsRepository for JsonFileCryptoAccountsRepository {
    async fn load(&self) -> Result<Vec<StoredCryptoAccount>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Accounts file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read accounts file: {:?}", self.path))
            }
        };

        let document: StoredAccountsDocument = serde_json::from_slice(&content)
            .with_context(|| format!("Failed to parse accounts file: {:?}", self.path))?;

        if document.version > STORAGE_VERSION {
            tracing::warn!(
                version = document.version,
                saved_at = ?document.saved_at,
                supported = STORAGE_VERSION,
                "Accounts file written by a newer version"
            );
        }

        Ok(document.accounts)
    }

    async fn save(&self, accounts: &[StoredCryptoAccount]) -> Result<()> {
        let document = StoredAccountsDocument {
            version: STORAGE_VERSION,
            saved_at: Some(Utc::now()),
            accounts: accounts.to_vec(),
        };
        let content =
            serde_json::to_vec_pretty(&document).context("Failed to serialize accounts")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &content)
            .await
            .with_context(|| format!("Failed to write accounts file: {:?}", temp_path))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace accounts file: {:?}", self.path))?;

        tracing::debug!(path = %self.path.display(), accounts = accounts.len(), "Accounts saved");
        Ok(())
    }
}

/// 内存实现
#[derive(Default)]
pub struct InMemoryCryptoAccountsRepository {
    accounts: RwLock<Vec<StoredCryptoAccount>>,
}

impl InMemoryCryptoAccountsRepository {
    pub fn new(accounts: Vec<StoredCryptoAccount>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub async fn snapshot(&self) -> Vec<StoredCryptoAccount> {
        self.accounts.read().await.clone()
    }
}

#[async_trait]
impl CryptoAccountsRepository for InMemoryCryptoAccountsRepository {
    async fn load(&self) -> Result<Vec<StoredCryptoAccount>> {
        Ok(self.accounts.read().await.clone())
    }

    async fn save(&self, accounts: &[StoredCryptoAccount]) -> Result<()> {
        *self.accounts.write().await = accounts.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::domain::{Blockchain, BlockchainNetwork, StoredToken};

    fn sample_accounts() -> Vec<StoredCryptoAccount> {
        let eth = Blockchain::Ethereum { testnet: false };
        vec![
            StoredCryptoAccount::new(
                0,
                None,
                vec![StoredToken::coin(BlockchainNetwork::new(eth, eth.derivation_path()))],
            ),
            StoredCryptoAccount::new(1, Some("Trading".into()), vec![]),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let repo = JsonFileCryptoAccountsRepository::new(dir.path().join("accounts.json"));

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let repo = JsonFileCryptoAccountsRepository::new(dir.path().join("nested/accounts.json"));
        let accounts = sample_accounts();

        assert_ok!(repo.save(&accounts).await);

        assert_eq!(repo.load().await.unwrap(), accounts);
        assert!(!repo.temp_path().exists());

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(repo.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert!(raw["saved_at"].is_string());
    }

    #[tokio::test]
    async fn test_corrupted_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        std::fs::write(&path, b"{not json").unwrap();

        let repo = JsonFileCryptoAccountsRepository::new(path);
        assert_err!(repo.load().await);
    }

    #[tokio::test]
    async fn test_document_without_timestamp_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        std::fs::write(&path, br#"{"version":1,"accounts":[{"derivation_index":0}]}"#).unwrap();

        let accounts = assert_ok!(JsonFileCryptoAccountsRepository::new(path).load().await);
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].tokens.is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_repository() {
        let repo = InMemoryCryptoAccountsRepository::default();
        assert!(repo.load().await.unwrap().is_empty());

        repo.save(&sample_accounts()).await.unwrap();
        assert_eq!(repo.snapshot().await.len(), 2);
    }
}
