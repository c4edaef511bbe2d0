//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Blockchain, SupportedBlockchains},
    error::{AccountsError, AccountsResult},
    utils::is_blank,
};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

/// 代币目录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub accounts_file: String,
    /// 旧版代币（未归属账户）JSON 文件
    #[serde(default)]
    pub legacy_tokens_file: Option<String>,
}

/// 账户配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    pub default_main_account_name: String,
    /// 新钱包主账户默认添加的网络
    pub default_network_ids: Vec<String>,
    pub hd_wallets_supported: bool,
    #[serde(default)]
    pub testnet: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://api.tangem-tech.com/v1".into()),
            timeout_secs: std::env::var("CATALOG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            accounts_file: std::env::var("ACCOUNTS_FILE")
                .unwrap_or_else(|_| "./data/crypto_accounts.json".into()),
            legacy_tokens_file: std::env::var("LEGACY_TOKENS_FILE").ok(),
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            default_main_account_name: std::env::var("DEFAULT_MAIN_ACCOUNT_NAME")
                .unwrap_or_else(|_| "Main Account".into()),
            default_network_ids: std::env::var("DEFAULT_NETWORK_IDS")
                .map(|ids| {
                    ids.split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_else(|_| vec!["bitcoin".into(), "ethereum".into()]),
            hd_wallets_supported: std::env::var("HD_WALLETS_SUPPORTED")
                .ok()
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            testnet: std::env::var("USE_TESTNET")
                .ok()
                .map(|v| v == "1")
                .unwrap_or(false),
        }
    }
}

impl AccountsConfig {
    /// 当前环境（主网/测试网）可用的链
    pub fn supported_blockchains(&self) -> SupportedBlockchains {
        if self.testnet {
            SupportedBlockchains::testnet()
        } else {
            SupportedBlockchains::mainnet()
        }
    }

    /// 解析默认网络 ID
    pub fn default_blockchains(&self) -> AccountsResult<Vec<Blockchain>> {
        let supported = self.supported_blockchains();
        self.default_network_ids
            .iter()
            .map(|id| {
                supported.blockchain(id).ok_or_else(|| {
                    AccountsError::config(format!("Unsupported default network id: {}", id))
                })
            })
            .collect()
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> AccountsResult<Self> {
        Ok(Self {
            logging: LoggingConfig::default(),
            catalog: CatalogConfig::default(),
            storage: StorageConfig::default(),
            accounts: AccountsConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> AccountsResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AccountsError::config(format!("Failed to read config file {:?}: {}", path.as_ref(), e))
        })?;

        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> AccountsResult<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> AccountsResult<()> {
        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(AccountsError::config(format!(
                "LOG_LEVEL must be one of: {:?}",
                valid_levels
            )));
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            return Err(AccountsError::config("LOG_FORMAT must be 'json' or 'text'"));
        }

        if !self.catalog.base_url.starts_with("http://")
            && !self.catalog.base_url.starts_with("https://")
        {
            return Err(AccountsError::config(
                "CATALOG_BASE_URL must start with http:// or https://",
            ));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(AccountsError::config("CATALOG_TIMEOUT_SECS must be greater than 0"));
        }

        if is_blank(&self.storage.accounts_file) {
            return Err(AccountsError::config("ACCOUNTS_FILE must not be empty"));
        }

        if is_blank(&self.accounts.default_main_account_name) {
            return Err(AccountsError::config(
                "DEFAULT_MAIN_ACCOUNT_NAME must not be empty",
            ));
        }

        self.accounts.default_blockchains()?;

        Ok(())
    }
}
