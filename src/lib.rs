//! CryptoAccounts - 多账户钱包的账户引擎
//!
//! 每个账户由 BIP44 account 节点区分，负责账户派生路径计算、
//! 代币在账户间的归位、自定义代币迁移与账户持久化

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repository;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{AccountsError, AccountsResult};

pub mod prelude {
    pub use crate::{
        config::Config,
        domain::{
            AccountDerivationPathHelper, Blockchain, BlockchainNetwork, DerivationPath,
            StoredCryptoAccount, StoredToken, SupportedBlockchains,
        },
        error::{AccountsError, AccountsResult},
        repository::CryptoAccountsRepository,
        service::{CryptoAccountsSyncService, DistributionResult, TokensDistributor},
    };
}
