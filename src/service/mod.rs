pub mod crypto_accounts_sync; // 加载 → 分配 → 迁移 → 保存
pub mod custom_tokens_migrator;
pub mod default_account_factory;
pub mod name_uniqueness_checker;
pub mod remote_accounts_mapper;
pub mod token_catalog;
pub mod tokens_distributor;

pub use crypto_accounts_sync::{CryptoAccountsSyncService, SyncReport};
pub use custom_tokens_migrator::CustomTokensMigrator;
pub use default_account_factory::DefaultAccountFactory;
pub use name_uniqueness_checker::NameUniquenessChecker;
pub use remote_accounts_mapper::{RemoteAccountsMapper, RemoteCryptoAccountsInfo};
pub use token_catalog::{HttpTokenCatalog, TokenCatalog, TokenMetadata};
pub use tokens_distributor::{
    DistributionResult, DistributionSource, RedistributionPair, TokensDistributor,
};
