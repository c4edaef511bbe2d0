//! Domain 模块
//!
//! 包含账户引擎的领域模型：区块链、派生路径、账户与代币

pub mod account_derivation_path_helper;
pub mod account_manageability;
pub mod account_token_derivation;
pub mod blockchain;
pub mod derivation_path;
pub mod stored_crypto_account;
pub mod supported_blockchains;

// 重新导出常用类型
pub use account_derivation_path_helper::{AccountDerivationPathError, AccountDerivationPathHelper};
pub use account_manageability::AccountManageabilityChecker;
pub use account_token_derivation::{AccountTokenDerivation, TokenDerivationError};
pub use blockchain::{Blockchain, EllipticCurve};
pub use derivation_path::{Bip44, DerivationNode, DerivationPath, DerivationPathError};
pub use stored_crypto_account::{
    is_main_account, AccountIcon, BlockchainNetwork, BlockchainNetworkContainer,
    CryptoAccountIdentity, DerivationIndex, StoredCryptoAccount, StoredToken, TokensGrouping,
    TokensSorting, MAIN_ACCOUNT_DERIVATION_INDEX,
};
pub use supported_blockchains::SupportedBlockchains;
