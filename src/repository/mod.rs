// Repository 抽象层
pub mod crypto_accounts_repository;
pub mod legacy_tokens_source;

pub use crypto_accounts_repository::{
    CryptoAccountsRepository, InMemoryCryptoAccountsRepository, JsonFileCryptoAccountsRepository,
};
pub use legacy_tokens_source::load_legacy_tokens;
