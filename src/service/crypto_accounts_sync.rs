//! 账户同步流程
//!
//! 加载 → (首次运行)创建主账户 → (非 HD 钱包)移除带派生路径的代币
//! → 重新分配 → 迁移自定义代币 → 有变化时保存

use std::sync::Arc;

use anyhow::{Context, Result};

use super::{
    custom_tokens_migrator::CustomTokensMigrator,
    default_account_factory::DefaultAccountFactory,
    tokens_distributor::{DistributionResult, TokensDistributor},
};
use crate::{
    domain::{StoredCryptoAccount, StoredToken},
    repository::CryptoAccountsRepository,
};

/// 一次同步的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub distribution: DistributionResult,
    pub migrated: bool,
    pub removed_invalid_tokens: usize,
    pub created_default_account: bool,
    pub saved: bool,
}

pub struct CryptoAccountsSyncService {
    repository: Arc<dyn CryptoAccountsRepository>,
    migrator: CustomTokensMigrator,
    default_account_factory: DefaultAccountFactory,
    hd_wallets_supported: bool,
}

impl CryptoAccountsSyncService {
    pub fn new(
        repository: Arc<dyn CryptoAccountsRepository>,
        migrator: CustomTokensMigrator,
        default_account_factory: DefaultAccountFactory,
        hd_wallets_supported: bool,
    ) -> Self {
        Self {
            repository,
            migrator,
            default_account_factory,
            hd_wallets_supported,
        }
    }

    /// 执行一次完整同步，`legacy_tokens` 为尚未归属任何账户的旧版代币
    pub async fn run(&self, legacy_tokens: Vec<StoredToken>) -> Result<SyncReport> {
        let mut accounts = self
            .repository
            .load()
            .await
            .context("Failed to load crypto accounts")?;

        let created_default_account = accounts.is_empty();
        if created_default_account {
            tracing::info!("No stored accounts, creating main account");
            accounts.push(self.default_account_factory.make_default_account(Vec::new()));
        }

        let removed_invalid_tokens = if self.hd_wallets_supported {
            0
        } else {
            remove_invalid_tokens(&mut accounts)
        };

        let distribution = TokensDistributor::distribute_tokens(&mut accounts, legacy_tokens);
        let migrated = self.migrator.migrate_tokens_if_needed(&mut accounts).await;

        let changed = created_default_account
            || removed_invalid_tokens > 0
            || !distribution.is_none()
            || migrated;

        if changed {
            self.repository
                .save(&accounts)
                .await
                .context("Failed to save crypto accounts")?;
        }

        let report = SyncReport {
            distribution,
            migrated,
            removed_invalid_tokens,
            created_default_account,
            saved: changed,
        };

        tracing::info!(
            accounts = accounts.len(),
            moves = report.distribution.pairs().len(),
            migrated = report.migrated,
            removed = report.removed_invalid_tokens,
            saved = report.saved,
            "✅ Crypto accounts sync completed"
        );

        Ok(report)
    }
}

/// 不支持 HD 派生的钱包不能持有带派生路径的代币
fn remove_invalid_tokens(accounts: &mut [StoredCryptoAccount]) -> usize {
    let mut removed = 0;
    for account in accounts.iter_mut() {
        let before = account.tokens.len();
        account
            .tokens
            .retain(|token| token.derivation_path().is_none());
        removed += before - account.tokens.len();
    }

    if removed > 0 {
        tracing::warn!(removed, "Removed tokens with derivation paths from non-HD wallet");
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Blockchain, BlockchainNetwork};

    #[test]
    fn test_remove_invalid_tokens() {
        let btc = Blockchain::Bitcoin { testnet: false };
        let mut accounts = vec![StoredCryptoAccount::new(
            0,
            None,
            vec![
                StoredToken::coin(BlockchainNetwork::new(btc, btc.derivation_path())),
                StoredToken::coin(BlockchainNetwork::new(btc, None)),
            ],
        )];

        assert_eq!(remove_invalid_tokens(&mut accounts), 1);
        assert_eq!(accounts[0].tokens.len(), 1);
        assert!(accounts[0].tokens[0].derivation_path().is_none());
    }
}
