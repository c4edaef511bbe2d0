//! 默认账户构造
//!
//! 新钱包首次启动时生成主账户

use crate::domain::{
    Blockchain, BlockchainNetwork, StoredCryptoAccount, StoredToken, MAIN_ACCOUNT_DERIVATION_INDEX,
};

pub struct DefaultAccountFactory {
    default_blockchains: Vec<Blockchain>,
    hd_wallets_supported: bool,
}

impl DefaultAccountFactory {
    pub fn new(default_blockchains: Vec<Blockchain>, hd_wallets_supported: bool) -> Self {
        Self {
            default_blockchains,
            hd_wallets_supported,
        }
    }

    /// 构造主账户；`default_tokens_override` 非空时直接使用，否则为默认链生成原生币
    pub fn make_default_account(
        &self,
        default_tokens_override: Vec<StoredToken>,
    ) -> StoredCryptoAccount {
        let tokens = if default_tokens_override.is_empty() {
            self.default_tokens()
        } else {
            default_tokens_override
        };

        StoredCryptoAccount::new(MAIN_ACCOUNT_DERIVATION_INDEX, None, tokens)
    }

    fn default_tokens(&self) -> Vec<StoredToken> {
        self.default_blockchains
            .iter()
            .map(|blockchain| {
                let derivation_path = if self.hd_wallets_supported {
                    blockchain.derivation_path()
                } else {
                    None
                };
                StoredToken::coin(BlockchainNetwork::new(*blockchain, derivation_path))
            })
            .collect()
    }
}
