//! 账户感知的代币派生
//!
//! 向某个账户添加代币时：
//! 1. 把网络的派生路径改写到该账户的账户节点
//! 2. 校验派生路径确实属于该账户

use thiserror::Error;

use super::{
    account_derivation_path_helper::AccountDerivationPathHelper,
    blockchain::EllipticCurve,
    stored_crypto_account::{
        is_main_account, BlockchainNetwork, CryptoAccountIdentity, DerivationIndex,
    },
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenDerivationError {
    #[error("{token_name}: non-hardened derivation is not supported by this curve")]
    NonHardenedDerivationNotSupported { token_name: String },
    #[error("{token_name}: only the default derivation is supported")]
    DerivationNotSupported { token_name: String },
    #[error("{token_name}: account derivation path not found")]
    DerivationPathNotFound { token_name: String },
    #[error("{token_name}: account derivation node mismatch, expected {expected}, got {actual}")]
    AccountDerivationNodeMismatch {
        expected: DerivationIndex,
        actual: DerivationIndex,
        token_name: String,
    },
}

/// 单个账户的派生上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountTokenDerivation {
    derivation_index: DerivationIndex,
    /// 钱包是否支持 HD 派生
    hd_wallets_supported: bool,
}

impl AccountTokenDerivation {
    pub fn new(derivation_index: DerivationIndex, hd_wallets_supported: bool) -> Self {
        Self {
            derivation_index,
            hd_wallets_supported,
        }
    }

    /// 返回派生路径指向本账户的网络
    pub fn with_account_derivation(&self, network: &BlockchainNetwork) -> BlockchainNetwork {
        let helper = AccountDerivationPathHelper::new(network.blockchain);

        let base_path = match &network.derivation_path {
            Some(_) if self.is_main_account() => return network.clone(),
            Some(path) => path.clone(),
            None if !self.hd_wallets_supported => return network.clone(),
            None => match network.blockchain.derivation_path() {
                Some(path) => path,
                None => return network.clone(),
            },
        };

        let derivation_path = match helper.make_derivation_path(&base_path, self.derivation_index)
        {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    blockchain = %network.blockchain.display_name(),
                    path = %base_path,
                    error = %e,
                    "Failed to rewrite account derivation node, keeping original path"
                );
                base_path
            }
        };

        BlockchainNetwork::new(network.blockchain, Some(derivation_path))
    }

    /// 校验网络派生路径能否加入本账户
    pub fn validate(
        &self,
        network: &BlockchainNetwork,
        token_name: &str,
    ) -> Result<(), TokenDerivationError> {
        let blockchain = network.blockchain;
        let curve = blockchain.curve();
        let helper = AccountDerivationPathHelper::new(blockchain);
        let derivation_path = network.derivation_path.as_ref();

        if let Some(path) = derivation_path {
            if curve == EllipticCurve::Ed25519Slip0010
                && path.nodes().iter().any(|node| !node.is_hardened())
            {
                return Err(TokenDerivationError::NonHardenedDerivationNotSupported {
                    token_name: token_name.to_string(),
                });
            }

            // 部分链只支持主账户的默认派生
            if let Ok(node) = helper.extract_account_derivation_node(path) {
                if !is_main_account(node.raw_index()) && !curve.supports_derivation() {
                    return Err(TokenDerivationError::DerivationNotSupported {
                        token_name: token_name.to_string(),
                    });
                }
            }
        }

        // 主账户可以持有任意自定义派生
        if self.is_main_account() {
            return Ok(());
        }

        let node = derivation_path
            .and_then(|path| helper.extract_account_derivation_node(path).ok())
            .ok_or_else(|| TokenDerivationError::DerivationPathNotFound {
                token_name: token_name.to_string(),
            })?;

        if node.raw_index() != self.derivation_index {
            return Err(TokenDerivationError::AccountDerivationNodeMismatch {
                expected: self.derivation_index,
                actual: node.raw_index(),
                token_name: token_name.to_string(),
            });
        }

        Ok(())
    }
}

impl CryptoAccountIdentity for AccountTokenDerivation {
    fn derivation_index(&self) -> DerivationIndex {
        self.derivation_index
    }
}
