//! 账户派生路径辅助
//!
//! 不同链在派生层级中表示"账户"的位置不同：
//! - 标准 BIP44 布局使用第 2 位（account'）
//! - 标准以太坊路径 `m/44'/60'/...` 以地址索引（第 4 位）区分账户
//! - Quai、Tezos、Cardano、Solana、Tron 固定使用第 2 位
//!
//! 所有按链计算账户节点的逻辑集中在这里，分发器和上层调用方只依赖本模块。

use std::collections::HashSet;

use thiserror::Error;

use super::{
    blockchain::Blockchain,
    derivation_path::{DerivationNode, DerivationPath},
};

/// BIP44 account' 节点位置
const ACCOUNT_NODE_POSITION: usize = 2;
/// BIP44 address_index 节点位置
const ADDRESS_INDEX_NODE_POSITION: usize = 4;

const BIP44_PURPOSE: DerivationNode = DerivationNode::Hardened(44);
const ETHEREUM_COIN_TYPE: DerivationNode = DerivationNode::Hardened(60);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountDerivationPathError {
    #[error("{blockchain}: derivation path has {actual} nodes, at least {required} required")]
    InsufficientNodes {
        required: usize,
        actual: usize,
        blockchain: String,
    },
    #[error("Accounts are not available for {0}")]
    AccountsUnavailableForBlockchain(String),
}

/// 针对单条链的账户派生路径计算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountDerivationPathHelper {
    blockchain: Blockchain,
}

impl AccountDerivationPathHelper {
    pub fn new(blockchain: Blockchain) -> Self {
        Self { blockchain }
    }

    pub fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    /// 该链能否拥有多个账户
    ///
    /// 新增链变体时必须在这里显式归类
    pub fn are_accounts_available_for_blockchain(&self) -> bool {
        use Blockchain::*;

        match self.blockchain {
            Chia { .. } => false,
            Bitcoin { .. }
            | Litecoin
            | Dogecoin
            | BitcoinCash
            | Dash { .. }
            | Kaspa { .. }
            | Ethereum { .. }
            | EthereumClassic { .. }
            | Bsc { .. }
            | Polygon { .. }
            | Avalanche { .. }
            | Arbitrum { .. }
            | Optimism { .. }
            | Gnosis
            | Fantom { .. }
            | Base { .. }
            | ZkSync { .. }
            | Quai { .. }
            | Solana { .. }
            | Cardano
            | Tezos
            | Tron { .. }
            | Ton { .. }
            | Near { .. }
            | Hedera { .. }
            | Xrp
            | Stellar { .. }
            | Cosmos { .. }
            | Polkadot { .. }
            | Aptos { .. }
            | Sui { .. } => true,
        }
    }

    /// 账户节点在路径中的位置
    ///
    /// 不检查账户可用性，由 [`Self::extract_account_derivation_node`] 负责
    pub fn account_derivation_node_index(
        &self,
        path: &DerivationPath,
    ) -> Result<usize, AccountDerivationPathError> {
        let position = self.account_node_position(path);
        let required = position + 1;

        if path.len() < required {
            return Err(AccountDerivationPathError::InsufficientNodes {
                required,
                actual: path.len(),
                blockchain: self.blockchain.display_name(),
            });
        }

        Ok(position)
    }

    /// 取出账户节点（先检查该链是否支持账户）
    pub fn extract_account_derivation_node(
        &self,
        path: &DerivationPath,
    ) -> Result<DerivationNode, AccountDerivationPathError> {
        if !self.are_accounts_available_for_blockchain() {
            return Err(AccountDerivationPathError::AccountsUnavailableForBlockchain(
                self.blockchain.display_name(),
            ));
        }

        let position = self.account_derivation_node_index(path)?;
        Ok(path.nodes()[position])
    }

    /// 返回账户节点替换为 `account_index` 的新路径，保持节点硬化属性
    pub fn make_derivation_path(
        &self,
        path: &DerivationPath,
        account_index: u32,
    ) -> Result<DerivationPath, AccountDerivationPathError> {
        let position = self.account_derivation_node_index(path)?;

        path.with_raw_index_at(position, account_index)
            .ok_or_else(|| AccountDerivationPathError::InsufficientNodes {
                required: position + 1,
                actual: path.len(),
                blockchain: self.blockchain.display_name(),
            })
    }

    /// 过滤出支持多账户的链
    pub fn filter_blockchains_supporting_accounts(
        blockchains: &HashSet<Blockchain>,
    ) -> HashSet<Blockchain> {
        blockchains
            .iter()
            .copied()
            .filter(|blockchain| Self::new(*blockchain).are_accounts_available_for_blockchain())
            .collect()
    }

    fn account_node_position(&self, path: &DerivationPath) -> usize {
        use Blockchain::*;

        match self.blockchain {
            Quai { .. } | Tezos | Cardano | Solana { .. } | Tron { .. } => ACCOUNT_NODE_POSITION,
            blockchain if blockchain.is_evm() => {
                let nodes = path.nodes();
                let is_standard_ethereum_path = nodes.len() >= 2
                    && nodes[0] == BIP44_PURPOSE
                    && nodes[1] == ETHEREUM_COIN_TYPE;

                if is_standard_ethereum_path {
                    ADDRESS_INDEX_NODE_POSITION
                } else {
                    ACCOUNT_NODE_POSITION
                }
            }
            _ => ACCOUNT_NODE_POSITION,
        }
    }
}
