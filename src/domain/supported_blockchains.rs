//! 支持的区块链注册表
//!
//! 按网络 ID 索引，供网络 ID → Blockchain 解析使用

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::blockchain::Blockchain;

/// 主网注册表（静态初始化）
static MAINNET_BY_NETWORK_ID: Lazy<HashMap<&'static str, Blockchain>> = Lazy::new(|| {
    Blockchain::all_mainnet_cases()
        .into_iter()
        .map(|blockchain| (blockchain.network_id(), blockchain))
        .collect()
});

/// 当前钱包可用的区块链集合
#[derive(Debug, Clone)]
pub struct SupportedBlockchains {
    by_network_id: HashMap<String, Blockchain>,
}

impl SupportedBlockchains {
    /// 由给定集合构造；网络 ID 冲突时后者覆盖前者
    pub fn new<I>(blockchains: I) -> Self
    where
        I: IntoIterator<Item = Blockchain>,
    {
        let by_network_id = blockchains
            .into_iter()
            .map(|blockchain| (blockchain.network_id().to_string(), blockchain))
            .collect();

        Self { by_network_id }
    }

    /// 全部主网链
    pub fn mainnet() -> Self {
        Self {
            by_network_id: MAINNET_BY_NETWORK_ID
                .iter()
                .map(|(id, blockchain)| (id.to_string(), *blockchain))
                .collect(),
        }
    }

    /// 全部主网链对应的测试网变体（无测试网的链保持主网）
    pub fn testnet() -> Self {
        Self::new(Blockchain::all_mainnet_cases().into_iter().map(to_testnet))
    }

    pub fn blockchain(&self, network_id: &str) -> Option<Blockchain> {
        self.by_network_id.get(network_id).copied()
    }

    pub fn contains(&self, blockchain: &Blockchain) -> bool {
        self.blockchain(blockchain.network_id()) == Some(*blockchain)
    }

    pub fn len(&self) -> usize {
        self.by_network_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_network_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Blockchain> + '_ {
        self.by_network_id.values().copied()
    }
}

impl Default for SupportedBlockchains {
    fn default() -> Self {
        Self::mainnet()
    }
}

fn to_testnet(blockchain: Blockchain) -> Blockchain {
    use Blockchain::*;

    match blockchain {
        Bitcoin { .. } => Bitcoin { testnet: true },
        Dash { .. } => Dash { testnet: true },
        Kaspa { .. } => Kaspa { testnet: true },
        Ethereum { .. } => Ethereum { testnet: true },
        EthereumClassic { .. } => EthereumClassic { testnet: true },
        Bsc { .. } => Bsc { testnet: true },
        Polygon { .. } => Polygon { testnet: true },
        Avalanche { .. } => Avalanche { testnet: true },
        Arbitrum { .. } => Arbitrum { testnet: true },
        Optimism { .. } => Optimism { testnet: true },
        Fantom { .. } => Fantom { testnet: true },
        Base { .. } => Base { testnet: true },
        ZkSync { .. } => ZkSync { testnet: true },
        Quai { .. } => Quai { testnet: true },
        Solana { .. } => Solana { testnet: true },
        Tron { .. } => Tron { testnet: true },
        Ton { .. } => Ton { testnet: true },
        Near { .. } => Near { testnet: true },
        Hedera { .. } => Hedera { testnet: true },
        Stellar { .. } => Stellar { testnet: true },
        Cosmos { .. } => Cosmos { testnet: true },
        Polkadot { .. } => Polkadot { testnet: true },
        Aptos { .. } => Aptos { testnet: true },
        Sui { .. } => Sui { testnet: true },
        Chia { .. } => Chia { testnet: true },
        Litecoin | Dogecoin | BitcoinCash | Gnosis | Cardano | Tezos | Xrp => blockchain,
    }
}
