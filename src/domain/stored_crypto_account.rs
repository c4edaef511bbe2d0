//! 持久化的加密账户模型
//!
//! 一个钱包包含若干账户，每个账户由派生索引唯一标识并持有一组有序代币。
//! 派生索引为 0 的账户即主账户（Main）。

use serde::{Deserialize, Serialize};

use super::{blockchain::Blockchain, derivation_path::DerivationPath};

/// 账户派生索引（派生路径中账户节点的原始值）
pub type DerivationIndex = u32;

/// 主账户的派生索引
pub const MAIN_ACCOUNT_DERIVATION_INDEX: DerivationIndex = 0;

pub fn is_main_account(derivation_index: DerivationIndex) -> bool {
    derivation_index == MAIN_ACCOUNT_DERIVATION_INDEX
}

/// 具备派生索引的账户
pub trait CryptoAccountIdentity {
    fn derivation_index(&self) -> DerivationIndex;

    fn is_main_account(&self) -> bool {
        is_main_account(self.derivation_index())
    }
}

/// 已识别的网络：链 + 可选的派生路径覆盖
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockchainNetwork {
    pub blockchain: Blockchain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation_path: Option<DerivationPath>,
}

impl BlockchainNetwork {
    pub fn new(blockchain: Blockchain, derivation_path: Option<DerivationPath>) -> Self {
        Self {
            blockchain,
            derivation_path,
        }
    }
}

/// 代币所在网络，可能是本版本无法识别的网络
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockchainNetworkContainer {
    Known(BlockchainNetwork),
    Unknown {
        network_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw_derivation_path: Option<String>,
    },
}

impl BlockchainNetworkContainer {
    pub fn known(&self) -> Option<&BlockchainNetwork> {
        match self {
            Self::Known(network) => Some(network),
            Self::Unknown { .. } => None,
        }
    }

    pub fn network_id(&self) -> &str {
        match self {
            Self::Known(network) => network.blockchain.network_id(),
            Self::Unknown { network_id, .. } => network_id,
        }
    }
}

impl From<BlockchainNetwork> for BlockchainNetworkContainer {
    fn from(network: BlockchainNetwork) -> Self {
        Self::Known(network)
    }
}

/// 账户中的一项资产（原生币或合约代币）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredToken {
    /// 目录 ID，`None` 表示待迁移的自定义代币
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub symbol: String,
    pub decimal_count: u32,
    pub blockchain_network: BlockchainNetworkContainer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl StoredToken {
    /// 链的原生币
    pub fn coin(network: BlockchainNetwork) -> Self {
        let blockchain = network.blockchain;
        Self {
            id: Some(blockchain.coin_id().to_string()),
            name: blockchain.display_name(),
            symbol: blockchain.currency_symbol().to_string(),
            decimal_count: blockchain.decimal_count(),
            blockchain_network: network.into(),
            contract_address: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_token(&self) -> bool {
        self.contract_address.is_some()
    }

    pub fn derivation_path(&self) -> Option<&DerivationPath> {
        self.blockchain_network
            .known()
            .and_then(|network| network.derivation_path.as_ref())
    }
}

/// 账户图标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIcon {
    pub name: String,
    pub color: String,
}

impl Default for AccountIcon {
    fn default() -> Self {
        Self {
            name: "letter".to_string(),
            color: "azure".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokensGrouping {
    #[default]
    None,
    ByBlockchainNetwork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokensSorting {
    #[default]
    Manual,
    ByBalance,
}

/// 钱包中的一个逻辑账户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCryptoAccount {
    pub derivation_index: DerivationIndex,
    /// `None` 表示使用主账户默认名称
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: AccountIcon,
    #[serde(default)]
    pub tokens: Vec<StoredToken>,
    #[serde(default)]
    pub grouping: TokensGrouping,
    #[serde(default)]
    pub sorting: TokensSorting,
}

impl StoredCryptoAccount {
    pub fn new(
        derivation_index: DerivationIndex,
        name: Option<String>,
        tokens: Vec<StoredToken>,
    ) -> Self {
        Self {
            derivation_index,
            name,
            icon: AccountIcon::default(),
            tokens,
            grouping: TokensGrouping::default(),
            sorting: TokensSorting::default(),
        }
    }
}

impl CryptoAccountIdentity for StoredCryptoAccount {
    fn derivation_index(&self) -> DerivationIndex {
        self.derivation_index
    }
}
