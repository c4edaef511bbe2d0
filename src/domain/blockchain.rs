//! 区块链枚举模块
//!
//! 定义钱包支持的全部区块链，以及账户引擎需要的链属性：
//! 曲线类型、EVM 链 ID、展示名称、网络 ID、默认派生路径

use serde::{Deserialize, Serialize};

use super::derivation_path::{Bip44, DerivationPath};

/// 加密曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipticCurve {
    /// secp256k1 (Bitcoin, Ethereum 及 EVM 系列, Tron, Cosmos)
    Secp256k1,
    /// ed25519 (Cardano, Polkadot)
    Ed25519,
    /// ed25519 SLIP-0010，仅支持硬化派生 (Solana, TON, NEAR, Stellar ...)
    Ed25519Slip0010,
    /// BLS12-381 G2 AUG (Chia)
    Bls12381G2Aug,
}

impl EllipticCurve {
    /// 曲线是否支持 HD 派生
    pub fn supports_derivation(&self) -> bool {
        match self {
            Self::Secp256k1 | Self::Ed25519 | Self::Ed25519Slip0010 => true,
            Self::Bls12381G2Aug => false,
        }
    }
}

/// 支持的区块链
///
/// 序列化形式：`{"key": "ethereum", "testnet": false}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "key", rename_all = "snake_case")]
pub enum Blockchain {
    // ━━━━━━━━━━━━━━━━━━━━━━━━━ UTXO ━━━━━━━━━━━━━━━━━━━━━━━━━
    Bitcoin {
        #[serde(default)]
        testnet: bool,
    },
    Litecoin,
    Dogecoin,
    BitcoinCash,
    Dash {
        #[serde(default)]
        testnet: bool,
    },
    Kaspa {
        #[serde(default)]
        testnet: bool,
    },

    // ━━━━━━━━━━━━━━━━━━━━━━━━━ EVM ━━━━━━━━━━━━━━━━━━━━━━━━━
    Ethereum {
        #[serde(default)]
        testnet: bool,
    },
    EthereumClassic {
        #[serde(default)]
        testnet: bool,
    },
    Bsc {
        #[serde(default)]
        testnet: bool,
    },
    Polygon {
        #[serde(default)]
        testnet: bool,
    },
    Avalanche {
        #[serde(default)]
        testnet: bool,
    },
    Arbitrum {
        #[serde(default)]
        testnet: bool,
    },
    Optimism {
        #[serde(default)]
        testnet: bool,
    },
    Gnosis,
    Fantom {
        #[serde(default)]
        testnet: bool,
    },
    Base {
        #[serde(default)]
        testnet: bool,
    },
    ZkSync {
        #[serde(default)]
        testnet: bool,
    },
    Quai {
        #[serde(default)]
        testnet: bool,
    },

    // ━━━━━━━━━━━━━━━━━━━━━━━━━ 其他 ━━━━━━━━━━━━━━━━━━━━━━━━━
    Solana {
        #[serde(default)]
        testnet: bool,
    },
    Cardano,
    Tezos,
    Tron {
        #[serde(default)]
        testnet: bool,
    },
    Ton {
        #[serde(default)]
        testnet: bool,
    },
    Near {
        #[serde(default)]
        testnet: bool,
    },
    Hedera {
        #[serde(default)]
        testnet: bool,
    },
    Xrp,
    Stellar {
        #[serde(default)]
        testnet: bool,
    },
    Cosmos {
        #[serde(default)]
        testnet: bool,
    },
    Polkadot {
        #[serde(default)]
        testnet: bool,
    },
    Aptos {
        #[serde(default)]
        testnet: bool,
    },
    Sui {
        #[serde(default)]
        testnet: bool,
    },
    Chia {
        #[serde(default)]
        testnet: bool,
    },
}

impl Blockchain {
    pub fn is_testnet(&self) -> bool {
        match *self {
            Self::Bitcoin { testnet }
            | Self::Dash { testnet }
            | Self::Kaspa { testnet }
            | Self::Ethereum { testnet }
            | Self::EthereumClassic { testnet }
            | Self::Bsc { testnet }
            | Self::Polygon { testnet }
            | Self::Avalanche { testnet }
            | Self::Arbitrum { testnet }
            | Self::Optimism { testnet }
            | Self::Fantom { testnet }
            | Self::Base { testnet }
            | Self::ZkSync { testnet }
            | Self::Quai { testnet }
            | Self::Solana { testnet }
            | Self::Tron { testnet }
            | Self::Ton { testnet }
            | Self::Near { testnet }
            | Self::Hedera { testnet }
            | Self::Stellar { testnet }
            | Self::Cosmos { testnet }
            | Self::Polkadot { testnet }
            | Self::Aptos { testnet }
            | Self::Sui { testnet }
            | Self::Chia { testnet } => testnet,
            Self::Litecoin
            | Self::Dogecoin
            | Self::BitcoinCash
            | Self::Gnosis
            | Self::Cardano
            | Self::Tezos
            | Self::Xrp => false,
        }
    }

    pub fn curve(&self) -> EllipticCurve {
        match self {
            Self::Cardano | Self::Polkadot { .. } => EllipticCurve::Ed25519,
            Self::Solana { .. }
            | Self::Tezos
            | Self::Ton { .. }
            | Self::Near { .. }
            | Self::Hedera { .. }
            | Self::Stellar { .. }
            | Self::Aptos { .. }
            | Self::Sui { .. } => EllipticCurve::Ed25519Slip0010,
            Self::Chia { .. } => EllipticCurve::Bls12381G2Aug,
            _ => EllipticCurve::Secp256k1,
        }
    }

    /// EIP-155 链 ID，非 EVM 链返回 `None`
    pub fn chain_id(&self) -> Option<u64> {
        let testnet = self.is_testnet();
        let id = match self {
            Self::Ethereum { .. } => pick(testnet, 5, 1),
            Self::EthereumClassic { .. } => pick(testnet, 6, 61),
            Self::Bsc { .. } => pick(testnet, 97, 56),
            Self::Polygon { .. } => pick(testnet, 80001, 137),
            Self::Avalanche { .. } => pick(testnet, 43113, 43114),
            Self::Arbitrum { .. } => pick(testnet, 421613, 42161),
            Self::Optimism { .. } => pick(testnet, 420, 10),
            Self::Gnosis => 100,
            Self::Fantom { .. } => pick(testnet, 4002, 250),
            Self::Base { .. } => pick(testnet, 84532, 8453),
            Self::ZkSync { .. } => pick(testnet, 300, 324),
            Self::Quai { .. } => pick(testnet, 15000, 9),
            _ => return None,
        };
        Some(id)
    }

    pub fn is_evm(&self) -> bool {
        self.chain_id().is_some()
    }

    /// 用户可见的链名称，测试网追加 " Testnet"
    pub fn display_name(&self) -> String {
        let name = match self {
            Self::Bitcoin { .. } => "Bitcoin",
            Self::Litecoin => "Litecoin",
            Self::Dogecoin => "Dogecoin",
            Self::BitcoinCash => "Bitcoin Cash",
            Self::Dash { .. } => "Dash",
            Self::Kaspa { .. } => "Kaspa",
            Self::Ethereum { .. } => "Ethereum",
            Self::EthereumClassic { .. } => "Ethereum Classic",
            Self::Bsc { .. } => "BNB Smart Chain",
            Self::Polygon { .. } => "Polygon",
            Self::Avalanche { .. } => "Avalanche C-Chain",
            Self::Arbitrum { .. } => "Arbitrum One",
            Self::Optimism { .. } => "Optimistic Ethereum",
            Self::Gnosis => "Gnosis Chain",
            Self::Fantom { testnet: false } => "Fantom Opera",
            Self::Fantom { testnet: true } => "Fantom",
            Self::Base { .. } => "Base",
            Self::ZkSync { .. } => "zkSync Era",
            Self::Quai { .. } => "Quai Network",
            Self::Solana { .. } => "Solana",
            Self::Cardano => "Cardano",
            Self::Tezos => "Tezos",
            Self::Tron { .. } => "Tron",
            Self::Ton { .. } => "TON",
            Self::Near { .. } => "NEAR Protocol",
            Self::Hedera { .. } => "Hedera",
            Self::Xrp => "XRP Ledger",
            Self::Stellar { .. } => "Stellar",
            Self::Cosmos { .. } => "Cosmos",
            Self::Polkadot { .. } => "Polkadot",
            Self::Aptos { .. } => "Aptos",
            Self::Sui { .. } => "Sui",
            Self::Chia { .. } => "Chia Network",
        };

        if self.is_testnet() {
            format!("{} Testnet", name)
        } else {
            name.to_string()
        }
    }

    /// 服务端同步与代币目录查询使用的网络 ID（主网与测试网相同）
    pub fn network_id(&self) -> &'static str {
        match self {
            Self::Bitcoin { .. } => "bitcoin",
            Self::Litecoin => "litecoin",
            Self::Dogecoin => "dogecoin",
            Self::BitcoinCash => "bitcoin-cash",
            Self::Dash { .. } => "dash",
            Self::Kaspa { .. } => "kaspa",
            Self::Ethereum { .. } => "ethereum",
            Self::EthereumClassic { .. } => "ethereum-classic",
            Self::Bsc { .. } => "binance-smart-chain",
            Self::Polygon { .. } => "polygon-pos",
            Self::Avalanche { .. } => "avalanche",
            Self::Arbitrum { .. } => "arbitrum-one",
            Self::Optimism { .. } => "optimistic-ethereum",
            Self::Gnosis => "xdai",
            Self::Fantom { .. } => "fantom",
            Self::Base { .. } => "base",
            Self::ZkSync { .. } => "zksync",
            Self::Quai { .. } => "quai-network",
            Self::Solana { .. } => "solana",
            Self::Cardano => "cardano",
            Self::Tezos => "tezos",
            Self::Tron { .. } => "tron",
            Self::Ton { .. } => "the-open-network",
            Self::Near { .. } => "near-protocol",
            Self::Hedera { .. } => "hedera-hashgraph",
            Self::Xrp => "xrp",
            Self::Stellar { .. } => "stellar",
            Self::Cosmos { .. } => "cosmos",
            Self::Polkadot { .. } => "polkadot",
            Self::Aptos { .. } => "aptos",
            Self::Sui { .. } => "sui",
            Self::Chia { .. } => "chia",
        }
    }

    /// 原生币在代币目录中的 ID
    pub fn coin_id(&self) -> &'static str {
        match self {
            Self::Xrp => "ripple",
            Self::Bsc { .. } => "binancecoin",
            Self::Polygon { .. } => "polygon-ecosystem-token",
            Self::Avalanche { .. } => "avalanche-2",
            Self::Near { .. } => "near",
            Self::Base { .. } => "base-ethereum",
            Self::ZkSync { .. } => "zksync-ethereum",
            _ => self.network_id(),
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Self::Bitcoin { .. } => "BTC",
            Self::Litecoin => "LTC",
            Self::Dogecoin => "DOGE",
            Self::BitcoinCash => "BCH",
            Self::Dash { .. } => "DASH",
            Self::Kaspa { .. } => "KAS",
            Self::Ethereum { .. }
            | Self::Arbitrum { .. }
            | Self::Optimism { .. }
            | Self::Base { .. }
            | Self::ZkSync { .. } => "ETH",
            Self::EthereumClassic { .. } => "ETC",
            Self::Bsc { .. } => "BNB",
            Self::Polygon { .. } => "POL",
            Self::Avalanche { .. } => "AVAX",
            Self::Gnosis => "xDAI",
            Self::Fantom { .. } => "FTM",
            Self::Quai { .. } => "QUAI",
            Self::Solana { .. } => "SOL",
            Self::Cardano => "ADA",
            Self::Tezos => "XTZ",
            Self::Tron { .. } => "TRX",
            Self::Ton { .. } => "TON",
            Self::Near { .. } => "NEAR",
            Self::Hedera { .. } => "HBAR",
            Self::Xrp => "XRP",
            Self::Stellar { .. } => "XLM",
            Self::Cosmos { .. } => "ATOM",
            Self::Polkadot { testnet: false } => "DOT",
            Self::Polkadot { testnet: true } => "WND",
            Self::Aptos { .. } => "APT",
            Self::Sui { .. } => "SUI",
            Self::Chia { testnet: false } => "XCH",
            Self::Chia { testnet: true } => "TXCH",
        }
    }

    pub fn decimal_count(&self) -> u32 {
        match self {
            Self::Bitcoin { .. }
            | Self::Litecoin
            | Self::Dogecoin
            | Self::BitcoinCash
            | Self::Dash { .. }
            | Self::Kaspa { .. }
            | Self::Hedera { .. }
            | Self::Aptos { .. } => 8,
            Self::Solana { .. } | Self::Ton { .. } | Self::Sui { .. } => 9,
            Self::Cardano | Self::Tezos | Self::Tron { .. } | Self::Xrp | Self::Cosmos { .. } => 6,
            Self::Stellar { .. } => 7,
            Self::Polkadot { testnet: false } => 10,
            Self::Polkadot { testnet: true } | Self::Chia { .. } => 12,
            Self::Near { .. } => 24,
            _ => 18,
        }
    }

    /// SLIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        match self {
            Self::Bitcoin { .. } => 0,
            Self::Litecoin => 2,
            Self::Dogecoin => 3,
            Self::Dash { .. } => 5,
            Self::BitcoinCash => 145,
            Self::Kaspa { .. } => 111111,
            Self::EthereumClassic { .. } => 61,
            Self::Quai { .. } => 994,
            Self::Solana { .. } => 501,
            Self::Cardano => 1815,
            Self::Tezos => 1729,
            Self::Tron { .. } => 195,
            Self::Ton { .. } => 607,
            Self::Near { .. } => 397,
            Self::Hedera { .. } => 3030,
            Self::Xrp => 144,
            Self::Stellar { .. } => 148,
            Self::Cosmos { .. } => 118,
            Self::Polkadot { .. } => 354,
            Self::Aptos { .. } => 637,
            Self::Sui { .. } => 784,
            Self::Chia { .. } => 8444,
            _ => 60,
        }
    }

    /// 能否持有合约代币
    pub fn can_handle_tokens(&self) -> bool {
        if self.is_evm() {
            return true;
        }

        matches!(
            self,
            Self::Solana { .. }
                | Self::Tron { .. }
                | Self::Ton { .. }
                | Self::Cardano
                | Self::Hedera { .. }
                | Self::Kaspa { .. }
        )
    }

    /// 主账户（账户 0）的默认派生路径
    ///
    /// 曲线不支持派生时返回 `None`；测试网统一使用 coin type 1
    pub fn derivation_path(&self) -> Option<DerivationPath> {
        if !self.curve().supports_derivation() {
            return None;
        }

        if self.is_testnet() {
            return Some(Bip44::new(1).build_path());
        }

        let path = match self.curve() {
            EllipticCurve::Ed25519Slip0010 => Bip44::new(self.coin_type()).build_account_path(),
            _ if matches!(self, Self::Cardano) => {
                Bip44::new(self.coin_type()).with_purpose(1852).build_path()
            }
            _ => Bip44::new(self.coin_type()).build_path(),
        };
        Some(path)
    }

    /// 全部主网变体
    pub fn all_mainnet_cases() -> Vec<Blockchain> {
        vec![
            Self::Bitcoin { testnet: false },
            Self::Litecoin,
            Self::Dogecoin,
            Self::BitcoinCash,
            Self::Dash { testnet: false },
            Self::Kaspa { testnet: false },
            Self::Ethereum { testnet: false },
            Self::EthereumClassic { testnet: false },
            Self::Bsc { testnet: false },
            Self::Polygon { testnet: false },
            Self::Avalanche { testnet: false },
            Self::Arbitrum { testnet: false },
            Self::Optimism { testnet: false },
            Self::Gnosis,
            Self::Fantom { testnet: false },
            Self::Base { testnet: false },
            Self::ZkSync { testnet: false },
            Self::Quai { testnet: false },
            Self::Solana { testnet: false },
            Self::Cardano,
            Self::Tezos,
            Self::Tron { testnet: false },
            Self::Ton { testnet: false },
            Self::Near { testnet: false },
            Self::Hedera { testnet: false },
            Self::Xrp,
            Self::Stellar { testnet: false },
            Self::Cosmos { testnet: false },
            Self::Polkadot { testnet: false },
            Self::Aptos { testnet: false },
            Self::Sui { testnet: false },
            Self::Chia { testnet: false },
        ]
    }
}

fn pick(testnet: bool, testnet_value: u64, mainnet_value: u64) -> u64 {
    if testnet {
        testnet_value
    } else {
        mainnet_value
    }
}
