//! 测试辅助模块
//! 提供测试数据构造与桩实现

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use cryptoaccounts::{
    domain::{
        Blockchain, BlockchainNetwork, BlockchainNetworkContainer, DerivationPath,
        StoredCryptoAccount, StoredToken,
    },
    service::{TokenCatalog, TokenMetadata},
};

pub const BTC: Blockchain = Blockchain::Bitcoin { testnet: false };
pub const ETH: Blockchain = Blockchain::Ethereum { testnet: false };
pub const SOL: Blockchain = Blockchain::Solana { testnet: false };

pub const MAIN_ACCOUNT_NAME: &str = "Main Account";

pub fn path(raw: &str) -> DerivationPath {
    raw.parse().expect("valid derivation path")
}

/// 目录中已知的代币
pub fn token(name: &str, blockchain: Blockchain, raw_path: Option<&str>) -> StoredToken {
    StoredToken {
        id: Some(name.to_lowercase()),
        name: name.to_string(),
        symbol: name.to_uppercase(),
        decimal_count: blockchain.decimal_count(),
        blockchain_network: BlockchainNetwork::new(blockchain, raw_path.map(path)).into(),
        contract_address: None,
    }
}

/// 用户手动添加的自定义代币
pub fn custom_token(blockchain: Blockchain, contract: &str, raw_path: Option<&str>) -> StoredToken {
    StoredToken {
        id: None,
        name: "Custom".to_string(),
        symbol: "CST".to_string(),
        decimal_count: 18,
        blockchain_network: BlockchainNetwork::new(blockchain, raw_path.map(path)).into(),
        contract_address: Some(contract.to_string()),
    }
}

/// 本版本不认识的网络上的代币
pub fn unknown_network_token(name: &str) -> StoredToken {
    StoredToken {
        id: None,
        name: name.to_string(),
        symbol: name.to_uppercase(),
        decimal_count: 8,
        blockchain_network: BlockchainNetworkContainer::Unknown {
            network_id: "future-chain".to_string(),
            raw_derivation_path: Some("m/44'/9999'/3'/0/0".to_string()),
        },
        contract_address: None,
    }
}

pub fn main_account(tokens: Vec<StoredToken>) -> StoredCryptoAccount {
    StoredCryptoAccount::new(0, None, tokens)
}

pub fn account(index: u32, name: &str, tokens: Vec<StoredToken>) -> StoredCryptoAccount {
    StoredCryptoAccount::new(index, Some(name.to_string()), tokens)
}

/// 所有账户中的代币（按名称排序），用于比较代币总量
pub fn all_token_names(accounts: &[StoredCryptoAccount]) -> Vec<String> {
    let mut names: Vec<String> = accounts
        .iter()
        .flat_map(|account| account.tokens.iter().map(|token| token.name.clone()))
        .collect();
    names.sort();
    names
}

pub fn token_names(account: &StoredCryptoAccount) -> Vec<&str> {
    account.tokens.iter().map(|t| t.name.as_str()).collect()
}

/// 固定响应的代币目录
pub struct StubCatalog {
    entries: Vec<(Blockchain, TokenMetadata)>,
    pub calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new(entries: Vec<(Blockchain, TokenMetadata)>) -> Self {
        Self {
            entries,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenCatalog for StubCatalog {
    async fn lookup_tokens(
        &self,
        blockchain: Blockchain,
        contract_address: &str,
    ) -> Result<Vec<TokenMetadata>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .entries
            .iter()
            .filter(|(chain, metadata)| {
                *chain == blockchain
                    && metadata.contract_address.eq_ignore_ascii_case(contract_address)
            })
            .map(|(_, metadata)| metadata.clone())
            .collect())
    }
}

pub fn usdc_metadata(contract: &str) -> TokenMetadata {
    TokenMetadata {
        id: "eth-usdc".to_string(),
        name: "USD Coin".to_string(),
        symbol: "USDC".to_string(),
        decimal_count: 6,
        contract_address: contract.to_string(),
    }
}
