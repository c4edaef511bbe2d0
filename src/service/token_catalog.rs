//! 代币目录查询
//!
//! `TokenCatalog` 是迁移服务依赖的外部能力；`HttpTokenCatalog` 是基于 reqwest 的实现

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{config::CatalogConfig, domain::Blockchain, error::AccountsResult};

/// 目录中的代币元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub decimal_count: u32,
    pub contract_address: String,
}

/// 代币目录
#[async_trait]
pub trait TokenCatalog: Send + Sync {
    /// 按链和合约地址查询（合约地址不区分大小写）
    async fn lookup_tokens(
        &self,
        blockchain: Blockchain,
        contract_address: &str,
    ) -> Result<Vec<TokenMetadata>>;
}

/// `/coins` 接口响应
#[derive(Debug, Deserialize)]
struct CoinsResponse {
    #[serde(default)]
    coins: Vec<CoinDto>,
}

#[derive(Debug, Deserialize)]
struct CoinDto {
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    networks: Vec<CoinNetworkDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinNetworkDto {
    network_id: String,
    #[serde(default)]
    contract_address: Option<String>,
    #[serde(default)]
    decimal_count: Option<u32>,
}

/// HTTP 代币目录客户端
pub struct HttpTokenCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTokenCatalog {
    pub fn new(config: &CatalogConfig) -> AccountsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TokenCatalog for HttpTokenCatalog {
    async fn lookup_tokens(
        &self,
        blockchain: Blockchain,
        contract_address: &str,
    ) -> Result<Vec<TokenMetadata>> {
        let network_id = blockchain.network_id();
        let url = format!("{}/coins", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("networkIds", network_id),
                ("contractAddress", contract_address),
                ("active", "true"),
            ])
            .send()
            .await
            .with_context(|| format!("Catalog request failed: {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Catalog API error: {}", response.status());
        }

        let body: CoinsResponse = response
            .json()
            .await
            .context("Failed to parse catalog response")?;

        Ok(map_coins(body, network_id, contract_address))
    }
}

fn map_coins(body: CoinsResponse, network_id: &str, contract_address: &str) -> Vec<TokenMetadata> {
    body.coins
        .into_iter()
        .flat_map(|coin| {
            let CoinDto {
                id,
                name,
                symbol,
                networks,
            } = coin;

            networks.into_iter().filter_map(move |network| {
                let address = network.contract_address?;
                if network.network_id != network_id
                    || !address.eq_ignore_ascii_case(contract_address)
                {
                    return None;
                }

                Some(TokenMetadata {
                    id: id.clone(),
                    name: name.clone(),
                    symbol: symbol.clone(),
                    decimal_count: network.decimal_count.unwrap_or(0),
                    contract_address: address,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_coins_filters_network_and_contract() {
        let body: CoinsResponse = serde_json::from_str(
            r#"{
                "coins": [{
                    "id": "usd-coin",
                    "name": "USD Coin",
                    "symbol": "USDC",
                    "networks": [
                        {"networkId": "ethereum", "contractAddress": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "decimalCount": 6},
                        {"networkId": "polygon-pos", "contractAddress": "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359", "decimalCount": 6},
                        {"networkId": "ethereum"}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let tokens = map_coins(
            body,
            "ethereum",
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        );

        assert_eq!(
            tokens,
            vec![TokenMetadata {
                id: "usd-coin".into(),
                name: "USD Coin".into(),
                symbol: "USDC".into(),
                decimal_count: 6,
                contract_address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into(),
            }]
        );
    }

    #[test]
    fn test_empty_response() {
        let body: CoinsResponse = serde_json::from_str("{}").unwrap();
        assert!(map_coins(body, "ethereum", "0x1").is_empty());
    }

    #[test]
    fn test_client_construction() {
        let config = CatalogConfig {
            base_url: "https://api.example.com/v1/".into(),
            timeout_secs: 5,
        };
        let catalog = HttpTokenCatalog::new(&config).unwrap();
        assert_eq!(catalog.base_url, "https://api.example.com/v1");
    }
}
