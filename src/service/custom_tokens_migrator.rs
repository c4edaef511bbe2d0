//! 自定义代币迁移服务
//!
//! 没有目录 ID 的代币（用户手动添加的自定义代币）按 (链, 合约地址) 到代币目录中
//! 查找，命中后原位替换为目录中的规范描述。查询并发执行，全部完成后再统一写回。

use std::{collections::HashMap, sync::Arc};

use futures::future::join_all;

use super::token_catalog::{TokenCatalog, TokenMetadata};
use crate::{
    domain::{
        Blockchain, BlockchainNetwork, BlockchainNetworkContainer, StoredCryptoAccount, StoredToken,
    },
    utils::normalize_contract_address,
};

/// 查询键：链 + 小写合约地址
type LookupKey = (Blockchain, String);

struct CustomTokenLocation {
    account_index: usize,
    token_index: usize,
    network: BlockchainNetwork,
    key: LookupKey,
}

pub struct CustomTokensMigrator {
    catalog: Arc<dyn TokenCatalog>,
}

impl CustomTokensMigrator {
    pub fn new(catalog: Arc<dyn TokenCatalog>) -> Self {
        Self { catalog }
    }

    /// 迁移所有可识别的自定义代币，返回是否有代币被替换
    ///
    /// 单个查询失败只会让对应代币留待下次迁移
    pub async fn migrate_tokens_if_needed(&self, accounts: &mut [StoredCryptoAccount]) -> bool {
        let locations = collect_custom_tokens(accounts);
        if locations.is_empty() {
            return false;
        }

        // 同一 (链, 合约地址) 只查询一次，使用第一次出现时的地址（去掉两端空白）
        let mut unique: HashMap<LookupKey, String> = HashMap::new();
        for location in &locations {
            unique.entry(location.key.clone()).or_insert_with(|| {
                accounts[location.account_index].tokens[location.token_index]
                    .contract_address
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string()
            });
        }
        let keys: Vec<(LookupKey, String)> = unique.into_iter().collect();

        tracing::debug!(
            custom_tokens = locations.len(),
            lookups = keys.len(),
            "Resolving custom tokens against catalog"
        );

        let results = join_all(keys.iter().map(|((blockchain, normalized), contract)| {
            self.lookup_first_match(*blockchain, contract, normalized)
        }))
        .await;

        let resolved: HashMap<LookupKey, TokenMetadata> = keys
            .into_iter()
            .zip(results)
            .filter_map(|((key, _), metadata)| metadata.map(|metadata| (key, metadata)))
            .collect();

        let mut migrated = 0usize;
        for location in locations {
            let Some(metadata) = resolved.get(&location.key) else {
                continue;
            };

            accounts[location.account_index].tokens[location.token_index] = StoredToken {
                id: Some(metadata.id.clone()),
                name: metadata.name.clone(),
                symbol: metadata.symbol.clone(),
                decimal_count: metadata.decimal_count,
                blockchain_network: BlockchainNetworkContainer::Known(location.network),
                contract_address: Some(metadata.contract_address.clone()),
            };
            migrated += 1;
        }

        if migrated > 0 {
            tracing::info!(migrated, "✅ Custom tokens migrated to catalog tokens");
        }

        migrated > 0
    }

    /// `normalized_contract` 为 [`normalize_contract_address`] 的结果，用于比对目录返回的地址
    async fn lookup_first_match(
        &self,
        blockchain: Blockchain,
        contract_address: &str,
        normalized_contract: &str,
    ) -> Option<TokenMetadata> {
        match self.catalog.lookup_tokens(blockchain, contract_address).await {
            Ok(tokens) => tokens.into_iter().find(|token| {
                normalize_contract_address(&token.contract_address) == normalized_contract
            }),
            Err(e) => {
                tracing::warn!(
                    network = %blockchain.network_id(),
                    contract = %contract_address,
                    error = %e,
                    "Catalog lookup failed, custom token left as is"
                );
                None
            }
        }
    }
}

/// 收集已知网络上、带合约地址且没有目录 ID 的代币
fn collect_custom_tokens(accounts: &[StoredCryptoAccount]) -> Vec<CustomTokenLocation> {
    let mut locations = Vec::new();

    for (account_index, account) in accounts.iter().enumerate() {
        for (token_index, token) in account.tokens.iter().enumerate() {
            if !token.is_custom() {
                continue;
            }

            let (Some(network), Some(contract)) =
                (token.blockchain_network.known(), token.contract_address.as_ref())
            else {
                continue;
            };

            locations.push(CustomTokenLocation {
                account_index,
                token_index,
                network: network.clone(),
                key: (network.blockchain, normalize_contract_address(contract)),
            });
        }
    }

    locations
}
