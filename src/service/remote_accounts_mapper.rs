//! 账户同步接口的 DTO 与映射
//!
//! - 本地账户 → 请求体（账户列表 + 扁平化代币列表）
//! - 响应体 → 本地账户 + 未归属账户的旧版代币

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        AccountIcon, BlockchainNetwork, BlockchainNetworkContainer, DerivationIndex,
        DerivationPath, DerivationPathError, StoredCryptoAccount, StoredToken,
        SupportedBlockchains, TokensGrouping, TokensSorting,
    },
    utils::normalize_contract_address,
};

const API_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RemoteAccountsMappingError {
    #[error("Invalid derivation path for network {network_id}: {source}")]
    InvalidDerivationPath {
        network_id: String,
        #[source]
        source: DerivationPathError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    None,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Manual,
    Balance,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━ 请求 ━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountsRequest {
    pub accounts: Vec<AccountRequestDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequestDto {
    pub id: String,
    pub name: Option<String>,
    pub icon: String,
    pub icon_color: String,
    pub derivation: DerivationIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTokensRequest {
    pub tokens: Vec<TokenRequestDto>,
    pub group: GroupType,
    pub sort: SortType,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequestDto {
    pub id: Option<String>,
    pub account_id: String,
    pub network_id: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub derivation_path: Option<String>,
    pub contract_address: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━ 响应 ━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<AccountResponseDto>,
    #[serde(default)]
    pub unassigned_tokens: Vec<TokenResponseDto>,
    pub wallet: WalletResponseDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponseDto {
    pub derivation: DerivationIndex,
    #[serde(default)]
    pub name: Option<String>,
    pub icon: String,
    pub icon_color: String,
    #[serde(default)]
    pub tokens: Vec<TokenResponseDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseDto {
    #[serde(default)]
    pub id: Option<String>,
    pub network_id: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    #[serde(default)]
    pub derivation_path: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponseDto {
    #[serde(default)]
    pub group: Option<GroupType>,
    #[serde(default)]
    pub sort: Option<SortType>,
    #[serde(default)]
    pub total_accounts: u32,
    #[serde(default)]
    pub total_archived_accounts: u32,
}

/// 账户数量统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountCounters {
    pub archived: u32,
    pub total: u32,
}

/// 映射后的远端账户信息
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCryptoAccountsInfo {
    pub counters: AccountCounters,
    pub accounts: Vec<StoredCryptoAccount>,
    /// 旧版本保存、尚未归属任何账户的代币
    pub legacy_tokens: Vec<StoredToken>,
}

pub struct RemoteAccountsMapper {
    supported_blockchains: SupportedBlockchains,
    wallet_id: String,
}

impl RemoteAccountsMapper {
    pub fn new(supported_blockchains: SupportedBlockchains, wallet_id: impl Into<String>) -> Self {
        Self {
            supported_blockchains,
            wallet_id: wallet_id.into(),
        }
    }

    /// 远端账户 ID：`{wallet_id}:{derivation_index}`
    pub fn remote_account_id(&self, account: &StoredCryptoAccount) -> String {
        format!("{}:{}", self.wallet_id, account.derivation_index)
    }

    pub fn map_request(
        &self,
        accounts: &[StoredCryptoAccount],
    ) -> (AccountsRequest, UserTokensRequest) {
        let mut tokens = Vec::new();

        let accounts_dto = accounts
            .iter()
            .map(|account| {
                let account_id = self.remote_account_id(account);
                tokens.extend(
                    account
                        .tokens
                        .iter()
                        .map(|token| map_token_request(token, &account_id)),
                );

                AccountRequestDto {
                    id: account_id,
                    name: account.name.clone(),
                    icon: account.icon.name.clone(),
                    icon_color: account.icon.color.clone(),
                    derivation: account.derivation_index,
                }
            })
            .collect();

        // 所有账户共用同一分组/排序设置
        let group = match accounts.first().map(|a| a.grouping) {
            Some(TokensGrouping::ByBlockchainNetwork) => GroupType::Network,
            Some(TokensGrouping::None) | None => GroupType::None,
        };
        let sort = match accounts.first().map(|a| a.sorting) {
            Some(TokensSorting::ByBalance) => SortType::Balance,
            Some(TokensSorting::Manual) | None => SortType::Manual,
        };

        (
            AccountsRequest {
                accounts: accounts_dto,
            },
            UserTokensRequest {
                tokens,
                group,
                sort,
                version: API_VERSION,
            },
        )
    }

    pub fn map_response(&self, response: AccountsResponse) -> RemoteCryptoAccountsInfo {
        let grouping = match response.wallet.group {
            Some(GroupType::Network) => TokensGrouping::ByBlockchainNetwork,
            Some(GroupType::None) | None => TokensGrouping::None,
        };
        let sorting = match response.wallet.sort {
            Some(SortType::Balance) => TokensSorting::ByBalance,
            Some(SortType::Manual) | None => TokensSorting::Manual,
        };

        let accounts = response
            .accounts
            .into_iter()
            .map(|dto| StoredCryptoAccount {
                derivation_index: dto.derivation,
                name: dto.name,
                icon: AccountIcon {
                    name: dto.icon,
                    color: dto.icon_color,
                },
                tokens: self.map_tokens(dto.tokens),
                grouping,
                sorting,
            })
            .collect();

        RemoteCryptoAccountsInfo {
            counters: AccountCounters {
                archived: response.wallet.total_archived_accounts,
                total: response.wallet.total_accounts,
            },
            accounts,
            legacy_tokens: self.map_tokens(response.unassigned_tokens),
        }
    }

    fn map_tokens(&self, tokens: Vec<TokenResponseDto>) -> Vec<StoredToken> {
        let mut contracts_by_network: HashMap<BlockchainNetworkContainer, HashSet<String>> =
            HashMap::new();
        let mut seen = HashSet::new();

        tokens
            .into_iter()
            .filter_map(|dto| {
                let network = match self.map_network_container(&dto) {
                    Ok(network) => network,
                    Err(e) => {
                        tracing::warn!(token = ?dto.id, error = %e, "Unable to map remote token");
                        return None;
                    }
                };

                let token = StoredToken {
                    id: dto.id,
                    name: dto.name,
                    symbol: dto.symbol,
                    decimal_count: dto.decimals,
                    blockchain_network: network,
                    contract_address: dto.contract_address,
                };

                if let Some(contract) = &token.contract_address {
                    let inserted = contracts_by_network
                        .entry(token.blockchain_network.clone())
                        .or_default()
                        .insert(normalize_contract_address(contract));

                    if !inserted {
                        tracing::warn!(
                            contract = %contract,
                            "Duplicate remote token discarded"
                        );
                        return None;
                    }
                }

                Some(token)
            })
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    fn map_network_container(
        &self,
        dto: &TokenResponseDto,
    ) -> Result<BlockchainNetworkContainer, RemoteAccountsMappingError> {
        let unknown = || BlockchainNetworkContainer::Unknown {
            network_id: dto.network_id.clone(),
            raw_derivation_path: dto.derivation_path.clone(),
        };

        let Some(blockchain) = self.supported_blockchains.blockchain(&dto.network_id) else {
            return Ok(unknown());
        };

        if !blockchain.can_handle_tokens() && dto.contract_address.is_some() {
            return Ok(unknown());
        }

        let derivation_path = dto
            .derivation_path
            .as_deref()
            .map(str::parse::<DerivationPath>)
            .transpose()
            .map_err(|source| RemoteAccountsMappingError::InvalidDerivationPath {
                network_id: dto.network_id.clone(),
                source,
            })?;

        Ok(BlockchainNetwork::new(blockchain, derivation_path).into())
    }
}

fn map_token_request(token: &StoredToken, account_id: &str) -> TokenRequestDto {
    let known = token.blockchain_network.known();

    let (id, name) = match known {
        Some(network) if !token.is_token() => (
            Some(network.blockchain.coin_id().to_string()),
            network.blockchain.display_name(),
        ),
        _ => (token.id.clone(), token.name.clone()),
    };

    let derivation_path = match &token.blockchain_network {
        BlockchainNetworkContainer::Known(network) => {
            network.derivation_path.as_ref().map(|p| p.to_string())
        }
        BlockchainNetworkContainer::Unknown {
            raw_derivation_path,
            ..
        } => raw_derivation_path.clone(),
    };

    TokenRequestDto {
        id,
        account_id: account_id.to_string(),
        network_id: token.blockchain_network.network_id().to_string(),
        name,
        symbol: token.symbol.clone(),
        decimals: token.decimal_count,
        derivation_path,
        contract_address: token.contract_address.clone(),
    }
}
