//! 账户间代币重新分配服务
//!
//! 账户的创建/删除与代币的添加相互独立：代币可能在所属账户出现之前就被添加，
//! 也可能因为客户端问题落在了错误的账户里。本服务根据代币自身的派生路径推断
//! 其真正归属的账户，并把代币移动过去；无法判断归属的代币保持原位。
//!
//! 流程：
//! 1. 按派生索引为每个账户建立分配目标
//! 2. 提取：逐个检查代币，归属其他已存在账户的代币移入对应目标
//! 3. 无移动且无外部代币时直接返回
//! 4. 回写：目标中积累的代币追加到对应账户末尾
//! 5. 外部代币：追加到归属账户，归属账户不存在的进入主账户，未知网络上的忽略
//! 6. 汇总 (来源, 目标账户名) 去重后返回

use std::collections::{HashMap, HashSet};

use crate::domain::{
    AccountDerivationPathHelper, BlockchainNetworkContainer, DerivationIndex, StoredCryptoAccount,
    StoredToken, MAIN_ACCOUNT_DERIVATION_INDEX,
};

/// 代币来源
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DistributionSource {
    /// 来自某个账户（`None` 为默认名称的账户）
    Account { name: Option<String> },
    /// 来自账户体系之外（例如旧版本保存的代币）
    External,
}

/// 一条对用户可见的移动记录
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedistributionPair {
    pub source: DistributionSource,
    pub destination_account_name: Option<String>,
}

/// 一次分配的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionResult {
    None,
    RedistributionHappened(Vec<RedistributionPair>),
}

impl DistributionResult {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn pairs(&self) -> &[RedistributionPair] {
        match self {
            Self::None => &[],
            Self::RedistributionHappened(pairs) => pairs,
        }
    }
}

#[derive(Debug)]
struct DistributionTarget {
    account_name: Option<String>,
    tokens: Vec<StoredToken>,
}

#[derive(Debug)]
struct RedistributionRecord {
    source: DistributionSource,
    to_account_derivation_index: DerivationIndex,
}

type Targets = HashMap<DerivationIndex, DistributionTarget>;

pub struct TokensDistributor;

impl TokensDistributor {
    /// 按派生路径把代币重新分配到正确的账户
    ///
    /// 重复调用是幂等的：第二次调用返回 [`DistributionResult::None`] 且不改变账户
    pub fn distribute_tokens(
        accounts: &mut [StoredCryptoAccount],
        additional_tokens: Vec<StoredToken>,
    ) -> DistributionResult {
        let mut targets = make_targets(accounts);
        let account_names: HashMap<DerivationIndex, Option<String>> = targets
            .iter()
            .map(|(index, target)| (*index, target.account_name.clone()))
            .collect();

        let mut records = extract_misplaced_tokens(accounts, &mut targets);

        if records.is_empty() && additional_tokens.is_empty() {
            return DistributionResult::None;
        }

        append_targets(accounts, &mut targets);
        records.extend(Self::add(additional_tokens, accounts));

        let mut seen = HashSet::new();
        let pairs: Vec<RedistributionPair> = records
            .into_iter()
            .filter_map(|record| {
                let destination = account_names.get(&record.to_account_derivation_index)?;
                Some(RedistributionPair {
                    source: record.source,
                    destination_account_name: destination.clone(),
                })
            })
            .filter(|pair| seen.insert(pair.clone()))
            .collect();

        if pairs.is_empty() {
            return DistributionResult::None;
        }

        tracing::info!(
            moves = pairs.len(),
            accounts = accounts.len(),
            "Tokens redistributed between accounts"
        );

        DistributionResult::RedistributionHappened(pairs)
    }

    /// 外部代币：归属账户存在则追加到该账户，否则进入主账户；未知网络上的代币忽略
    fn add(
        additional_tokens: Vec<StoredToken>,
        accounts: &mut [StoredCryptoAccount],
    ) -> Vec<RedistributionRecord> {
        if additional_tokens.is_empty() {
            return Vec::new();
        }

        let main_account_position = accounts
            .iter()
            .position(|account| account.derivation_index == MAIN_ACCOUNT_DERIVATION_INDEX);

        let mut targets = make_targets(accounts);
        let mut remaining = Vec::new();
        let mut records = Vec::new();
        let mut orphaned = 0usize;

        for token in additional_tokens {
            // 未知网络上的代币无法判断归属，不做处理
            let Some(index) = extract_account_derivation_index(&token, true) else {
                tracing::debug!(
                    token = %token.name,
                    network = %token.blockchain_network.network_id(),
                    "External token on unknown network ignored"
                );
                continue;
            };

            if let Some(target) = targets.get_mut(&index) {
                records.push(RedistributionRecord {
                    source: DistributionSource::External,
                    to_account_derivation_index: index,
                });
                target.tokens.push(token);
            } else if main_account_position.is_some() {
                records.push(RedistributionRecord {
                    source: DistributionSource::External,
                    to_account_derivation_index: MAIN_ACCOUNT_DERIVATION_INDEX,
                });
                remaining.push(token);
            } else {
                orphaned += 1;
            }
        }

        if orphaned > 0 {
            tracing::error!(
                orphaned,
                "Main account not found, external tokens without a home were dropped"
            );
            debug_assert!(
                orphaned == 0,
                "main account must exist when external tokens need a fallback home"
            );
        }

        append_targets(accounts, &mut targets);

        if let Some(position) = main_account_position {
            accounts[position].tokens.append(&mut remaining);
        }

        records
    }
}

fn make_targets(accounts: &[StoredCryptoAccount]) -> Targets {
    let mut targets = Targets::with_capacity(accounts.len());
    for account in accounts {
        targets
            .entry(account.derivation_index)
            .or_insert_with(|| DistributionTarget {
                account_name: account.name.clone(),
                tokens: Vec::new(),
            });
    }
    targets
}

/// 第一阶段：从各账户中取出归属其他已存在账户的代币
fn extract_misplaced_tokens(
    accounts: &mut [StoredCryptoAccount],
    targets: &mut Targets,
) -> Vec<RedistributionRecord> {
    let mut records = Vec::new();

    for account in accounts.iter_mut() {
        let tokens = std::mem::take(&mut account.tokens);
        let mut kept = Vec::with_capacity(tokens.len());

        for token in tokens {
            let target = extract_account_derivation_index(&token, false)
                .filter(|index| *index != account.derivation_index)
                .and_then(|index| targets.get_mut(&index).map(|target| (index, target)));

            match target {
                Some((index, target)) => {
                    tracing::debug!(
                        token = %token.name,
                        network = %token.blockchain_network.network_id(),
                        from = account.derivation_index,
                        to = index,
                        "Moving token to its derivation account"
                    );
                    records.push(RedistributionRecord {
                        source: DistributionSource::Account {
                            name: account.name.clone(),
                        },
                        to_account_derivation_index: index,
                    });
                    target.tokens.push(token);
                }
                None => kept.push(token),
            }
        }

        account.tokens = kept;
    }

    records
}

/// 第二阶段：把目标中积累的代币追加到账户末尾
///
/// 每个目标只会被取走一次，派生索引重复的账户不会收到重复代币
fn append_targets(accounts: &mut [StoredCryptoAccount], targets: &mut Targets) {
    for account in accounts.iter_mut() {
        if let Some(target) = targets.get_mut(&account.derivation_index) {
            account.tokens.append(&mut target.tokens);
        }
    }
}

/// 代币真正所属账户的派生索引
///
/// - 未知网络：`None`
/// - 有派生路径：账户节点的原始值；路径过短或链不支持账户时归入主账户
/// - 无派生路径：`fallback_to_main_account` 为真时归入主账户，否则 `None`
fn extract_account_derivation_index(
    token: &StoredToken,
    fallback_to_main_account: bool,
) -> Option<DerivationIndex> {
    let network = match &token.blockchain_network {
        BlockchainNetworkContainer::Known(network) => network,
        BlockchainNetworkContainer::Unknown { .. } => return None,
    };

    match &network.derivation_path {
        Some(path) => {
            let helper = AccountDerivationPathHelper::new(network.blockchain);
            match helper.extract_account_derivation_node(path) {
                Ok(node) => Some(node.raw_index()),
                Err(e) => {
                    tracing::debug!(
                        token = %token.name,
                        error = %e,
                        "Account node unavailable, token belongs to main account"
                    );
                    Some(MAIN_ACCOUNT_DERIVATION_INDEX)
                }
            }
        }
        None if fallback_to_main_account => Some(MAIN_ACCOUNT_DERIVATION_INDEX),
        None => None,
    }
}
