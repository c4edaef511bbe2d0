//! 账户名称唯一性检查

use std::collections::HashSet;

use crate::{domain::StoredCryptoAccount, utils::normalize_name};

/// 名称比较去掉两端空白且不区分大小写
pub struct NameUniquenessChecker {
    existing_names: HashSet<String>,
}

impl NameUniquenessChecker {
    /// `default_account_name` 仅在有账户使用默认名称（`name == None`）时参与比较
    pub fn new(accounts: &[StoredCryptoAccount], default_account_name: &str) -> Self {
        let existing_names = accounts
            .iter()
            .map(|account| {
                normalize_name(account.name.as_deref().unwrap_or(default_account_name))
            })
            .collect();

        Self { existing_names }
    }

    pub fn is_name_unique(&self, candidate: &str) -> bool {
        !self.existing_names.contains(&normalize_name(candidate))
    }
}
