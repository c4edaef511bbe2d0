//! 账户可管理性检查
//!
//! 主账户可以管理任意链；其他账户只能管理支持多账户的链

use super::{
    account_derivation_path_helper::AccountDerivationPathHelper, blockchain::Blockchain,
    stored_crypto_account::CryptoAccountIdentity, supported_blockchains::SupportedBlockchains,
};

pub struct AccountManageabilityChecker;

impl AccountManageabilityChecker {
    pub fn can_manage_blockchain<A>(blockchain: Blockchain, account: &A) -> bool
    where
        A: CryptoAccountIdentity + ?Sized,
    {
        if account.is_main_account() {
            return true;
        }

        AccountDerivationPathHelper::new(blockchain).are_accounts_available_for_blockchain()
    }

    /// 网络 ID 无法解析时，非主账户一律不可管理
    pub fn can_manage_network<A>(
        network_id: &str,
        account: &A,
        supported_blockchains: &SupportedBlockchains,
    ) -> bool
    where
        A: CryptoAccountIdentity + ?Sized,
    {
        if account.is_main_account() {
            return true;
        }

        supported_blockchains
            .blockchain(network_id)
            .map(|blockchain| {
                AccountDerivationPathHelper::new(blockchain).are_accounts_available_for_blockchain()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stored_crypto_account::StoredCryptoAccount;

    fn main_account() -> StoredCryptoAccount {
        StoredCryptoAccount::new(0, None, vec![])
    }

    fn savings() -> StoredCryptoAccount {
        StoredCryptoAccount::new(2, Some("Savings".into()), vec![])
    }

    #[test]
    fn test_main_account_manages_everything() {
        let chia = Blockchain::Chia { testnet: false };
        let supported = SupportedBlockchains::mainnet();

        assert!(AccountManageabilityChecker::can_manage_blockchain(
            chia,
            &main_account()
        ));
        assert!(AccountManageabilityChecker::can_manage_network(
            "chia",
            &main_account(),
            &supported
        ));
        assert!(AccountManageabilityChecker::can_manage_network(
            "not-a-network",
            &main_account(),
            &supported
        ));
    }

    #[test]
    fn test_non_main_account_rules() {
        let supported = SupportedBlockchains::mainnet();
        let account = savings();

        assert!(AccountManageabilityChecker::can_manage_blockchain(
            Blockchain::Ethereum { testnet: false },
            &account
        ));
        assert!(!AccountManageabilityChecker::can_manage_blockchain(
            Blockchain::Chia { testnet: false },
            &account
        ));
        assert!(AccountManageabilityChecker::can_manage_network(
            "tron", &account, &supported
        ));
        assert!(!AccountManageabilityChecker::can_manage_network(
            "chia", &account, &supported
        ));
        assert!(!AccountManageabilityChecker::can_manage_network(
            "not-a-network",
            &account,
            &supported
        ));
    }
}
