//! 代币重新分配集成测试

mod common;

use common::*;
use cryptoaccounts::service::{
    DistributionResult, DistributionSource, RedistributionPair, TokensDistributor,
};

fn mixed_wallet() -> Vec<cryptoaccounts::domain::StoredCryptoAccount> {
    vec![
        main_account(vec![
            token("btc-main", BTC, Some("m/84'/0'/0'/0/0")),
            token("eth-acc1", ETH, Some("m/44'/60'/0'/0/1")),
            token("sol-acc2", SOL, Some("m/44'/501'/2'")),
            token("eth-short", ETH, Some("m/44'/60'")),
            unknown_network_token("mystery"),
        ]),
        account(
            1,
            "Trading",
            vec![
                token("btc-acc0", BTC, Some("m/84'/0'/0'/0/0")),
                token("eth-no-path", ETH, None),
            ],
        ),
        account(
            2,
            "Savings",
            vec![token("eth-acc7", ETH, Some("m/44'/60'/0'/0/7"))],
        ),
    ]
}

#[test]
fn test_redistribution_example() {
    let mut accounts = vec![
        main_account(vec![token("eth", ETH, Some("m/44'/60'/0'/0/1"))]),
        account(1, "Trading", vec![]),
    ];

    let result = TokensDistributor::distribute_tokens(&mut accounts, vec![]);

    assert!(accounts[0].tokens.is_empty());
    assert_eq!(token_names(&accounts[1]), vec!["eth"]);
    assert_eq!(
        result,
        DistributionResult::RedistributionHappened(vec![RedistributionPair {
            source: DistributionSource::Account { name: None },
            destination_account_name: Some("Trading".to_string()),
        }])
    );
}

#[test]
fn test_distribution_is_idempotent() {
    let mut accounts = mixed_wallet();

    let first = TokensDistributor::distribute_tokens(&mut accounts, vec![]);
    assert!(!first.is_none());

    let after_first = accounts.clone();
    let second = TokensDistributor::distribute_tokens(&mut accounts, vec![]);

    assert_eq!(second, DistributionResult::None);
    assert_eq!(accounts, after_first);
}

#[test]
fn test_tokens_are_conserved() {
    let mut accounts = mixed_wallet();
    let before = all_token_names(&accounts);

    TokensDistributor::distribute_tokens(&mut accounts, vec![]);

    assert_eq!(all_token_names(&accounts), before);
}

#[test]
fn test_final_placement() {
    let mut accounts = mixed_wallet();

    TokensDistributor::distribute_tokens(&mut accounts, vec![]);

    // 路径过短的代币归入主账户；未知网络与账户 7 不存在的代币原地不动
    assert_eq!(
        token_names(&accounts[0]),
        vec!["btc-main", "eth-short", "mystery", "btc-acc0"]
    );
    assert_eq!(token_names(&accounts[1]), vec!["eth-no-path", "eth-acc1"]);
    assert_eq!(token_names(&accounts[2]), vec!["eth-acc7", "sol-acc2"]);
}

#[test]
fn test_insufficient_paths_fall_back_to_main() {
    let mut accounts = vec![
        main_account(vec![]),
        account(
            1,
            "Trading",
            vec![
                token("eth-short", ETH, Some("m/44'/60'/0'")),
                token("btc-short", BTC, Some("m/84'")),
            ],
        ),
    ];

    let result = TokensDistributor::distribute_tokens(&mut accounts, vec![]);

    assert_eq!(token_names(&accounts[0]), vec!["eth-short", "btc-short"]);
    assert!(accounts[1].tokens.is_empty());
    assert_eq!(
        result.pairs(),
        &[RedistributionPair {
            source: DistributionSource::Account {
                name: Some("Trading".to_string())
            },
            destination_account_name: None,
        }]
    );
}

#[test]
fn test_additional_tokens_are_placed_and_conserved() {
    let mut accounts = vec![main_account(vec![]), account(1, "Trading", vec![])];
    let legacy = vec![
        token("eth-acc1", ETH, Some("m/44'/60'/0'/0/1")),
        token("eth-acc9", ETH, Some("m/44'/60'/0'/0/9")),
        token("btc-no-path", BTC, None),
    ];

    let result = TokensDistributor::distribute_tokens(&mut accounts, legacy);

    // 能直接归属主账户的先落位，找不到归属账户的随后追加
    assert_eq!(token_names(&accounts[0]), vec!["btc-no-path", "eth-acc9"]);
    assert_eq!(token_names(&accounts[1]), vec!["eth-acc1"]);
    assert_eq!(
        result.pairs(),
        &[
            RedistributionPair {
                source: DistributionSource::External,
                destination_account_name: Some("Trading".to_string()),
            },
            RedistributionPair {
                source: DistributionSource::External,
                destination_account_name: None,
            },
        ]
    );

    let second = TokensDistributor::distribute_tokens(&mut accounts, vec![]);
    assert!(second.is_none());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "main account must exist")]
fn test_missing_main_account_fails_loudly_in_debug() {
    let mut accounts = vec![account(1, "Trading", vec![])];

    TokensDistributor::distribute_tokens(&mut accounts, vec![token("btc", BTC, None)]);
}

#[test]
fn test_unknown_network_external_tokens_are_not_placed() {
    let mut accounts = vec![main_account(vec![]), account(1, "Trading", vec![])];

    let result = TokensDistributor::distribute_tokens(
        &mut accounts,
        vec![
            unknown_network_token("mystery"),
            token("eth-acc1", ETH, Some("m/44'/60'/0'/0/1")),
        ],
    );

    assert!(accounts[0].tokens.is_empty());
    assert_eq!(token_names(&accounts[1]), vec!["eth-acc1"]);
    assert_eq!(
        result.pairs(),
        &[RedistributionPair {
            source: DistributionSource::External,
            destination_account_name: Some("Trading".to_string()),
        }]
    );

    let result =
        TokensDistributor::distribute_tokens(&mut accounts, vec![unknown_network_token("mystery")]);
    assert_eq!(result, DistributionResult::None);
    assert!(accounts[0].tokens.is_empty());
}
