//! 代币重新分配基准测试
//!
//! 场景:
//! 1. 所有代币已在正确账户（稳定状态，最常见）
//! 2. 所有代币集中在主账户（首次启用多账户后）

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cryptoaccounts::{
    domain::{Blockchain, BlockchainNetwork, DerivationPath, StoredCryptoAccount, StoredToken},
    service::TokensDistributor,
};

const ACCOUNTS: u32 = 20;

fn eth_token(account_index: u32, n: usize) -> StoredToken {
    let path: DerivationPath = format!("m/44'/60'/0'/0/{}", account_index)
        .parse()
        .expect("valid path");
    StoredToken {
        id: Some(format!("token-{}", n)),
        name: format!("Token {}", n),
        symbol: format!("T{}", n),
        decimal_count: 18,
        blockchain_network: BlockchainNetwork::new(
            Blockchain::Ethereum { testnet: false },
            Some(path),
        )
        .into(),
        contract_address: Some(format!("0x{:040x}", n)),
    }
}

fn settled_wallet(tokens_per_account: usize) -> Vec<StoredCryptoAccount> {
    (0..ACCOUNTS)
        .map(|index| {
            let tokens = (0..tokens_per_account)
                .map(|n| eth_token(index, n))
                .collect();
            StoredCryptoAccount::new(index, Some(format!("Account {}", index)), tokens)
        })
        .collect()
}

fn misplaced_wallet(tokens_per_account: usize) -> Vec<StoredCryptoAccount> {
    let mut accounts = settled_wallet(0);
    accounts[0].tokens = (0..ACCOUNTS)
        .flat_map(|index| (0..tokens_per_account).map(move |n| eth_token(index, n)))
        .collect();
    accounts
}

fn bench_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute_tokens");

    for tokens_per_account in [10usize, 50, 200] {
        group.throughput(Throughput::Elements(
            (tokens_per_account * ACCOUNTS as usize) as u64,
        ));

        let settled = settled_wallet(tokens_per_account);
        group.bench_with_input(
            BenchmarkId::new("settled", tokens_per_account),
            &settled,
            |b, accounts| {
                b.iter(|| {
                    let mut accounts = accounts.clone();
                    black_box(TokensDistributor::distribute_tokens(&mut accounts, Vec::new()))
                })
            },
        );

        let misplaced = misplaced_wallet(tokens_per_account);
        group.bench_with_input(
            BenchmarkId::new("misplaced", tokens_per_account),
            &misplaced,
            |b, accounts| {
                b.iter(|| {
                    let mut accounts = accounts.clone();
                    black_box(TokensDistributor::distribute_tokens(&mut accounts, Vec::new()))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_distribution);
criterion_main!(benches);
