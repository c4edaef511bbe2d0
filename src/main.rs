//! CryptoAccounts 主入口
//! 执行一次账户同步：加载 → 归位旧版代币 → 迁移自定义代币 → 保存

use std::sync::Arc;

use anyhow::{Context, Result};
use cryptoaccounts::{
    config::Config,
    infrastructure::{init_default_logging, init_logging},
    repository::{load_legacy_tokens, JsonFileCryptoAccountsRepository},
    service::{
        CryptoAccountsSyncService, CustomTokensMigrator, DefaultAccountFactory, HttpTokenCatalog,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // ✅ 1. 加载环境变量
    dotenvy::dotenv().ok();

    // ✅ 2. 加载配置（CONFIG_PATH 指向的文件优先）
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::from_env_and_file(config_path.as_deref())?;
    config.validate().context("Invalid configuration")?;

    // ✅ 3. 初始化日志
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        init_default_logging();
    }

    tracing::info!(
        accounts_file = %config.storage.accounts_file,
        catalog = %config.catalog.base_url,
        hd_wallets_supported = config.accounts.hd_wallets_supported,
        "🚀 Starting crypto accounts sync"
    );

    // ✅ 4. 组装服务
    let repository = Arc::new(JsonFileCryptoAccountsRepository::new(
        &config.storage.accounts_file,
    ));
    let catalog = Arc::new(HttpTokenCatalog::new(&config.catalog)?);
    let default_account_factory = DefaultAccountFactory::new(
        config.accounts.default_blockchains()?,
        config.accounts.hd_wallets_supported,
    );
    let sync_service = CryptoAccountsSyncService::new(
        repository,
        CustomTokensMigrator::new(catalog),
        default_account_factory,
        config.accounts.hd_wallets_supported,
    );

    // ✅ 5. 读取旧版代币
    let legacy_tokens = match &config.storage.legacy_tokens_file {
        Some(path) => load_legacy_tokens(path)
            .await
            .with_context(|| format!("Failed to load legacy tokens: {}", path))?,
        None => Vec::new(),
    };

    // ✅ 6. 同步
    let report = sync_service.run(legacy_tokens).await?;

    for pair in report.distribution.pairs() {
        tracing::info!(
            source = ?pair.source,
            destination = %pair
                .destination_account_name
                .as_deref()
                .unwrap_or(&config.accounts.default_main_account_name),
            "Tokens redistributed"
        );
    }

    tracing::info!(
        saved = report.saved,
        migrated = report.migrated,
        created_default_account = report.created_default_account,
        "🎉 Done"
    );

    Ok(())
}
