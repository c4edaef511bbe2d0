//! 旧版代币来源
//!
//! 账户功能上线前，代币直接挂在钱包下面，以 JSON 数组形式保存

use std::path::Path;

use crate::{domain::StoredToken, error::AccountsResult};

/// 读取旧版代币列表，文件不存在时返回空列表
pub async fn load_legacy_tokens(path: impl AsRef<Path>) -> AccountsResult<Vec<StoredToken>> {
    let path = path.as_ref();
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No legacy tokens file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let tokens: Vec<StoredToken> = serde_json::from_slice(&content)?;
    tracing::info!(count = tokens.len(), "Loaded legacy tokens");

    Ok(tokens)
}
