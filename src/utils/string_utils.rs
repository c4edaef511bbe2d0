//! 字符串工具模块
//! 提供名称比较、合约地址规范化等字符串处理函数

/// 检查字符串是否为空或只包含空白字符
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// 去掉两端空白并转小写，用于不区分大小写的名称比较
pub fn normalize_name(s: &str) -> String {
    s.trim().to_lowercase()
}

/// 合约地址比较键
pub fn normalize_contract_address(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}
