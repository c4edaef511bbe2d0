//! BIP32 派生路径模型
//!
//! 路径文本格式：`m/44'/60'/0'/0/0`，`'`、`h`、`H` 均可表示硬化节点

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// 硬化标志位
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationPathError {
    #[error("Derivation path must start with 'm': {0}")]
    MissingRoot(String),
    #[error("Invalid derivation path component '{component}' in {path}")]
    InvalidComponent { component: String, path: String },
    #[error("Derivation index {0} exceeds 2^31 - 1")]
    IndexOutOfRange(u64),
}

/// 派生路径中的单个节点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivationNode {
    Hardened(u32),
    NonHardened(u32),
}

impl DerivationNode {
    /// 去掉硬化位后的索引值（`44'` → 44）
    pub fn raw_index(&self) -> u32 {
        match self {
            Self::Hardened(index) | Self::NonHardened(index) => *index,
        }
    }

    /// 带硬化位的完整 32 位索引
    pub fn index(&self) -> u32 {
        match self {
            Self::Hardened(index) => index | HARDENED_OFFSET,
            Self::NonHardened(index) => *index,
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// 保持硬化属性，仅替换索引值
    pub fn with_raw_index(&self, raw_index: u32) -> Self {
        let raw_index = raw_index & !HARDENED_OFFSET;
        match self {
            Self::Hardened(_) => Self::Hardened(raw_index),
            Self::NonHardened(_) => Self::NonHardened(raw_index),
        }
    }
}

impl fmt::Display for DerivationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardened(index) => write!(f, "{}'", index),
            Self::NonHardened(index) => write!(f, "{}", index),
        }
    }
}

/// 有序的派生节点序列
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    nodes: Vec<DerivationNode>,
}

impl DerivationPath {
    pub fn new(nodes: Vec<DerivationNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[DerivationNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 返回替换了指定位置节点索引的新路径，原路径不变
    ///
    /// 位置越界时返回 `None`
    pub fn with_raw_index_at(&self, position: usize, raw_index: u32) -> Option<Self> {
        let node = self.nodes.get(position)?;
        let mut nodes = self.nodes.clone();
        nodes[position] = node.with_raw_index(raw_index);
        Some(Self { nodes })
    }

    /// 文本形式，例如 `m/44'/0'/0'/0/0`
    pub fn raw_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for node in &self.nodes {
            write!(f, "/{}", node)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = DerivationPathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim();
        let mut components = path.split('/');

        match components.next() {
            Some(root) if root.eq_ignore_ascii_case("m") => {}
            _ => return Err(DerivationPathError::MissingRoot(path.to_string())),
        }

        let nodes = components
            .map(|component| parse_node(component, path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nodes })
    }
}

fn parse_node(component: &str, path: &str) -> Result<DerivationNode, DerivationPathError> {
    let invalid = || DerivationPathError::InvalidComponent {
        component: component.to_string(),
        path: path.to_string(),
    };

    let (digits, hardened) = match component.strip_suffix(['\'', 'h', 'H']) {
        Some(digits) => (digits, true),
        None => (component, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    if value >= u64::from(HARDENED_OFFSET) {
        return Err(DerivationPathError::IndexOutOfRange(value));
    }

    let value = value as u32;
    Ok(if hardened {
        DerivationNode::Hardened(value)
    } else {
        DerivationNode::NonHardened(value)
    })
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// BIP44 路径构造器：`m/44'/coin_type'/account'/change/address_index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bip44 {
    pub purpose: u32,
    pub coin_type: u32,
    pub account: u32,
    pub change: u32,
    pub address_index: u32,
}

impl Bip44 {
    pub fn new(coin_type: u32) -> Self {
        Self {
            purpose: 44,
            coin_type,
            account: 0,
            change: 0,
            address_index: 0,
        }
    }

    pub fn with_purpose(mut self, purpose: u32) -> Self {
        self.purpose = purpose;
        self
    }

    /// 完整五段路径
    pub fn build_path(&self) -> DerivationPath {
        DerivationPath::new(vec![
            DerivationNode::Hardened(self.purpose),
            DerivationNode::Hardened(self.coin_type),
            DerivationNode::Hardened(self.account),
            DerivationNode::NonHardened(self.change),
            DerivationNode::NonHardened(self.address_index),
        ])
    }

    /// 三段全硬化路径（ed25519 SLIP-0010 链使用）
    pub fn build_account_path(&self) -> DerivationPath {
        DerivationPath::new(vec![
            DerivationNode::Hardened(self.purpose),
            DerivationNode::Hardened(self.coin_type),
            DerivationNode::Hardened(self.account),
        ])
    }
}
