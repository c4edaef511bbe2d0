pub mod string_utils;

pub use string_utils::{is_blank, normalize_contract_address, normalize_name};
