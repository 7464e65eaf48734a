//! 浏览器 localStorage 封装
//!
//! 读操作把"不可用"与"不存在"统一为 None；写操作返回具体错误，由调用方决定是否记录。

use thiserror::Error;
use web_sys::Storage;

use super::http::js_error_text;

#[derive(Debug, Error)]
pub enum StorageError {
    /// 无 window 或被浏览器禁用（隐私模式等）
    #[error("localStorage is unavailable")]
    Unavailable,
    #[error("localStorage operation failed: {0}")]
    Operation(String),
}

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    pub fn get(key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Operation(js_error_text(&e)))
    }

    /// 键不存在时同样视为成功
    pub fn remove(key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Operation(js_error_text(&e)))
    }
}
