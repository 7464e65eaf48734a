//! Bearer Token 持久化
//!
//! Token 是客户端唯一的持久化状态。HTTP 客户端与会话服务都只通过
//! `TokenStore` 访问它，测试中替换为内存实现。

use crate::web::LocalStorage;
use sentinel_shared::TOKEN_STORAGE_KEY;

pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);

    /// 仅当当前 Token 仍是 `expected` 时移除，返回是否移除
    ///
    /// 迟到的失败只能清理它自己携带的 Token，不能清理之后新登录写入的。
    fn remove_if(&self, expected: &str) -> bool {
        if self.get().as_deref() != Some(expected) {
            return false;
        }
        self.remove();
        true
    }
}

/// 浏览器 LocalStorage 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn get(&self) -> Option<String> {
        LocalStorage::get(TOKEN_STORAGE_KEY).filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) {
        if let Err(e) = LocalStorage::set(TOKEN_STORAGE_KEY, token) {
            log::warn!("[Auth] Failed to persist token: {}", e);
        }
    }

    fn remove(&self) {
        if let Err(e) = LocalStorage::remove(TOKEN_STORAGE_KEY) {
            log::warn!("[Auth] Failed to remove token: {}", e);
        }
    }
}

// =========================================================
// 测试工具: MemoryTokenStore
// =========================================================

/// 内存实现，克隆体共享同一个槽位
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: std::rc::Rc<std::cell::RefCell<Option<String>>>,
    pub removals: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(token);
        store
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        if self.slot.borrow_mut().take().is_some() {
            self.removals.set(self.removals.get() + 1);
        }
    }
}
