//! 审查表单状态
//!
//! 将代码与语言两个 signal 整合为 `FormState`，负责持有、重置与示例填充。

use leptos::prelude::*;
use sentinel_shared::Language;

use crate::services::SAMPLE_CODE;

/// 使用 `RwSignal` 以便作为 Props 在组件间 Copy 传递
#[derive(Clone, Copy)]
pub struct FormState {
    pub code: RwSignal<String>,
    pub language: RwSignal<Language>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            code: RwSignal::new(String::new()),
            language: RwSignal::new(Language::default()),
        }
    }

    /// 清空代码，保留语言选择
    pub fn clear(&self) {
        self.code.set(String::new());
    }

    pub fn load_sample(&self) {
        self.code.set(SAMPLE_CODE.to_string());
    }

    pub fn is_blank(&self) -> bool {
        self.code.with(|code| code.trim().is_empty())
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
