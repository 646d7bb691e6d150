use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 双语文本（阿拉伯语 / 英语）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "localized.ts")]
pub struct LocalizedText {
    pub ar: String,
    pub en: String,
}

// 双语文本的部分更新，只覆盖出现的语言
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export, export_to = "localized.ts")]
pub struct LocalizedTextPatch {
    pub ar: Option<String>,
    pub en: Option<String>,
}

impl LocalizedText {
    /// 按语言键合并补丁，未出现的键保留原值
    pub fn merged(&self, patch: &LocalizedTextPatch) -> LocalizedText {
        LocalizedText {
            ar: patch.ar.clone().unwrap_or_else(|| self.ar.clone()),
            en: patch.en.clone().unwrap_or_else(|| self.en.clone()),
        }
    }
}

impl LocalizedTextPatch {
    pub fn is_empty(&self) -> bool {
        self.ar.is_none() && self.en.is_none()
    }
}
