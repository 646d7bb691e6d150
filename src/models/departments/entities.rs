use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::LocalizedText;

// 院系所属培养方案
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "department.ts")]
pub enum Program {
    General, // 普通培养方案
    Special, // 特殊培养方案
}

impl Program {
    pub const GENERAL: &'static str = "general";
    pub const SPECIAL: &'static str = "special";
}

impl<'de> Deserialize<'de> for Program {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Program>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Program::General => write!(f, "{}", Program::GENERAL),
            Program::Special => write!(f, "{}", Program::SPECIAL),
        }
    }
}

impl std::str::FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Program::GENERAL => Ok(Program::General),
            Program::SPECIAL => Ok(Program::Special),
            _ => Err(format!(
                "Department program must be one of {}, {}",
                Program::GENERAL,
                Program::SPECIAL
            )),
        }
    }
}

// 院系（含内部 ID，仅在服务内部流转）
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i64,
    pub code: String,
    pub name: LocalizedText,
    pub capacity: i32,
    pub program: Program,
}

// 对外暴露的院系视图，不包含内部 ID
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct DepartmentView {
    pub code: String,
    pub name: LocalizedText,
    pub capacity: i32,
    pub program: Program,
}

impl Department {
    pub fn view(&self) -> DepartmentView {
        DepartmentView {
            code: self.code.clone(),
            name: self.name.clone(),
            capacity: self.capacity,
            program: self.program,
        }
    }
}
