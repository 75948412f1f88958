// src/domain/department_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 部門ID（永続化層が採番する整数ID）
pub type DepartmentId = i32;

/// 階層レベル（ルート部門は 1）
pub const ROOT_LEVEL: i32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for DepartmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartmentStatus::Active => write!(f, "active"),
            DepartmentStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl From<String> for DepartmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "inactive" => DepartmentStatus::Inactive,
            _ => DepartmentStatus::Active,
        }
    }
}

impl Default for DepartmentStatus {
    fn default() -> Self {
        DepartmentStatus::Active
    }
}

/// 部門ノード
///
/// 親子関係は `parent_id` のみで表現する。親・子へのオブジェクト参照は持たず、
/// 「子の集合」は NodeIndex の逆引きインデックスで都度導出する。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentNode {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub parent_id: Option<DepartmentId>,
    pub level: i32,
    pub manager_id: Option<i32>,
    pub status: DepartmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DepartmentNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// コードの同一判定（大文字小文字を区別しない）
    pub fn code_matches(&self, other: &str) -> bool {
        self.code.eq_ignore_ascii_case(other)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// 新規部門の挿入ペイロード（IDは永続化層が採番する）
#[derive(Clone, Debug, PartialEq)]
pub struct NewDepartment {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub parent_id: Option<DepartmentId>,
    pub level: i32,
    pub manager_id: Option<i32>,
    pub status: DepartmentStatus,
}

impl NewDepartment {
    pub fn new(
        name: String,
        code: String,
        description: Option<String>,
        parent_id: Option<DepartmentId>,
        level: i32,
        manager_id: Option<i32>,
        status: DepartmentStatus,
    ) -> Self {
        Self {
            name,
            code,
            description,
            parent_id,
            level,
            manager_id,
            status,
        }
    }
}
