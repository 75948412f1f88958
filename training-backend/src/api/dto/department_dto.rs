// src/api/dto/department_dto.rs

use crate::domain::department_model::{DepartmentId, DepartmentNode, DepartmentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// 部門作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Department name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 32,
        message = "Department code must be between 1 and 32 characters"
    ))]
    pub code: String,

    #[validate(length(max = 500, message = "Description must be 500 characters or less"))]
    pub description: Option<String>,

    pub parent_id: Option<DepartmentId>,
    pub manager_id: Option<i32>,
    pub status: Option<DepartmentStatus>,
}

/// 部門更新リクエスト
///
/// `parent_id` / `manager_id` は「フィールド未指定」と「明示的な null（解除）」を
/// 区別するため二重 Option で受ける。外側 None は変更なし、`Some(None)` は解除。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Department name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(
        min = 1,
        max = 32,
        message = "Department code must be between 1 and 32 characters"
    ))]
    pub code: Option<String>,

    #[validate(length(max = 500, message = "Description must be 500 characters or less"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<DepartmentId>>,

    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<i32>>,

    pub status: Option<DepartmentStatus>,
}

// フィールドが存在した場合のみ内側の Option を包む
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// 部門のレスポンス（親部門名・マネージャー名を解決済み）
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub parent_id: Option<DepartmentId>,
    pub parent_name: Option<String>,
    pub level: i32,
    pub manager_id: Option<i32>,
    pub manager_name: Option<String>,
    pub status: DepartmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DepartmentResponse {
    pub fn from_node(
        node: DepartmentNode,
        parent_name: Option<String>,
        manager_name: Option<String>,
    ) -> Self {
        Self {
            id: node.id,
            name: node.name,
            code: node.code,
            description: node.description,
            parent_id: node.parent_id,
            parent_name,
            level: node.level,
            manager_id: node.manager_id,
            manager_name,
            status: node.status,
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}
