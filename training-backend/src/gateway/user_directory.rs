// src/gateway/user_directory.rs

use crate::domain::department_model::DepartmentId;
use crate::error::AppResult;
use async_trait::async_trait;

/// マネージャー候補の適格性判定の結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManagerDecision {
    Accepted,
    Rejected(String),
}

/// ユーザーディレクトリによるマネージャー適格性の検証
///
/// 適格性ルール（他部門との兼任制約など）の中身はディレクトリ側が持つ。
/// 更新時は現任マネージャーを渡し、同一人物への再割り当てを許容できるようにする。
#[async_trait]
pub trait ManagerValidator: Send + Sync {
    async fn validate_candidate(
        &self,
        candidate_id: i32,
        is_create: bool,
        previous_manager_id: Option<i32>,
        node_id: Option<DepartmentId>,
    ) -> AppResult<ManagerDecision>;

    /// ビュー解決用の表示名の取得（コミット後にのみ呼ぶ）
    async fn display_name(&self, user_id: i32) -> AppResult<Option<String>>;
}

/// 部門メンバーの所属リンク管理
#[async_trait]
pub trait MemberRegistry: Send + Sync {
    /// 部門の物理削除前に、所属している全メンバーの部門リンクを解除する
    async fn clear_department_for_members(&self, department_id: DepartmentId) -> AppResult<()>;
}
