// src/gateway/department_store.rs

use crate::domain::department_model::{DepartmentId, DepartmentNode, NewDepartment};
use crate::error::AppResult;
use async_trait::async_trait;

/// 1回のミューテーションで永続化層に適用する変更操作
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeOp {
    /// 既存ノードの置き換え（before は競合検出用に永続化層へ渡す）
    Replace {
        before: DepartmentNode,
        after: DepartmentNode,
    },
    /// ノードの物理削除
    Remove(DepartmentNode),
}

/// ミューテーション1回分の変更の束
///
/// ここに積まれた操作は `DepartmentStore::commit` が単一トランザクションで
/// 適用する。部分適用が外部から観測されてはならない。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    ops: Vec<ChangeOp>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, before: DepartmentNode, after: DepartmentNode) {
        self.ops.push(ChangeOp::Replace { before, after });
    }

    pub fn remove(&mut self, node: DepartmentNode) {
        self.ops.push(ChangeOp::Remove(node));
    }

    pub fn ops(&self) -> &[ChangeOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// 部門の永続化ゲートウェイ
///
/// トランザクション分離は永続化層側の保証とし、コミット済みの一貫した
/// 状態だけが観測できることを前提とする。楽観ロック等はここでは持たない。
#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// 全部門スナップショットの取得（Update / Delete 時の NodeIndex 構築用）
    async fn fetch_all(&self) -> AppResult<Vec<DepartmentNode>>;

    async fn fetch_by_id(&self, id: DepartmentId) -> AppResult<Option<DepartmentNode>>;

    /// 名前またはコード（大文字小文字を区別しない）の重複チェック
    async fn exists_by_name_or_code(
        &self,
        name: &str,
        code: &str,
        excluding_id: Option<DepartmentId>,
    ) -> AppResult<bool>;

    /// 新規部門の挿入。IDの採番は永続化層が行う
    async fn insert(&self, department: NewDepartment) -> AppResult<DepartmentNode>;

    /// 変更の束を単一トランザクションで適用する
    async fn commit(&self, changes: ChangeSet) -> AppResult<()>;
}
