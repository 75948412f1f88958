// tests/common/fakes.rs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use training_backend::domain::department_model::{DepartmentId, DepartmentNode, NewDepartment};
use training_backend::error::{AppError, AppResult};
use training_backend::gateway::{
    ChangeOp, ChangeSet, DepartmentStore, ManagerDecision, ManagerValidator, MemberRegistry,
};

/// テスト用のインメモリ部門ストア
///
/// commit は単一ロックの下で全操作を適用するため、ミューテーション単位の
/// 原子性という本物のトランザクション境界と同じ観測が得られる。
#[derive(Clone)]
pub struct InMemoryDepartmentStore {
    nodes: Arc<Mutex<HashMap<DepartmentId, DepartmentNode>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryDepartmentStore {
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    pub fn seed(nodes: Vec<DepartmentNode>) -> Self {
        let max_id = nodes.iter().map(|n| n.id).max().unwrap_or(0);
        let store = Self::new();
        store.next_id.store(max_id + 1, Ordering::SeqCst);
        {
            let mut guard = store.nodes.lock().unwrap();
            for node in nodes {
                guard.insert(node.id, node);
            }
        }
        store
    }

    /// 現在の全ノード（ID昇順）
    pub fn snapshot(&self) -> Vec<DepartmentNode> {
        let guard = self.nodes.lock().unwrap();
        let mut nodes: Vec<DepartmentNode> = guard.values().cloned().collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    pub fn get(&self, id: DepartmentId) -> Option<DepartmentNode> {
        self.nodes.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }
}

impl Default for InMemoryDepartmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DepartmentStore for InMemoryDepartmentStore {
    async fn fetch_all(&self) -> AppResult<Vec<DepartmentNode>> {
        Ok(self.snapshot())
    }

    async fn fetch_by_id(&self, id: DepartmentId) -> AppResult<Option<DepartmentNode>> {
        Ok(self.get(id))
    }

    async fn exists_by_name_or_code(
        &self,
        name: &str,
        code: &str,
        excluding_id: Option<DepartmentId>,
    ) -> AppResult<bool> {
        let guard = self.nodes.lock().unwrap();
        Ok(guard.values().any(|n| {
            excluding_id != Some(n.id) && (n.name == name || n.code.eq_ignore_ascii_case(code))
        }))
    }

    async fn insert(&self, department: NewDepartment) -> AppResult<DepartmentNode> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let node = DepartmentNode {
            id,
            name: department.name,
            code: department.code,
            description: department.description,
            parent_id: department.parent_id,
            level: department.level,
            manager_id: department.manager_id,
            status: department.status,
            created_at: now,
            updated_at: now,
        };
        self.nodes.lock().unwrap().insert(id, node.clone());
        Ok(node)
    }

    async fn commit(&self, changes: ChangeSet) -> AppResult<()> {
        let mut guard = self.nodes.lock().unwrap();
        for op in changes.ops() {
            match op {
                ChangeOp::Replace { before, after } => {
                    if !guard.contains_key(&before.id) {
                        return Err(AppError::InternalServerError(format!(
                            "replace target {} does not exist",
                            before.id
                        )));
                    }
                    guard.insert(after.id, after.clone());
                }
                ChangeOp::Remove(node) => {
                    guard.remove(&node.id);
                }
            }
        }
        Ok(())
    }
}

/// テスト用のマネージャー検証スタブ
///
/// 呼び出し引数を記録するので、現任マネージャーが引き継がれているか等を
/// テスト側で検証できる。
#[derive(Clone, Default)]
pub struct StubManagerValidator {
    rejection: Option<String>,
    names: HashMap<i32, String>,
    calls: Arc<Mutex<Vec<ValidateCall>>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidateCall {
    pub candidate_id: i32,
    pub is_create: bool,
    pub previous_manager_id: Option<i32>,
    pub node_id: Option<DepartmentId>,
}

impl StubManagerValidator {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            rejection: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, user_id: i32, name: &str) -> Self {
        self.names.insert(user_id, name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ValidateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ManagerValidator for StubManagerValidator {
    async fn validate_candidate(
        &self,
        candidate_id: i32,
        is_create: bool,
        previous_manager_id: Option<i32>,
        node_id: Option<DepartmentId>,
    ) -> AppResult<ManagerDecision> {
        self.calls.lock().unwrap().push(ValidateCall {
            candidate_id,
            is_create,
            previous_manager_id,
            node_id,
        });
        match &self.rejection {
            Some(reason) => Ok(ManagerDecision::Rejected(reason.clone())),
            None => Ok(ManagerDecision::Accepted),
        }
    }

    async fn display_name(&self, user_id: i32) -> AppResult<Option<String>> {
        Ok(self.names.get(&user_id).cloned())
    }
}

/// 部門リンク解除の呼び出しを記録するメンバーレジストリ
#[derive(Clone, Default)]
pub struct RecordingMemberRegistry {
    cleared: Arc<Mutex<Vec<DepartmentId>>>,
}

impl RecordingMemberRegistry {
    pub fn cleared(&self) -> Vec<DepartmentId> {
        self.cleared.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemberRegistry for RecordingMemberRegistry {
    async fn clear_department_for_members(&self, department_id: DepartmentId) -> AppResult<()> {
        self.cleared.lock().unwrap().push(department_id);
        Ok(())
    }
}
