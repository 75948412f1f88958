// tests/common/mod.rs
#![allow(dead_code)]

pub mod fakes;

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use training_backend::api::dto::department_dto::CreateDepartmentRequest;
use training_backend::domain::department_model::{DepartmentId, DepartmentNode, DepartmentStatus};
use training_backend::service::department_mutator::DepartmentMutator;

use self::fakes::{InMemoryDepartmentStore, RecordingMemberRegistry, StubManagerValidator};

pub type TestMutator =
    DepartmentMutator<InMemoryDepartmentStore, StubManagerValidator, RecordingMemberRegistry>;

/// テスト用の部門ノードを作成
pub fn node(
    id: DepartmentId,
    parent_id: Option<DepartmentId>,
    level: i32,
) -> DepartmentNode {
    DepartmentNode {
        id,
        name: format!("Department {}", id),
        code: format!("DEP-{}", id),
        description: None,
        parent_id,
        level,
        manager_id: None,
        status: DepartmentStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn named_node(
    id: DepartmentId,
    name: &str,
    code: &str,
    parent_id: Option<DepartmentId>,
    level: i32,
) -> DepartmentNode {
    DepartmentNode {
        name: name.to_string(),
        code: code.to_string(),
        ..node(id, parent_id, level)
    }
}

pub fn create_request(name: &str, code: &str, parent_id: Option<DepartmentId>) -> CreateDepartmentRequest {
    CreateDepartmentRequest {
        name: name.to_string(),
        code: code.to_string(),
        description: None,
        parent_id,
        manager_id: None,
        status: None,
    }
}

/// ミューテーターと、検証用に共有状態を覗けるフェイクのハンドルを組み立てる
pub fn build_mutator(
    nodes: Vec<DepartmentNode>,
) -> (TestMutator, InMemoryDepartmentStore, RecordingMemberRegistry) {
    build_mutator_with_validator(nodes, StubManagerValidator::accepting())
}

pub fn build_mutator_with_validator(
    nodes: Vec<DepartmentNode>,
    validator: StubManagerValidator,
) -> (TestMutator, InMemoryDepartmentStore, RecordingMemberRegistry) {
    let store = InMemoryDepartmentStore::seed(nodes);
    let registry = RecordingMemberRegistry::default();
    let mutator = DepartmentMutator::new(store.clone(), validator, registry.clone());
    (mutator, store, registry)
}

/// ツリーの構造不変条件を検証する
///
/// - 非nullの親リンクは森を成す（どのノードも自分の祖先にならない）
/// - level はルートからの親ホップ数 + 1 と一致する
/// - 親参照はすべて実在するノードを指す
pub fn assert_valid_forest(nodes: &[DepartmentNode]) {
    let by_id: HashMap<DepartmentId, &DepartmentNode> =
        nodes.iter().map(|n| (n.id, n)).collect();

    for node in nodes {
        match node.parent_id {
            None => assert_eq!(node.level, 1, "root {} must have level 1", node.id),
            Some(parent_id) => {
                let parent = by_id
                    .get(&parent_id)
                    .unwrap_or_else(|| panic!("node {} has dangling parent {}", node.id, parent_id));
                assert_eq!(
                    node.level,
                    parent.level + 1,
                    "node {} level must be parent level + 1",
                    node.id
                );
            }
        }

        // 祖先を辿って自分自身に戻らないこと
        let mut visited = HashSet::new();
        let mut current = node.parent_id;
        while let Some(id) = current {
            assert_ne!(id, node.id, "node {} is its own ancestor", node.id);
            assert!(visited.insert(id), "cycle above node {}", node.id);
            current = by_id.get(&id).and_then(|n| n.parent_id);
        }
    }
}
