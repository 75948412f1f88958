// src/hierarchy/node_index.rs

use crate::domain::department_model::{DepartmentId, DepartmentNode};
use std::collections::HashMap;

/// 部門スナップショットの隣接マップ
///
/// `build` 時点の親子関係から逆引きの子インデックスを一度だけ構築する。
/// ノード本体（レベル・親ID等）は `get_mut` で更新できるが、子インデックスは
/// スナップショット構築時点の関係を保持し続ける。ミューテーションごとに
/// 作り直す前提で、長命の共有キャッシュにはしない。
#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: HashMap<DepartmentId, DepartmentNode>,
    children: HashMap<DepartmentId, Vec<DepartmentId>>,
}

impl NodeIndex {
    /// 全部門からインデックスを構築する（O(n)）
    pub fn build(all_nodes: Vec<DepartmentNode>) -> Self {
        let mut nodes = HashMap::with_capacity(all_nodes.len());
        let mut children: HashMap<DepartmentId, Vec<DepartmentId>> = HashMap::new();

        for node in all_nodes {
            if let Some(parent_id) = node.parent_id {
                children.entry(parent_id).or_default().push(node.id);
            }
            nodes.insert(node.id, node);
        }

        // 走査順を決定的にする
        for ids in children.values_mut() {
            ids.sort_unstable();
        }

        Self { nodes, children }
    }

    pub fn get(&self, id: DepartmentId) -> Option<&DepartmentNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: DepartmentId) -> Option<&mut DepartmentNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: DepartmentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// 直下の子部門IDを返す（スナップショット構築時点の関係）
    pub fn children_of(&self, id: DepartmentId) -> &[DepartmentId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
