// src/hierarchy/cycle_detector.rs

use crate::domain::department_model::DepartmentId;
use crate::hierarchy::node_index::NodeIndex;
use std::collections::HashSet;

/// 親の付け替えが循環参照を生むかどうかを判定する
///
/// `candidate_parent_id` から親方向に辿り、対象ノード自身に到達するか、
/// 既に訪問したノードを再訪した時点で循環と判定する。ルート（親なし）に
/// 到達すれば循環なし。新しい親エッジを受け入れる前に必ず呼ぶこと。
pub fn would_create_cycle(
    node_id: DepartmentId,
    candidate_parent_id: DepartmentId,
    index: &NodeIndex,
) -> bool {
    // 自己参照
    if candidate_parent_id == node_id {
        return true;
    }

    let mut visited = HashSet::new();
    let mut current = Some(candidate_parent_id);

    while let Some(id) = current {
        if id == node_id {
            return true;
        }
        // 祖先側に既存の循環がある場合も受け入れない
        if !visited.insert(id) {
            return true;
        }
        current = index.get(id).and_then(|node| node.parent_id);
    }

    false
}
