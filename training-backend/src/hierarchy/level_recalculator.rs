// src/hierarchy/level_recalculator.rs

use crate::domain::department_model::DepartmentId;
use crate::hierarchy::node_index::NodeIndex;
use std::collections::VecDeque;

/// 指定ノード配下の全子孫にレベル差分を適用する
///
/// 対象ノード自身は呼び出し側が更新済みであることを前提に、子孫のみを
/// 幅優先の作業キューで一度ずつ訪問する。再帰は使わない（深いツリーでの
/// スタック消費を木のサイズに依らず一定にするため）。事前に循環検出を
/// 通過した構造のみを受け取るので走査は必ず停止する。
///
/// 戻り値はレベルを変更した子孫のID一覧（コミット対象の組み立てに使う）。
pub fn propagate(
    node_id: DepartmentId,
    level_delta: i32,
    index: &mut NodeIndex,
) -> Vec<DepartmentId> {
    let mut touched = Vec::new();
    if level_delta == 0 {
        return touched;
    }

    let mut queue: VecDeque<DepartmentId> = index.children_of(node_id).to_vec().into();

    while let Some(id) = queue.pop_front() {
        queue.extend(index.children_of(id).iter().copied());

        if let Some(node) = index.get_mut(id) {
            node.level += level_delta;
            node.touch();
            touched.push(id);
        }
    }

    touched
}
