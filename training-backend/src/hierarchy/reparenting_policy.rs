// src/hierarchy/reparenting_policy.rs

use crate::domain::department_model::{DepartmentId, DepartmentNode, DepartmentStatus, ROOT_LEVEL};
use crate::hierarchy::{level_recalculator, node_index::NodeIndex};

/// 削除される部門の直下の子をどこへ付け替えるかを決めて適用する
///
/// - 削除対象がルート（level == 1）の場合、各子は新しいルートになる
///   （`parent_id = None`, `level = 1`）。
/// - それ以外の場合、各子は削除対象の元の親に付け替えられ、削除対象が
///   占めていたレベルを引き継ぐ（`level = deleted.level`）。
///
/// 付け替えた直下の子は非アクティブに落とす。より深い子孫はレベルのみ
/// 再計算し、ステータスは変更しない。この非対称は仕様通りの挙動。
///
/// 戻り値は変更を受けた全ノードのID（直下の子とその全子孫）。
pub fn reassign_children(deleted: &DepartmentNode, index: &mut NodeIndex) -> Vec<DepartmentId> {
    let (new_parent_id, new_level) = if deleted.level <= ROOT_LEVEL {
        (None, ROOT_LEVEL)
    } else {
        (deleted.parent_id, deleted.level)
    };

    let direct_children: Vec<DepartmentId> = index.children_of(deleted.id).to_vec();
    let mut touched = Vec::new();

    for child_id in direct_children {
        let level_delta = match index.get_mut(child_id) {
            Some(child) => {
                let delta = new_level - child.level;
                child.parent_id = new_parent_id;
                child.level = new_level;
                child.status = DepartmentStatus::Inactive;
                child.touch();
                delta
            }
            None => continue,
        };

        touched.push(child_id);
        touched.extend(level_recalculator::propagate(child_id, level_delta, index));
    }

    touched
}
