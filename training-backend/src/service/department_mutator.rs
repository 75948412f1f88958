// src/service/department_mutator.rs

use crate::api::dto::department_dto::{
    CreateDepartmentRequest, DepartmentResponse, UpdateDepartmentRequest,
};
use crate::domain::department_model::{
    DepartmentId, DepartmentNode, NewDepartment, ROOT_LEVEL,
};
use crate::error::{AppError, AppResult};
use crate::gateway::{
    ChangeSet, DepartmentStore, ManagerDecision, ManagerValidator, MemberRegistry,
};
use crate::hierarchy::{
    cycle_detector, level_recalculator, node_index::NodeIndex, reparenting_policy,
};
use crate::log_with_context;
use crate::utils::error_helper::{
    conflict_error, convert_validation_errors, internal_server_error, not_found_error,
    validation_error,
};
use std::collections::HashMap;
use validator::Validate;

/// 部門階層のミューテーションを司るファサード
///
/// Create / Update / Delete を「ロード → 不変条件チェック → インメモリ変更 →
/// 単一コミット」の順で組み立てる。この順序は後段が前段の結果に依存する
/// ため入れ替えてはならない。グラフ処理は同期・CPUバウンドで、中断点は
/// ゲートウェイ呼び出しのみ。
pub struct DepartmentMutator<S, M, R>
where
    S: DepartmentStore,
    M: ManagerValidator,
    R: MemberRegistry,
{
    store: S,
    managers: M,
    members: R,
}

impl<S, M, R> DepartmentMutator<S, M, R>
where
    S: DepartmentStore,
    M: ManagerValidator,
    R: MemberRegistry,
{
    pub fn new(store: S, managers: M, members: R) -> Self {
        Self {
            store,
            managers,
            members,
        }
    }

    // 部門の作成
    pub async fn create_department(
        &self,
        request: CreateDepartmentRequest,
    ) -> AppResult<DepartmentResponse> {
        request
            .validate()
            .map_err(|e| convert_validation_errors(e, "department_mutator::create_department"))?;

        log_with_context!(
            tracing::Level::DEBUG,
            "Creating department",
            "name" => &request.name,
            "code" => &request.code,
            "parent_id" => request.parent_id
        );

        // 名前・コードの重複チェック
        if self
            .store
            .exists_by_name_or_code(&request.name, &request.code, None)
            .await?
        {
            return Err(conflict_error(
                "Department with same name or code already exists",
                "department_mutator::create_department",
            ));
        }

        // 親部門の解決とレベルの決定
        let level = match request.parent_id {
            Some(parent_id) => {
                let parent = self.store.fetch_by_id(parent_id).await?.ok_or_else(|| {
                    not_found_error(
                        "Parent department",
                        &parent_id.to_string(),
                        "department_mutator::create_department",
                    )
                })?;
                parent.level + 1
            }
            None => ROOT_LEVEL,
        };

        // マネージャー候補の適格性チェック（新規部門なので前任なし）
        if let Some(candidate_id) = request.manager_id {
            self.check_manager(candidate_id, true, None, None).await?;
        }

        let department = self
            .store
            .insert(NewDepartment::new(
                request.name,
                request.code,
                request.description,
                request.parent_id,
                level,
                request.manager_id,
                request.status.unwrap_or_default(),
            ))
            .await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department created successfully",
            "department_id" => department.id,
            "name" => &department.name,
            "level" => department.level
        );

        self.resolve_view(department).await
    }

    // 部門情報の更新
    pub async fn update_department(
        &self,
        department_id: DepartmentId,
        request: UpdateDepartmentRequest,
    ) -> AppResult<DepartmentResponse> {
        request
            .validate()
            .map_err(|e| convert_validation_errors(e, "department_mutator::update_department"))?;

        log_with_context!(
            tracing::Level::DEBUG,
            "Updating department",
            "department_id" => department_id
        );

        let current = self.store.fetch_by_id(department_id).await?.ok_or_else(|| {
            not_found_error(
                "Department",
                &department_id.to_string(),
                "department_mutator::update_department",
            )
        })?;

        // 名前・コード変更時の重複チェック（自分自身は除外）
        let name_changed = request.name.as_ref().is_some_and(|n| *n != current.name);
        let code_changed = request.code.as_ref().is_some_and(|c| !current.code_matches(c));
        if name_changed || code_changed {
            let name = request.name.as_deref().unwrap_or(&current.name);
            let code = request.code.as_deref().unwrap_or(&current.code);
            if self
                .store
                .exists_by_name_or_code(name, code, Some(department_id))
                .await?
            {
                return Err(conflict_error(
                    "Department with same name or code already exists",
                    "department_mutator::update_department",
                ));
            }
        }

        // スナップショットを取り直してインデックスを構築
        let snapshot = self.store.fetch_all().await?;
        let before: HashMap<DepartmentId, DepartmentNode> =
            snapshot.iter().map(|n| (n.id, n.clone())).collect();
        let mut index = NodeIndex::build(snapshot);

        // 親変更時の存在チェックと循環参照チェック
        let effective_parent = match request.parent_id {
            Some(new_parent) => new_parent,
            None => current.parent_id,
        };
        let parent_changed = effective_parent != current.parent_id;
        let new_level = if parent_changed {
            match effective_parent {
                Some(parent_id) => {
                    let parent = index.get(parent_id).ok_or_else(|| {
                        not_found_error(
                            "Parent department",
                            &parent_id.to_string(),
                            "department_mutator::update_department",
                        )
                    })?;
                    if cycle_detector::would_create_cycle(department_id, parent_id, &index) {
                        return Err(AppError::InvalidParent(
                            "Department cannot be moved under itself or one of its descendants"
                                .to_string(),
                        ));
                    }
                    parent.level + 1
                }
                None => ROOT_LEVEL,
            }
        } else {
            current.level
        };

        // マネージャー変更の適格性チェック（現任を渡して再割り当てを許容）
        if let Some(Some(candidate_id)) = request.manager_id {
            self.check_manager(candidate_id, false, current.manager_id, Some(department_id))
                .await?;
        }

        // ここから先は不変条件を満たすことが確定しているのでインメモリ適用
        let level_delta = new_level - current.level;
        let updated = {
            let node = index.get_mut(department_id).ok_or_else(|| {
                internal_server_error(
                    "department missing from snapshot",
                    "department_mutator::update_department",
                    "Failed to update department",
                )
            })?;

            if let Some(name) = request.name {
                node.name = name;
            }
            if let Some(code) = request.code {
                node.code = code;
            }
            if let Some(description) = request.description {
                node.description = Some(description);
            }
            if let Some(manager_id) = request.manager_id {
                node.manager_id = manager_id;
            }
            if let Some(status) = request.status {
                node.status = status;
            }
            if parent_changed {
                node.parent_id = effective_parent;
                node.level = new_level;
            }
            node.touch();
            node.clone()
        };

        // 対象自身を更新した後に子孫へレベル差分を伝播する
        let mut touched = vec![department_id];
        if level_delta != 0 {
            touched.extend(level_recalculator::propagate(
                department_id,
                level_delta,
                &mut index,
            ));
        }

        let changes = self.stage_replacements(&touched, &before, &index)?;
        self.store.commit(changes).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department updated successfully",
            "department_id" => department_id,
            "level_delta" => level_delta,
            "nodes_touched" => touched.len()
        );

        self.resolve_view(updated).await
    }

    // 部門の削除（直下の子部門を付け替えてから物理削除）
    pub async fn delete_department(&self, department_id: DepartmentId) -> AppResult<()> {
        log_with_context!(
            tracing::Level::DEBUG,
            "Deleting department",
            "department_id" => department_id
        );

        let department = self.store.fetch_by_id(department_id).await?.ok_or_else(|| {
            not_found_error(
                "Department",
                &department_id.to_string(),
                "department_mutator::delete_department",
            )
        })?;

        let snapshot = self.store.fetch_all().await?;
        let before: HashMap<DepartmentId, DepartmentNode> =
            snapshot.iter().map(|n| (n.id, n.clone())).collect();
        let mut index = NodeIndex::build(snapshot);

        // 直下の子の付け替えと子孫のレベル再計算
        let touched = reparenting_policy::reassign_children(&department, &mut index);

        // 物理削除の前に所属メンバーの部門リンクを解除する
        self.members
            .clear_department_for_members(department_id)
            .await?;

        let mut changes = self.stage_replacements(&touched, &before, &index)?;
        changes.remove(department);
        self.store.commit(changes).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department deleted successfully",
            "department_id" => department_id,
            "children_reassigned" => touched.len()
        );

        Ok(())
    }

    // 変更を受けたノードの置き換え操作を組み立てる
    fn stage_replacements(
        &self,
        touched: &[DepartmentId],
        before: &HashMap<DepartmentId, DepartmentNode>,
        index: &NodeIndex,
    ) -> AppResult<ChangeSet> {
        let mut changes = ChangeSet::new();
        for &node_id in touched {
            let before_node = before.get(&node_id).cloned().ok_or_else(|| {
                internal_server_error(
                    format!("node {} missing from snapshot", node_id),
                    "department_mutator::stage_replacements",
                    "Failed to assemble department changes",
                )
            })?;
            let after_node = index.get(node_id).cloned().ok_or_else(|| {
                internal_server_error(
                    format!("node {} missing from index", node_id),
                    "department_mutator::stage_replacements",
                    "Failed to assemble department changes",
                )
            })?;
            changes.replace(before_node, after_node);
        }
        Ok(changes)
    }

    async fn check_manager(
        &self,
        candidate_id: i32,
        is_create: bool,
        previous_manager_id: Option<i32>,
        node_id: Option<DepartmentId>,
    ) -> AppResult<()> {
        match self
            .managers
            .validate_candidate(candidate_id, is_create, previous_manager_id, node_id)
            .await?
        {
            ManagerDecision::Accepted => Ok(()),
            ManagerDecision::Rejected(reason) => {
                log_with_context!(
                    tracing::Level::WARN,
                    "Manager candidate rejected",
                    "candidate_id" => candidate_id,
                    "reason" => &reason
                );
                Err(validation_error("manager_id", &reason))
            }
        }
    }

    // コミット後に親部門名とマネージャー名を解決してレスポンスを作る
    async fn resolve_view(&self, node: DepartmentNode) -> AppResult<DepartmentResponse> {
        let parent_name = match node.parent_id {
            Some(parent_id) => self.store.fetch_by_id(parent_id).await?.map(|p| p.name),
            None => None,
        };
        let manager_name = match node.manager_id {
            Some(manager_id) => self.managers.display_name(manager_id).await?,
            None => None,
        };
        Ok(DepartmentResponse::from_node(node, parent_name, manager_name))
    }
}
