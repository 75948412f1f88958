// src/gateway/mod.rs

//! 外部コラボレーターの境界
//!
//! 永続化層とユーザーディレクトリはケイパビリティとしてトレイトで注入する。
//! テストではインメモリのフェイクに差し替えられる。

pub mod department_store;
pub mod user_directory;

pub use department_store::{ChangeOp, ChangeSet, DepartmentStore};
pub use user_directory::{ManagerDecision, ManagerValidator, MemberRegistry};
