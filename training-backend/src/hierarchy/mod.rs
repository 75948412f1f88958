// src/hierarchy/mod.rs

//! 部門階層のグラフ処理
//!
//! 永続化層から取得したスナップショットを隣接マップ（NodeIndex）に変換し、
//! 循環検出・レベル再計算・子部門の付け替えを同期的に行う。I/Oは持たない。

pub mod cycle_detector;
pub mod level_recalculator;
pub mod node_index;
pub mod reparenting_policy;
