// ==========================================
// 救援站勤务排班系统 - 应用层
// ==========================================
// 职责: 应用状态组装与 Tauri 命令暴露
// ==========================================

pub mod state;

#[cfg(feature = "tauri-app")]
pub mod tauri_commands;

pub use state::{get_default_db_path, AppState};
