// ==========================================
// 救援站勤务排班系统 - Tauri 命令层
// ==========================================
// 职责: 将 API 层暴露给前端 (IPC 边界)
// 约定: 所有命令返回 JSON 字符串，错误走统一编码封装
// ==========================================

mod common;
mod config;
mod master_data;
mod roster;
mod stats;

pub use config::*;
pub use master_data::*;
pub use roster::*;
pub use stats::*;
