// ==========================================
// 救援站勤务排班系统 - 核心库
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 系统定位: 勤务排班与人力统计 (人工最终控制权)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 班制与统计规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    BreakdownFilter, EvaluationMode, PatternScope, PersonKind, ShiftHalf, VehicleKind,
};

// 领域实体
pub use domain::{
    Apprentice, DutyDay, Holiday, MonthlySeries, PatternSequence, PersonMonthly, PersonRef,
    Personnel, RosterEntry, ShiftType, SlotTag, Vehicle, VehicleActivation,
};

// 引擎
pub use engine::{
    BreakdownEngine, DutyDayCalculator, EligibilityEngine, PatternResolver, RosterAggregator,
    RosterStatsConfig, SlotAssignmentWriter,
};

// API
pub use api::{ConfigApi, MasterDataApi, PatternApi, RosterApi, StatsApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "救援站勤务排班系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
