// ==========================================
// 救援站勤务排班系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod holiday_repo;
pub mod pattern_repo;
pub mod roster_repo;
pub mod shift_type_repo;
pub mod staff_repo;
pub mod vehicle_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use holiday_repo::HolidayRepository;
pub use pattern_repo::PatternRepository;
pub use roster_repo::RosterRepository;
pub use shift_type_repo::ShiftTypeRepository;
pub use staff_repo::StaffRepository;
pub use vehicle_repo::VehicleRepository;
