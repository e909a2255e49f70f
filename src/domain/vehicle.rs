// ==========================================
// 救援站勤务排班系统 - 车辆领域模型
// ==========================================

use crate::domain::types::VehicleKind;
use serde::{Deserialize, Serialize};

// ==========================================
// Vehicle - 车辆
// ==========================================
// 对齐: vehicles 表
// 归档车辆不再参与任何月份的岗位计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub kind: VehicleKind,
    pub name: String,
    pub archived: bool,
}

// ==========================================
// VehicleActivation - 车辆月度启用标记
// ==========================================
// 对齐: vehicle_activation 表
// 未配置的 (车辆, 年, 月) 默认启用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleActivation {
    pub vehicle_id: i64,
    pub year: i32,

    /// 月份 (1 = 一月, 12 = 十二月)
    pub month: u32,
    pub enabled: bool,
}

impl Vehicle {
    /// 车辆在指定 (年, 月) 是否参与岗位计算
    ///
    /// 规则: 归档 → 否；有停用标记 → 否；其余默认启用。
    pub fn is_active_in(&self, year: i32, month: u32, activations: &[VehicleActivation]) -> bool {
        if self.archived {
            return false;
        }
        activations
            .iter()
            .find(|a| a.vehicle_id == self.id && a.year == year && a.month == month)
            .map(|a| a.enabled)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rtw(id: i64, archived: bool) -> Vehicle {
        Vehicle {
            id,
            kind: VehicleKind::Rtw,
            name: format!("RTW {}", id),
            archived,
        }
    }

    #[test]
    fn test_default_active_without_flags() {
        let v = rtw(1, false);
        assert!(v.is_active_in(2025, 3, &[]));
    }

    #[test]
    fn test_disabled_month_only() {
        let v = rtw(1, false);
        let flags = vec![VehicleActivation {
            vehicle_id: 1,
            year: 2025,
            month: 3,
            enabled: false,
        }];
        assert!(!v.is_active_in(2025, 3, &flags));
        assert!(v.is_active_in(2025, 4, &flags));
        assert!(v.is_active_in(2024, 3, &flags));
    }

    #[test]
    fn test_archived_overrides_activation() {
        let v = rtw(1, true);
        let flags = vec![VehicleActivation {
            vehicle_id: 1,
            year: 2025,
            month: 3,
            enabled: true,
        }];
        assert!(!v.is_active_in(2025, 3, &flags));
    }
}
