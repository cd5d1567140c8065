//! Attendance Model
//!
//! 考勤记录以 (userId, date) 为键，每人每天至多一条。
//! 生命周期：打卡上班时创建 (clockOut 为空)，打卡下班时写入 clockOut
//! 和 totalHours，此后该日记录不再变更。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Attendance record for one user on one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    /// 工时，保留两位小数的字符串 (如 "2.50")
    pub total_hours: Option<String>,
}

impl AttendanceRecord {
    /// 是否已下班打卡 (该日终态)
    pub fn is_clocked_out(&self) -> bool {
        self.clock_out.is_some()
    }
}

/// 单条考勤响应 `{ success?, attendance }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    pub attendance: AttendanceRecord,
}

/// 考勤列表响应 `{ attendance }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceListResponse {
    pub attendance: Vec<AttendanceRecord>,
}
