//! Attendance API Handlers
//!
//! 打卡的"日期"按配置的业务时区换算，换算和状态机门禁都在下层完成。

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use shared::models::{AttendanceListResponse, AttendanceResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::attendance;
use crate::utils::AppResult;
use crate::utils::time::business_date;

/// POST /api/attendance/clock-in - 上班打卡 (employee)
///
/// 当日已有记录返回 409，不会覆盖已完成的班次。
pub async fn clock_in(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AttendanceResponse>> {
    let now = Utc::now();
    let date = business_date(now, state.config.timezone);

    let record = attendance::clock_in(&state.kv, &current.id, date, now).await?;
    tracing::info!(user_id = %current.id, %date, "Clock in recorded");

    Ok(Json(AttendanceResponse {
        success: true,
        attendance: record,
    }))
}

/// POST /api/attendance/clock-out - 下班打卡 (employee)
///
/// 当日无上班记录返回 404；已下班的重复打卡返回 409。
pub async fn clock_out(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AttendanceResponse>> {
    let now = Utc::now();
    let date = business_date(now, state.config.timezone);

    let record = attendance::clock_out(&state.kv, &current.id, date, now).await?;
    tracing::info!(
        user_id = %current.id,
        %date,
        total_hours = record.total_hours.as_deref().unwrap_or("-"),
        "Clock out recorded"
    );

    Ok(Json(AttendanceResponse {
        success: true,
        attendance: record,
    }))
}

/// GET /api/attendance - 考勤记录
///
/// owner 读取全量记录，其余角色只读取本人记录。
pub async fn records(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AttendanceListResponse>> {
    let records = if current.is_owner() {
        attendance::records_all(&state.kv).await?
    } else {
        attendance::records_for(&state.kv, &current.id).await?
    };

    Ok(Json(AttendanceListResponse {
        attendance: records,
    }))
}
