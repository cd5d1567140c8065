//! Attendance Repository
//!
//! 每人每天一条记录的状态机：
//!
//! ```text
//! NOT_CLOCKED_IN --clock_in--> CLOCKED_IN --clock_out--> CLOCKED_OUT (当日终态)
//! ```
//!
//! 转换显式门禁：当日已有记录时重复 clock_in 返回 Duplicate (一天一班，
//! 不会静默覆盖已完成的班次)；已下班后的重复 clock_out 同样拒绝。

use chrono::{DateTime, NaiveDate, Utc};
use shared::models::AttendanceRecord;

use super::{RepoError, RepoResult, keys};
use crate::db::Kv;
use crate::utils::time::format_total_hours;

pub async fn find(kv: &Kv, user_id: &str, date: NaiveDate) -> RepoResult<Option<AttendanceRecord>> {
    Ok(kv.get(&keys::attendance(user_id, date)).await?)
}

/// 上班打卡 — 当日已有记录时拒绝
pub async fn clock_in(
    kv: &Kv,
    user_id: &str,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> RepoResult<AttendanceRecord> {
    if find(kv, user_id, date).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Already clocked in on {date}"
        )));
    }

    let record = AttendanceRecord {
        user_id: user_id.to_string(),
        date,
        clock_in: now,
        clock_out: None,
        total_hours: None,
    };

    kv.set(&keys::attendance(user_id, date), &record).await?;
    Ok(record)
}

/// 下班打卡 — 要求当日已上班且尚未下班，写入 clockOut 和 totalHours
pub async fn clock_out(
    kv: &Kv,
    user_id: &str,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> RepoResult<AttendanceRecord> {
    let mut record = find(kv, user_id, date)
        .await?
        .ok_or_else(|| RepoError::NotFound("No clock in record found for today".to_string()))?;

    if record.is_clocked_out() {
        return Err(RepoError::Duplicate(format!(
            "Already clocked out on {date}"
        )));
    }

    record.total_hours = Some(format_total_hours(record.clock_in, now));
    record.clock_out = Some(now);

    kv.set(&keys::attendance(user_id, date), &record).await?;
    Ok(record)
}

/// 全量考勤记录 (owner 读取范围)
pub async fn records_all(kv: &Kv) -> RepoResult<Vec<AttendanceRecord>> {
    Ok(kv.get_by_prefix(keys::ATTENDANCE_PREFIX).await?)
}

/// 单个用户的考勤记录
///
/// 前缀限定之外再按存储的 userId 过滤一次 (纵深防御，
/// 防止键前缀歧义导致越权读取)。
pub async fn records_for(kv: &Kv, user_id: &str) -> RepoResult<Vec<AttendanceRecord>> {
    let records: Vec<AttendanceRecord> = kv
        .get_by_prefix(&keys::attendance_user_prefix(user_id))
        .await?;
    Ok(records
        .into_iter()
        .filter(|r| r.user_id == user_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryKv;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn test_kv() -> Kv {
        Kv::new(Arc::new(MemoryKv::new()))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[tokio::test]
    async fn test_clock_out_without_clock_in_is_not_found() {
        let kv = test_kv();
        let err = clock_out(&kv, "u1", date(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_clock_in_twice_same_day_is_rejected() {
        let kv = test_kv();
        clock_in(&kv, "u1", date(), Utc::now()).await.unwrap();
        let err = clock_in(&kv, "u1", date(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_clock_out_computes_total_hours() {
        let kv = test_kv();
        let morning = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 6, 2, 12, 30, 0).unwrap();

        clock_in(&kv, "u1", date(), morning).await.unwrap();
        let record = clock_out(&kv, "u1", date(), noon).await.unwrap();

        assert_eq!(record.total_hours.as_deref(), Some("2.50"));
        assert_eq!(record.clock_out, Some(noon));
    }

    #[tokio::test]
    async fn test_clock_out_twice_is_rejected() {
        let kv = test_kv();
        clock_in(&kv, "u1", date(), Utc::now()).await.unwrap();
        clock_out(&kv, "u1", date(), Utc::now()).await.unwrap();
        let err = clock_out(&kv, "u1", date(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_next_day_allows_new_shift() {
        let kv = test_kv();
        clock_in(&kv, "u1", date(), Utc::now()).await.unwrap();
        let next = date().succ_opt().unwrap();
        assert!(clock_in(&kv, "u1", next, Utc::now()).await.is_ok());
    }

    #[tokio::test]
    async fn test_records_scoped_per_user() {
        let kv = test_kv();
        clock_in(&kv, "u1", date(), Utc::now()).await.unwrap();
        clock_in(&kv, "u2", date(), Utc::now()).await.unwrap();

        let all = records_all(&kv).await.unwrap();
        assert_eq!(all.len(), 2);

        let own = records_for(&kv, "u1").await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].user_id, "u1");
    }
}
