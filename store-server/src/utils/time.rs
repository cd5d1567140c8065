//! 时间工具函数 — 业务时区转换
//!
//! 考勤的"日期"是业务时区下的日历日；所有换算统一在这里完成，
//! repository 层只接收换算好的 `NaiveDate` 和 `DateTime<Utc>`。

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// UTC 时刻在业务时区下对应的日历日
pub fn business_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// 工时 = (下班 − 上班) 毫秒 / 3,600,000，保留两位小数
///
/// 与客户端约定一致，结果以字符串存储 (如 "2.50")。
pub fn format_total_hours(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> String {
    let millis = clock_out.signed_duration_since(clock_in).num_milliseconds();
    let hours = millis as f64 / 3_600_000.0;
    format!("{hours:.2}")
}
