/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 当前本地日期零点的 UTC 时间戳（毫秒）
///
/// DST gap fallback: 如果本地零点不存在，取最早的有效时刻。
pub fn local_day_start_millis() -> i64 {
    day_start_millis(chrono::Local::now().date_naive())
}

/// 指定本地日期零点 → Unix millis
pub fn day_start_millis(date: chrono::NaiveDate) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(chrono::Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Unix millis → 本地时间字符串 (YYYY-MM-DD HH:MM:SS)
pub fn format_local_millis(millis: i64) -> String {
    use chrono::TimeZone;
    match chrono::Local.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        chrono::LocalResult::None => "-".to_string(),
    }
}
