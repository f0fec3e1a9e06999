use chrono::{DateTime, Utc};

/// 格式化剩余时间为人类可读的字符串
///
/// `to` 早于 `from` 时返回 "expired"。
pub fn format_remaining(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let duration = to.signed_duration_since(from);

    if duration.num_seconds() < 0 {
        return "expired".to_string();
    }

    let days = duration.num_days();
    let hours = (duration.num_seconds() % 86400) / 3600;
    let minutes = (duration.num_seconds() % 3600) / 60;

    if days > 0 {
        if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        }
    } else if hours > 0 {
        if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", duration.num_seconds())
    }
}

/// 本地显示格式
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
