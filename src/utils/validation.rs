use crate::error::{ClientError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// 邮件中验证链接的 token；缺失或为空时不发请求
pub fn validate_verification_token(token: Option<&str>) -> Result<&str> {
    match token.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(ClientError::validation("Invalid verification link")),
    }
}

/// 解析预约时间（`datetime-local` 或纯日期格式）
pub fn parse_preferred_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::validation("Preferred date is required"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    if let Some(dt) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    Err(ClientError::validation("Preferred date is not a valid date"))
}

/// 预约时间不能早于 `now`；只给出日期时按天比较，当天可预约
pub fn validate_preferred_date(value: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let date = parse_preferred_date(value)?;
    let date_only = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok();

    let too_early = if date_only {
        date.date() < now.date()
    } else {
        date < now
    };
    if too_early {
        return Err(ClientError::validation("Preferred date must be in the future"));
    }
    Ok(date)
}
