use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use crate::errors::{Result, BoardError};

// 接口使用的日期格式，先试 DD/MM/YYYY
const DMY_FORMAT: &str = "%d/%m/%Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// 星期缩写，与接口返回的 day 字段一致
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// 解析日期字符串，返回日期和匹配到的格式
pub fn parse_display_date(date_str: &str) -> Result<(NaiveDate, &'static str)> {
    let trimmed = date_str.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DMY_FORMAT) {
        return Ok((date, DMY_FORMAT));
    }
    Ok((NaiveDate::parse_from_str(trimmed, ISO_FORMAT)?, ISO_FORMAT))
}

/// 日期加一天（只是日历日，不考虑交易所假期），按原格式输出并返回星期缩写
pub fn next_calendar_day(date_str: &str) -> Result<(String, &'static str)> {
    let (date, format) = parse_display_date(date_str)?;
    let next = date
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| BoardError::DateError(format!("Date out of range: {}", date_str)))?;

    Ok((next.format(format).to_string(), weekday_abbrev(next.weekday())))
}

/// 价格统一保留两位小数，恰好在中点时远离零取整（与 toFixed 一致），-0 显示为 0.00
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    // 按二进制精确值换算，不做十进制近似
    let Some(abs) = Decimal::from_f64_retain(value.abs()) else {
        return format!("{:.2}", value);
    };
    let rounded = abs.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if negative {
        format!("-{:.2}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_rollover() {
        assert_eq!(next_calendar_day("31/12/2025").unwrap(), ("01/01/2026".to_string(), "Thu"));
    }

    #[test]
    fn month_rollover_and_leap_years() {
        assert_eq!(next_calendar_day("31/10/2025").unwrap(), ("01/11/2025".to_string(), "Sat"));
        assert_eq!(next_calendar_day("28/02/2025").unwrap(), ("01/03/2025".to_string(), "Sat"));
        assert_eq!(next_calendar_day("28/02/2024").unwrap(), ("29/02/2024".to_string(), "Thu"));
        assert_eq!(next_calendar_day("29/02/2024").unwrap(), ("01/03/2024".to_string(), "Fri"));
        assert_eq!(next_calendar_day("30/04/2025").unwrap(), ("01/05/2025".to_string(), "Thu"));
    }

    #[test]
    fn walks_through_all_seven_weekdays() {
        // 2025-11-03 是星期一
        let mut date = "02/11/2025".to_string();
        let mut days = Vec::new();
        for _ in 0..7 {
            let (next, day) = next_calendar_day(&date).unwrap();
            days.push(day);
            date = next;
        }
        assert_eq!(days, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(date, "09/11/2025");
    }

    #[test]
    fn iso_input_keeps_iso_output() {
        assert_eq!(next_calendar_day("2025-12-31").unwrap(), ("2026-01-01".to_string(), "Thu"));
    }

    #[test]
    fn garbage_is_a_date_error() {
        assert!(matches!(next_calendar_day("32/01/2025"), Err(BoardError::DateError(_))));
        assert!(matches!(next_calendar_day("tomorrow"), Err(BoardError::DateError(_))));
        assert!(matches!(next_calendar_day(""), Err(BoardError::DateError(_))));
    }

    #[test]
    fn prices_always_have_two_decimals() {
        assert_eq!(format_price(3377.0), "3377.00");
        assert_eq!(format_price(3421.4), "3421.40");
        assert_eq!(format_price(3436.789), "3436.79");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(-1.005), "-1.00");
        assert_eq!(format_price(912.125_000_1), "912.13");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_price(3421.125), "3421.13");
        assert_eq!(format_price(0.125), "0.13");
        assert_eq!(format_price(-0.125), "-0.13");
        assert_eq!(format_price(2.5), "2.50");
        // 1.005 的二进制值略小于中点
        assert_eq!(format_price(1.005), "1.00");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_price(-0.0), "0.00");
        assert_eq!(format_price(-0.001), "-0.00");
    }
}
