use crate::models::summary::Trend;
use ratatui::style::{Color, Modifier, Style};

// Tailwind 色板
pub const RED_500: Color = Color::Rgb(239, 68, 68);
pub const RED_700: Color = Color::Rgb(185, 28, 28);
pub const GREEN_500: Color = Color::Rgb(34, 197, 94);
pub const GREEN_600: Color = Color::Rgb(22, 163, 74);
pub const GREEN_700: Color = Color::Rgb(21, 128, 61);

pub const YELLOW_400: Color = Color::Rgb(250, 204, 21);
pub const PINK_400: Color = Color::Rgb(244, 114, 182);
pub const GREEN_400: Color = Color::Rgb(74, 222, 128);
pub const ORANGE_400: Color = Color::Rgb(251, 146, 60);
pub const SKY_400: Color = Color::Rgb(56, 189, 248);
pub const PURPLE_400: Color = Color::Rgb(192, 132, 252);
pub const GRAY_400: Color = Color::Rgb(156, 163, 175);

/// 星期徽章底色，未知缩写用灰色
pub fn day_color(day: &str) -> Color {
    match day {
        "Mon" => YELLOW_400,
        "Tue" => PINK_400,
        "Wed" => GREEN_400,
        "Thu" => ORANGE_400,
        "Fri" => SKY_400,
        "Sat" => PURPLE_400,
        "Sun" => GRAY_400,
        _ => GRAY_400,
    }
}

pub fn day_badge_style(day: &str) -> Style {
    Style::default()
        .bg(day_color(day))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Out => RED_500,
        Trend::In => GREEN_500,
    }
}

pub fn trend_badge_style(trend: Trend) -> Style {
    Style::default()
        .bg(trend_color(trend))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// H 开头为红色系，L 开头为绿色系，H05/H06 与 L05/L06 用深色
pub fn level_color(key: &str) -> Option<Color> {
    if key.starts_with('H') {
        Some(if key == "H05" || key == "H06" { RED_700 } else { RED_500 })
    } else if key.starts_with('L') {
        Some(if key == "L05" || key == "L06" { GREEN_700 } else { GREEN_600 })
    } else {
        None
    }
}

pub fn level_style(key: &str) -> Style {
    match level_color(key) {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}
