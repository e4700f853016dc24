use crate::errors::Result;
use crate::models::summary::{Summary, SymbolKind, TradingDay, Trend};
use crate::ui::theme;
use crate::util::{format_price, next_calendar_day};
use log::debug;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

// 价位名和数值之间的间距
const LEVEL_GAP: &str = "     ";

/// 卡片的本地展示状态，只影响显示，不改动接口数据
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub trend: String,
    pub next_trading_day: TradingDay,
    pub show_backlog: bool,
}

impl CardState {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            trend: summary.trend.clone(),
            next_trading_day: summary.next_trading_day.clone(),
            show_backlog: true,
        }
    }

    pub fn trend(&self) -> Trend {
        Trend::parse(&self.trend)
    }

    /// 切换后只会是 "In" 或 "Out"
    pub fn toggle_trend(&mut self) {
        self.trend = self.trend().toggled().label().to_string();
    }

    /// 模拟进入下一天，只做日历加一
    pub fn advance_next_day(&mut self) -> Result<()> {
        let (date, day) = next_calendar_day(&self.next_trading_day.date)?;
        debug!("next trading day {} -> {} {}", self.next_trading_day.date, date, day);
        self.next_trading_day = TradingDay {
            date,
            day: day.to_string(),
        };
        Ok(())
    }

    pub fn toggle_backlog(&mut self) {
        self.show_backlog = !self.show_backlog;
    }
}

fn day_badge(day: &TradingDay) -> Span<'static> {
    Span::styled(
        format!(" {} {} ", day.date, day.day),
        theme::day_badge_style(&day.day),
    )
}

fn badge_row(summary: &Summary, kind: SymbolKind, state: &CardState) -> Line<'static> {
    let mut spans = Vec::new();

    if kind.shows_latest_session() {
        let latest = TradingDay {
            date: summary.latest.date.clone(),
            day: summary.latest.day.clone(),
        };
        spans.push(day_badge(&latest));
        spans.push(Span::raw(" "));
    }

    spans.push(day_badge(&state.next_trading_day));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!(" {} ", state.trend),
        theme::trend_badge_style(state.trend()),
    ));

    Line::from(spans)
}

fn level_line(key: &str, value: f64) -> Line<'static> {
    let style = theme::level_style(key);
    Line::from(vec![
        Span::styled(key.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::raw(LEVEL_GAP),
        Span::styled(format_price(value), style),
    ])
}

fn labeled(label: &str, value: f64) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{}: ", label), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format_price(value)),
    ]
}

/// 把一个合约的汇总数据映射成卡片内容
pub fn card_lines(summary: &Summary, kind: SymbolKind, state: &CardState) -> Vec<Line<'static>> {
    let mut lines = vec![
        badge_row(summary, kind, state),
        Line::raw(""),
        Line::styled(
            summary.symbol.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];

    lines.extend(
        summary
            .camarilla_levels
            .iter()
            .map(|level| level_line(&level.key, level.value)),
    );

    if state.show_backlog {
        let latest = &summary.latest;
        lines.push(Line::styled("────────────────────────", theme::muted()));

        let mut high_low = labeled("High", latest.high);
        high_low.push(Span::raw("  "));
        high_low.extend(labeled("Low", latest.low));
        lines.push(Line::from(high_low));

        let mut close_settle = labeled("Close", latest.close);
        close_settle.push(Span::raw("  "));
        close_settle.extend(labeled("Settle", latest.settlement));
        lines.push(Line::from(close_settle));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(format!("scraped {}", summary.scraped_at), theme::muted()));

    lines
}

/// 去掉样式，供 show 命令直接打印
pub fn plain_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
