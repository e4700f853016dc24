use crate::errors::{BoardError, Result};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 最近一个交易日的行情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSession {
    pub date: String,
    pub day: String,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub settlement: f64,
}

/// 下一个交易日
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingDay {
    pub date: String,
    pub day: String,
}

/// 单个 Camarilla 价位，例如 H06 / L05
#[derive(Debug, Clone, PartialEq)]
pub struct CamarillaLevel {
    pub key: String,
    pub value: f64,
}

/// Market summary for one symbol, as returned by the summary API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub scraped_at: String,
    pub symbol: String,
    pub trend: String,
    pub latest: LatestSession,
    pub next_trading_day: TradingDay,
    // 保持接口返回的键顺序
    #[serde(
        deserialize_with = "deserialize_levels",
        serialize_with = "serialize_levels"
    )]
    pub camarilla_levels: Vec<CamarillaLevel>,
}

impl Summary {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn trend(&self) -> Trend {
        Trend::parse(&self.trend)
    }
}

fn deserialize_levels<'de, D>(deserializer: D) -> std::result::Result<Vec<CamarillaLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LevelsVisitor;

    impl<'de> Visitor<'de> for LevelsVisitor {
        type Value = Vec<CamarillaLevel>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of level names to prices")
        }

        fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut levels = Vec::with_capacity(access.size_hint().unwrap_or(12));
            while let Some((key, value)) = access.next_entry::<String, f64>()? {
                levels.push(CamarillaLevel { key, value });
            }
            Ok(levels)
        }
    }

    deserializer.deserialize_map(LevelsVisitor)
}

fn serialize_levels<S>(levels: &[CamarillaLevel], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(levels.iter().map(|l| (&l.key, l.value)))
}

/// 趋势：接口返回 "in"/"out"，大小写不固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    In,
    Out,
}

impl Trend {
    /// 只有 "out"（不区分大小写）算作 Out，其余一律视为 In
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("out") {
            Trend::Out
        } else {
            Trend::In
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Trend::In => Trend::Out,
            Trend::Out => Trend::In,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::In => "In",
            Trend::Out => "Out",
        }
    }
}

/// 卡片头部的展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// 只显示下一交易日
    Index,
    /// 同时显示最近交易日和下一交易日
    Commodity,
}

impl SymbolKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "index" => Ok(SymbolKind::Index),
            "commodity" => Ok(SymbolKind::Commodity),
            other => Err(BoardError::ConfigError(format!(
                "Unknown symbol kind: {} (expected index or commodity)",
                other
            ))),
        }
    }

    pub fn shows_latest_session(self) -> bool {
        matches!(self, SymbolKind::Commodity)
    }
}
