use crate::errors::{BoardError, Result};
use crate::models::summary::SymbolKind;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://camarilla-api.vercel.app";

/// 看板上的一个合约
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSpec {
    pub code: String,
    pub kind: SymbolKind,
}

impl SymbolSpec {
    pub fn new(code: &str, kind: SymbolKind) -> Self {
        Self {
            code: code.to_lowercase(),
            kind,
        }
    }

    /// 解析命令行参数 `CODE[:index|commodity]`，不写类型时默认为 index
    pub fn parse(arg: &str) -> Result<Self> {
        let (code, kind) = match arg.split_once(':') {
            Some((code, kind)) => (code.trim(), SymbolKind::parse(kind.trim())?),
            None => (arg.trim(), SymbolKind::Index),
        };

        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BoardError::ConfigError(format!("Invalid symbol code: {:?}", arg)));
        }

        Ok(Self::new(code, kind))
    }
}

pub struct Config {
    pub base_url: String,
    pub symbols: Vec<SymbolSpec>,
    pub request_timeout: Duration,
    pub refresh_interval: Option<Duration>, // None 表示只在启动时抓取一次
    pub log_file: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            symbols: vec![
                SymbolSpec::new("s50z25", SymbolKind::Index),
                SymbolSpec::new("goz25", SymbolKind::Commodity),
            ],
            request_timeout: Duration::from_secs(30),
            refresh_interval: None,
            log_file: "camarilla_board.log".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_symbols(mut self, symbols: Vec<SymbolSpec>) -> Self {
        if !symbols.is_empty() {
            self.symbols = symbols;
        }
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout = Duration::from_secs(secs);
        self
    }

    // 0 秒等同于关闭自动刷新
    pub fn with_refresh_interval(mut self, secs: u64) -> Self {
        self.refresh_interval = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
        self
    }

    pub fn with_log_file(mut self, path: &str) -> Self {
        self.log_file = path.to_string();
        self
    }

    /// 某个合约的汇总接口地址
    pub fn summary_url(&self, code: &str) -> String {
        format!("{}/api/v1/tfex/{}/summary", self.base_url, code)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_contracts() {
        let config = Config::new();
        assert_eq!(config.symbols.len(), 2);
        assert_eq!(config.symbols[0], SymbolSpec::new("s50z25", SymbolKind::Index));
        assert_eq!(config.symbols[1], SymbolSpec::new("goz25", SymbolKind::Commodity));
        assert!(config.refresh_interval.is_none());
        assert_eq!(
            config.summary_url("goz25"),
            "https://camarilla-api.vercel.app/api/v1/tfex/goz25/summary"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = Config::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            config.summary_url("s50z25"),
            "http://127.0.0.1:8080/api/v1/tfex/s50z25/summary"
        );
    }

    #[test]
    fn refresh_zero_disables_polling() {
        assert!(Config::new().with_refresh_interval(0).refresh_interval.is_none());
        assert_eq!(
            Config::new().with_refresh_interval(15).refresh_interval,
            Some(Duration::from_secs(15))
        );
    }

    #[test]
    fn symbol_spec_parsing() {
        assert_eq!(
            SymbolSpec::parse("GOZ25:commodity").unwrap(),
            SymbolSpec::new("goz25", SymbolKind::Commodity)
        );
        assert_eq!(
            SymbolSpec::parse("s50h26").unwrap(),
            SymbolSpec::new("s50h26", SymbolKind::Index)
        );
        assert!(SymbolSpec::parse("").is_err());
        assert!(SymbolSpec::parse("s50/z25").is_err());
        assert!(SymbolSpec::parse("goz25:bond").is_err());
    }

    #[test]
    fn empty_symbol_list_keeps_defaults() {
        let config = Config::new().with_symbols(Vec::new());
        assert_eq!(config.symbols.len(), 2);
    }
}
