use crate::config::{Config, SymbolSpec};
use crate::errors::{BoardError, Result};
use crate::models::summary::Summary;
use crate::sources::base::SummarySource;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

/// Camarilla 汇总接口
pub struct CamarillaApi {
    client: Client,
    code: String,
    url: String,
}

impl CamarillaApi {
    /// 为单个合约创建接口客户端
    pub fn new(config: &Config, spec: &SymbolSpec) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(BoardError::RequestError)?;

        Ok(Self::with_client(client, config, spec))
    }

    /// 多个合约共用同一个连接池
    pub fn with_client(client: Client, config: &Config, spec: &SymbolSpec) -> Self {
        Self {
            client,
            code: spec.code.clone(),
            url: config.summary_url(&spec.code),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SummarySource for CamarillaApi {
    fn symbol_code(&self) -> &str {
        &self.code
    }

    async fn fetch_summary(&self) -> Result<Summary> {
        info!("获取 {} 汇总数据", self.code);

        let response = self.client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(BoardError::RequestError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::HttpStatus {
                code: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let text = response.text().await?;
        debug!("{} 响应长度 {} 字节", self.code, text.len());

        let summary = Summary::from_json(&text)?;
        info!(
            "{} 汇总数据: 趋势 {}, {} 个价位",
            summary.symbol,
            summary.trend,
            summary.camarilla_levels.len()
        );
        Ok(summary)
    }
}
