use crate::config::Config;
use crate::errors::{BoardError, Result};
use crate::models::summary::Summary;
use crate::sources::base::SummarySource;
use crate::sources::camarilla::CamarillaApi;
use log::{error, info};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// 单个卡片的抓取结果
#[derive(Debug)]
pub struct SlotUpdate {
    /// 发起抓取时的批次号，用于丢弃过期结果
    pub generation: u64,
    pub index: usize,
    pub code: String,
    pub result: Result<Summary>,
}

/// 看板数据服务，负责并发抓取所有合约
pub struct DashboardService {
    sources: Vec<Arc<dyn SummarySource + Send + Sync>>,
}

impl DashboardService {
    pub fn new(sources: Vec<Arc<dyn SummarySource + Send + Sync>>) -> Self {
        Self { sources }
    }

    /// 按配置为每个合约创建 Camarilla 接口
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(BoardError::RequestError)?;

        let sources = config
            .symbols
            .iter()
            .map(|spec| {
                Arc::new(CamarillaApi::with_client(client.clone(), config, spec))
                    as Arc<dyn SummarySource + Send + Sync>
            })
            .collect();

        Ok(Self::new(sources))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn codes(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.symbol_code().to_string()).collect()
    }

    /// 并发抓取全部合约，按配置顺序返回，每个结果互不影响
    pub async fn load_all(&self) -> Vec<Result<Summary>> {
        info!("Fetching {} summaries", self.sources.len());

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                tokio::spawn(async move { source.fetch_summary().await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (handle, source) in handles.into_iter().zip(&self.sources) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(BoardError::Unknown(format!(
                    "fetch task for {} failed: {}",
                    source.symbol_code(),
                    e
                ))),
            };
            if let Err(e) = &result {
                error!("Failed to fetch {}: {}", source.symbol_code(), e);
            }
            results.push(result);
        }

        results
    }

    /// 每个合约一个任务，谁先返回谁先送到界面
    pub fn spawn_fetches(&self, generation: u64, tx: UnboundedSender<SlotUpdate>) {
        info!("Spawning fetch batch {} for {} symbols", generation, self.sources.len());

        for (index, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = source.fetch_summary().await;
                if let Err(e) = &result {
                    error!("Failed to fetch {}: {}", source.symbol_code(), e);
                }
                let update = SlotUpdate {
                    generation,
                    index,
                    code: source.symbol_code().to_string(),
                    result,
                };
                // 界面已退出时接收端会被丢弃
                let _ = tx.send(update);
            });
        }
    }
}
