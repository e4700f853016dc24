// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod sources;
pub mod services;
pub mod ui;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::summary::{Summary, LatestSession, TradingDay, CamarillaLevel, Trend, SymbolKind};
pub use config::{Config, SymbolSpec};
pub use services::dashboard_service::DashboardService;
pub use errors::{Result, BoardError};
