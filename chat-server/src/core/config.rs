//! 服务器配置
//!
//! # 环境变量
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | PORT | 5000 | HTTP 服务端口 |
//! | DATABASE_PATH | restaurant.db | SQLite 数据库文件 |
//! | GEMINI_API_KEY | (必填) | 文本生成服务密钥 |
//! | GEMINI_MODEL | gemini-2.0-flash | 生成模型 |
//! | CORS_ORIGINS | (宽松) | 逗号分隔的允许来源 |
//! | ENVIRONMENT | development | 运行环境 |
//! | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
//!
//! # 示例
//!
//! ```ignore
//! PORT=8080 DATABASE_PATH=/data/restaurant.db cargo run
//! ```

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 文本生成服务密钥 (必填)
    pub gemini_api_key: String,
    /// 生成模型名称
    pub gemini_model: String,
    /// 允许的 CORS 来源；None 表示宽松模式
    pub cors_origins: Option<Vec<String>>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// `GEMINI_API_KEY` 缺失时返回错误，其他配置项使用默认值
    pub fn from_env() -> AppResult<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::internal("GEMINI_API_KEY environment variable not set"))?;

        Ok(Self {
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "restaurant.db".into()),
            gemini_api_key,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
            cors_origins: std::env::var("CORS_ORIGINS").ok().map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
