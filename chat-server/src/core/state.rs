//! 服务器状态 - 持有所有服务的共享引用
//!
//! ServerState 使用 Arc 实现浅拷贝，所有权成本极低。
//!
//! | 字段 | 类型 | 说明 |
//! |------|------|------|
//! | config | Config | 配置项 (不可变) |
//! | db | DbService | SQLite 连接池 |
//! | restaurant | Arc<Restaurant> | 静态餐厅配置 + 菜单 |
//! | engine | Arc<ChatEngine> | 聊天回合引擎 |

use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::flows::ChatEngine;
use crate::genai::{GeminiClient, TextGenerator};
use crate::restaurant::Restaurant;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 数据库服务
    pub db: DbService,
    /// 静态餐厅配置
    pub restaurant: Arc<Restaurant>,
    /// 聊天回合引擎
    pub engine: Arc<ChatEngine>,
}

impl ServerState {
    /// 初始化所有服务: 数据库、菜单目录、生成客户端、引擎
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        let restaurant = Arc::new(Restaurant::taste_haven());

        let generator: Arc<dyn TextGenerator> = Arc::new(
            GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())
                .map_err(|e| AppError::internal(format!("Failed to build Gemini client: {e}")))?,
        );

        let engine = Arc::new(ChatEngine::new(db.clone(), restaurant.clone(), generator));

        Ok(Self {
            config: config.clone(),
            db,
            restaurant,
            engine,
        })
    }
}
