//! Taste Haven Chat Server - 餐厅聊天助手服务端
//!
//! # 架构概述
//!
//! 本模块是聊天服务端的主入口，提供以下核心功能：
//!
//! - **流程引擎** (`flows`): 意图识别 + 下单/订位多步状态机
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//! - **文本生成** (`genai`): Gemini API 会话回退
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! chat-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── flows/         # 意图识别 + 流程状态机
//! ├── restaurant/    # 静态餐厅配置与菜单
//! ├── genai/         # 文本生成客户端
//! ├── money/         # 金额精度计算
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod flows;
pub mod genai;
pub mod money;
pub mod restaurant;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::db::DbService;
pub use crate::flows::{ChatEngine, IntentDetector, ItemExtractor};
pub use crate::restaurant::Restaurant;
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
  ______           __
 /_  __/___ ______/ /____
  / / / __ `/ ___/ __/ _ \
 / / / /_/ (__  ) /_/  __/
/_/  \__,_/____/\__/\___/
    __  __
   / / / /___ __   _____  ____
  / /_/ / __ `/ | / / _ \/ __ \
 / __  / /_/ /| |/ /  __/ / / /
/_/ /_/\__,_/ |___/\___/_/ /_/
    "#
    );
}
