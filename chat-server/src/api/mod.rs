//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`config`] - 餐厅信息
//! - [`menu`] - 菜单查询
//! - [`chat`] - 聊天回合 (含多步流程端点)
//! - [`orders`] - 订单创建与查询
//! - [`reservations`] - 订位创建与查询
//! - [`recommendations`] - 菜品推荐
//! - [`conversation`] - 会话历史

pub mod chat;
pub mod config;
pub mod conversation;
pub mod health;
pub mod menu;
pub mod orders;
pub mod recommendations;
pub mod reservations;

use std::time::Duration;

use axum::Router;
use http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(config::router())
        .merge(menu::router())
        .merge(chat::router())
        .merge(orders::router())
        .merge(reservations::router())
        .merge(recommendations::router())
        .merge(conversation::router())
}

/// Build a fully configured application with middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(cors_layer(&state.config))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Timeout - Bound every request, 408 on expiry
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
}

fn cors_layer(config: &crate::core::Config) -> CorsLayer {
    match &config.cors_origins {
        None => CorsLayer::permissive(),
        Some(origins) => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        }
    }
}
