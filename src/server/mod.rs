//! 浏览器界面
//!
//! - GET  /             上传页面
//! - POST /api/columns  上传表格，返回列、候选列与前 10 行预览
//! - POST /api/check    上传表格 + 规则，返回结果预览、统计与 base64 编码的 `检测结果.xlsx`
//! - POST /api/check/xlsx  同上，直接返回 xlsx 文件

mod handlers;

use crate::error::Result;
use crate::llm::ChatModel;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;

/// 上传大小上限
pub const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ChatModel>,
}

pub fn router(model: Arc<dyn ChatModel>) -> Router {
    let state = AppState { model };

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/columns", post(handlers::columns))
        .route("/api/check", post(handlers::check))
        .route("/api/check/xlsx", post(handlers::check_xlsx))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, model: Arc<dyn ChatModel>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    println!("🌐 浏览器访问: http://{}", listener.local_addr()?);

    axum::serve(listener, router(model))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}
