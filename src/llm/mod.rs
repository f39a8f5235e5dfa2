//! 大模型调用
//!
//! 检测流程只依赖 `ChatModel` trait，生产环境使用 Azure OpenAI 客户端，
//! 测试中替换为固定返回的模拟模型。

mod azure;

pub use azure::AzureChatClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// 对话消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// 对话补全模型
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 发送消息，返回模型回复原文
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
