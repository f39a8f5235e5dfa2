//! Azure OpenAI 对话补全客户端

use super::{ChatMessage, ChatModel};
use crate::config::AzureSettings;
use crate::error::{Result, SheetCheckError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 对话补全请求
#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// 对话补全响应
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct AzureChatClient {
    http: reqwest::Client,
    settings: AzureSettings,
}

impl AzureChatClient {
    pub fn new(settings: AzureSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions`
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.deployment
        )
    }
}

#[async_trait]
impl ChatModel for AzureChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest {
            messages,
            temperature: self.settings.temperature,
        };

        let response = self
            .http
            .post(self.completions_url())
            .query(&[("api-version", self.settings.api_version.as_str())])
            .header("api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SheetCheckError::ApiCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetCheckError::ApiCall(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| SheetCheckError::ApiParse(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SheetCheckError::ApiParse("响应中没有 choices[0].message.content".into()))
    }
}
