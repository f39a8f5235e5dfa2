//! 测试共用：固定回复的模拟模型

#![allow(dead_code)]

use async_trait::async_trait;
use sheet_check_common::{Cell, Table};
use sheet_rule_check::error::{Result, SheetCheckError};
use sheet_rule_check::llm::{ChatMessage, ChatModel};
use std::sync::Mutex;

/// 固定回复 + 调用记录
pub struct MockModel {
    reply: Box<dyn Fn(&[ChatMessage]) -> Result<String> + Send + Sync>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockModel {
    pub fn always(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::with(move |_| Ok(reply.clone()))
    }

    /// 原样返回用户消息中的文本
    pub fn echo() -> Self {
        Self::with(|messages| {
            let user = &messages[1].content;
            let text = user
                .split("文本：")
                .nth(1)
                .unwrap_or_default()
                .split('\n')
                .next()
                .unwrap_or_default();
            Ok(text.to_string())
        })
    }

    /// 第 n 次调用（从 0 开始）失败
    pub fn failing_at(n: usize) -> Self {
        let counter = Mutex::new(0usize);
        Self::with(move |_| {
            let mut count = counter.lock().unwrap();
            let current = *count;
            *count += 1;
            if current == n {
                Err(SheetCheckError::ApiCall("connection reset".into()))
            } else {
                Ok("是".into())
            }
        })
    }

    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&[ChatMessage]) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(f),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        (self.reply)(messages)
    }
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

/// 3 列 4 行的示例表格
pub fn sample_table() -> Table {
    Table::new(
        vec!["姓名".into(), "手机号".into(), "金额".into()],
        vec![
            vec![text("张三"), text("13800138000"), Cell::Number(12.5)],
            vec![text("李四"), text("12345"), Cell::Number(3.0)],
            vec![text("Wang Wu"), text("13912345678"), Cell::Empty],
            vec![text("赵六"), text("abc"), Cell::Number(-1.0)],
        ],
    )
}
