//! 检测结果统计
//!
//! 模型返回值原样写入结果列，这里只做展示用的计数。

use crate::prompts::{LABEL_NO, LABEL_YES};
use serde::Serialize;

/// 单列结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelSummary {
    pub yes: usize,
    pub no: usize,
    /// 既不是“是”也不是“否”的返回
    pub other: usize,
}

impl LabelSummary {
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut summary = Self::default();
        for label in labels {
            match label.as_ref().trim() {
                LABEL_YES => summary.yes += 1,
                LABEL_NO => summary.no += 1,
                _ => summary.other += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.yes + self.no + self.other
    }
}

impl std::fmt::Display for LabelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "是: {}  否: {}  其他: {}", self.yes, self.no, self.other)
    }
}
