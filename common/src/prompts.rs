//! 提示词生成模块
//!
//! 浏览器界面与 CLI 共用的检测任务定义:
//! - Task: 任务种类（指令模板 + 候选列来源）
//! - build_user_message: 单元格检测用的用户消息

use crate::table::ColumnSource;
use serde::{Deserialize, Serialize};

/// 结果列后缀
pub const RESULT_COLUMN_SUFFIX: &str = "_检测结果";

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "检测结果.xlsx";

/// 标签：符合
pub const LABEL_YES: &str = "是";

/// 标签：不符合
pub const LABEL_NO: &str = "否";

const ANOMALY_INSTRUCTION: &str =
    "你是一名数据分析专家。请根据以下检测规则，判断给定的文本是否为异常值。请回答“是”或“否”。";

const CONFORMITY_INSTRUCTION: &str = r#"你是一名数据分析助手。
请根据以下检测规则，判断给定的文本是否**符合**规则。

- 如果文本符合检测规则，请回答“是”；
- 如果文本不符合检测规则，请回答“否”。

请仅回答“是”或“否”，不需要任何解释。

**示例 1**：
- 检测规则：文本长度小于 10
- 文本：hello
- 回答：是

**示例 2**：
- 检测规则：包含英文
- 文本：你好
- 回答：否"#;

/// 数据处理任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    /// 脏数据检测（仅文本列）
    AnomalyDetection,
    /// 筛选正确数据（全部列）
    ConformityFilter,
    /// 语义情感分析（未实现）
    SentimentAnalysis,
    /// 数据可视化（未实现）
    Visualization,
}

impl Task {
    /// 选择界面中的全部任务
    pub const ALL: [Task; 4] = [
        Task::AnomalyDetection,
        Task::ConformityFilter,
        Task::SentimentAnalysis,
        Task::Visualization,
    ];

    /// 显示名
    pub fn label(&self) -> &'static str {
        match self {
            Task::AnomalyDetection => "脏数据检测",
            Task::ConformityFilter => "筛选正确数据",
            Task::SentimentAnalysis => "语义情感分析",
            Task::Visualization => "数据可视化",
        }
    }

    pub fn is_implemented(&self) -> bool {
        self.instruction().is_some()
    }

    /// 系统指令（未实现的任务返回 None）
    pub fn instruction(&self) -> Option<&'static str> {
        match self {
            Task::AnomalyDetection => Some(ANOMALY_INSTRUCTION),
            Task::ConformityFilter => Some(CONFORMITY_INSTRUCTION),
            Task::SentimentAnalysis | Task::Visualization => None,
        }
    }

    /// 候选列来源
    pub fn column_source(&self) -> ColumnSource {
        match self {
            Task::AnomalyDetection => ColumnSource::TextOnly,
            _ => ColumnSource::All,
        }
    }

    /// 单元格检测用的用户消息
    pub fn build_user_message(&self, rule: &str, text: &str) -> String {
        match self {
            Task::ConformityFilter => format!("检测规则：{} \n文本：{}\n回答：", rule, text),
            _ => format!("检测规则：{} \n文本：{}", rule, text),
        }
    }
}

impl std::str::FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anomaly" | "anomaly-detection" | "脏数据检测" => Ok(Task::AnomalyDetection),
            "conformity" | "conformity-filter" | "filter" | "筛选正确数据" => {
                Ok(Task::ConformityFilter)
            }
            "sentiment" | "sentiment-analysis" | "语义情感分析" => Ok(Task::SentimentAnalysis),
            "visualization" | "数据可视化" => Ok(Task::Visualization),
            _ => Err(format!(
                "未知任务: {}。可选 anomaly, conformity, sentiment, visualization",
                s
            )),
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 结果列名
pub fn result_column_name(column: &str) -> String {
    format!("{}{}", column, RESULT_COLUMN_SUFFIX)
}
