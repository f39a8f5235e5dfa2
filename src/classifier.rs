//! 逐单元格规则检测
//!
//! 对每个选中列、每一行，向模型发送一次独立请求（指令 + 规则 + 单元格文本），
//! 模型回复原样作为检测结果。严格顺序执行：同一时间只有一个请求。
//! 任一请求失败即中止整个检测。

use crate::error::{Result, SheetCheckError};
use crate::llm::{ChatMessage, ChatModel};
use indicatif::ProgressBar;
use serde::Serialize;
use sheet_check_common::{result_column_name, LabelSummary, RuleSet, Table, Task};

/// 单列检测结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnLabels {
    pub column: String,
    /// 按行序排列的模型回复
    pub labels: Vec<String>,
}

impl ColumnLabels {
    pub fn summary(&self) -> LabelSummary {
        LabelSummary::from_labels(&self.labels)
    }
}

/// 检测前校验
///
/// 任务已实现、至少选中一列、每列都有非空规则、列名存在于表格中。
/// 校验失败时不发出任何请求。
pub fn validate_selection(table: &Table, rules: &RuleSet, task: Task) -> Result<()> {
    if !task.is_implemented() {
        return Err(SheetCheckError::TaskNotImplemented(task.label().to_string()));
    }

    if rules.is_empty() {
        return Err(SheetCheckError::NoColumnsSelected);
    }

    let missing = rules.missing_rules();
    if !missing.is_empty() {
        return Err(SheetCheckError::MissingRules(missing));
    }

    if let Some(unknown) = rules
        .columns()
        .iter()
        .find(|c| table.column_index(c).is_none())
    {
        return Err(SheetCheckError::ColumnNotFound(unknown.clone()));
    }

    Ok(())
}

/// 按列检测
///
/// # Returns
/// 选中列顺序的检测结果，每列结果数等于表格行数
pub async fn classify_columns(
    model: &dyn ChatModel,
    table: &Table,
    rules: &RuleSet,
    task: Task,
    progress: &ProgressBar,
) -> Result<Vec<ColumnLabels>> {
    validate_selection(table, rules, task)?;

    let instruction = task
        .instruction()
        .ok_or_else(|| SheetCheckError::TaskNotImplemented(task.label().to_string()))?;

    progress.set_length((rules.columns().len() * table.len()) as u64);

    let mut results = Vec::with_capacity(rules.columns().len());

    for (column, rule) in rules.iter() {
        let texts = table.column_texts(column)?;
        tracing::info!(column, rows = texts.len(), "开始检测列");

        let mut labels = Vec::with_capacity(texts.len());
        for text in &texts {
            let messages = [
                ChatMessage::system(instruction),
                ChatMessage::user(task.build_user_message(rule, text)),
            ];
            let label = model.complete(&messages).await?;
            tracing::debug!(column, rule, text = %text, label = %label, "检测结果");

            labels.push(label);
            progress.inc(1);
        }

        results.push(ColumnLabels {
            column: column.to_string(),
            labels,
        });
    }

    progress.finish_and_clear();
    Ok(results)
}

/// 检测结果追加到表格（`<列名>_检测结果`）
pub fn annotate(table: &mut Table, results: &[ColumnLabels]) -> Result<()> {
    for result in results {
        table.append_column(&result_column_name(&result.column), result.labels.clone())?;
    }
    Ok(())
}
