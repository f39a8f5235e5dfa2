//! 上传 → 选列/规则 → 检测 → 导出 的共用流程
//!
//! CLI、交互模式与浏览器界面都走这里，差异只在任务（指令模板 + 候选列来源）。

use crate::classifier::{self, ColumnLabels};
use crate::error::{Result, SheetCheckError};
use crate::llm::ChatModel;
use indicatif::ProgressBar;
use sheet_check_common::{generate_excel_buffer, is_supported_file, read_table, RuleSet, Table, Task};
use std::path::Path;

/// 预览行数
pub const PREVIEW_ROWS: usize = 10;

/// 检测完成后的结果
#[derive(Debug)]
pub struct CheckOutcome {
    /// 追加了结果列的表格
    pub table: Table,
    pub results: Vec<ColumnLabels>,
    /// 导出的 xlsx 字节
    pub workbook: Vec<u8>,
}

/// 表格文件读取
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(SheetCheckError::FileNotFound(path.display().to_string()));
    }
    if !is_supported_file(path) {
        return Err(SheetCheckError::UnsupportedFile(path.display().to_string()));
    }
    Ok(read_table(path)?)
}

/// 任务对应的候选列
pub fn candidate_columns(table: &Table, task: Task) -> Vec<String> {
    table.candidate_columns(task.column_source())
}

/// 检测并生成导出文件
pub async fn run_check(
    model: &dyn ChatModel,
    mut table: Table,
    task: Task,
    rules: &RuleSet,
    progress: &ProgressBar,
) -> Result<CheckOutcome> {
    let results = classifier::classify_columns(model, &table, rules, task, progress).await?;
    classifier::annotate(&mut table, &results)?;

    let workbook = generate_excel_buffer(&table).map_err(SheetCheckError::ExcelGeneration)?;

    Ok(CheckOutcome {
        table,
        results,
        workbook,
    })
}

/// 先校验选择，再建立模型连接并检测
///
/// 规则缺失等问题在读取模型配置之前报告。
pub async fn run_check_with<M, F>(
    connect: F,
    table: Table,
    task: Task,
    rules: &RuleSet,
    progress: &ProgressBar,
) -> Result<CheckOutcome>
where
    M: ChatModel,
    F: FnOnce() -> Result<M>,
{
    classifier::validate_selection(&table, rules, task)?;
    let model = connect()?;
    run_check(&model, table, task, rules, progress).await
}
