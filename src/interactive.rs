//! 交互式选列/填写规则
//!
//! 浏览器表单的终端版本：预览 → 选择任务 → 选择列 → 逐列填写规则 → 检测 → 导出。

use crate::error::{Result, SheetCheckError};
use crate::export;
use crate::flow::{self, PREVIEW_ROWS};
use crate::llm::ChatModel;
use crate::preview::{render_preview, render_summary};
use crate::progress::create_progress_bar;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use sheet_check_common::{RuleSet, Table, Task};
use std::path::{Path, PathBuf};

/// 逐列收集规则（空白输入保留为空，由校验阶段拦截）
pub fn collect_rules<F>(columns: &[String], mut ask: F) -> Result<RuleSet>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut rules = RuleSet::new();
    for column in columns {
        let rule = ask(column)?;
        rules.set(column.clone(), rule);
    }
    Ok(rules)
}

fn prompt_task() -> Result<Task> {
    let labels: Vec<&str> = Task::ALL.iter().map(|t| t.label()).collect();
    let idx = Select::new()
        .with_prompt("请选择数据处理任务")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| SheetCheckError::Prompt(e.to_string()))?;
    Ok(Task::ALL[idx])
}

fn prompt_columns(candidates: &[String]) -> Result<Vec<String>> {
    let picked = MultiSelect::new()
        .with_prompt("请选择要处理的列（空格选择，回车确认）")
        .items(candidates)
        .interact()
        .map_err(|e| SheetCheckError::Prompt(e.to_string()))?;
    Ok(picked.into_iter().map(|i| candidates[i].clone()).collect())
}

fn prompt_rule(column: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(format!("请输入 {} 列的检测规则", column))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SheetCheckError::Prompt(e.to_string()))
}

/// 交互流程
///
/// 用户中途放弃、任务未实现或规则不完整时返回 `Ok(None)`，不发出任何模型请求。
pub async fn run_interactive(
    model: &dyn ChatModel,
    input: &Path,
    output: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let table: Table = flow::load_table(input)?;
    println!("✔ 文件读取成功: {} 行, {} 列\n", table.len(), table.columns().len());

    println!("数据预览（前 {} 行）", PREVIEW_ROWS);
    println!("{}\n", render_preview(&table, PREVIEW_ROWS));

    let task = prompt_task()?;
    if !task.is_implemented() {
        println!("⚠ 尚未实现该功能。");
        return Ok(None);
    }

    let candidates = flow::candidate_columns(&table, task);
    if candidates.is_empty() {
        println!("⚠ 没有可处理的列。");
        return Ok(None);
    }

    let selected = prompt_columns(&candidates)?;
    if selected.is_empty() {
        println!("⚠ 请先选择要处理的文本列。");
        return Ok(None);
    }

    println!("\n为每个列设置检测规则");
    let rules = collect_rules(&selected, prompt_rule)?;

    let missing = rules.missing_rules();
    if !missing.is_empty() {
        println!("⚠ 请为以下列填写检测规则: {}", missing.join(", "));
        return Ok(None);
    }

    let start = Confirm::new()
        .with_prompt("开始检测？")
        .default(true)
        .interact()
        .map_err(|e| SheetCheckError::Prompt(e.to_string()))?;
    if !start {
        return Ok(None);
    }

    let progress = create_progress_bar("正在进行检测，请稍候...");
    let outcome = flow::run_check(model, table, task, &rules, &progress).await?;

    println!("检测结果（前 {} 行）", PREVIEW_ROWS);
    println!("{}\n", render_preview(&outcome.table, PREVIEW_ROWS));
    println!("{}", render_summary(&outcome.results));

    let target = output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let saved = export::save_workbook(&outcome.workbook, &target)?;
    println!("✔ 结果已保存: {}", saved.display());

    Ok(Some(saved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_rules_keeps_selection_order() {
        let columns = vec!["邮箱".to_string(), "姓名".to_string()];
        let rules = collect_rules(&columns, |c| Ok(format!("{}规则", c))).unwrap();
        assert_eq!(rules.columns(), &["邮箱", "姓名"]);
        assert_eq!(rules.rule("姓名"), Some("姓名规则"));
    }

    #[test]
    fn test_collect_rules_blank_answer_is_missing() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rules = collect_rules(&columns, |c| {
            Ok(if c == "a" { "规则".to_string() } else { String::new() })
        })
        .unwrap();
        assert_eq!(rules.missing_rules(), vec!["b"]);
    }

    #[test]
    fn test_collect_rules_propagates_error() {
        let columns = vec!["a".to_string()];
        let result = collect_rules(&columns, |_| Err(SheetCheckError::Prompt("中断".into())));
        assert!(matches!(result, Err(SheetCheckError::Prompt(_))));
    }
}
