//! 表格数据模型
//!
//! CLI 与浏览器界面共用的内存表格:
//! - Cell: 单元格值（保留原始类型，导出时原样写回）
//! - Table: 有序列名 + 有序行，检测结果以追加列的方式写入
//! - ColumnSource: 任务可选列的来源（文本列 / 全部列）

use crate::error::{Error, Result};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 空单元格转文本时的值（与 dataframe 的 astype(str) 一致）
pub const EMPTY_CELL_TEXT: &str = "nan";

/// 单元格值
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// 转为发送给模型的文本
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => EMPTY_CELL_TEXT.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::DateTime(dt) => format_datetime(dt),
        }
    }

    /// 预览用文本（空单元格显示为空）
    pub fn display_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            other => other.as_text(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn kind(&self) -> Option<CellKind> {
        match self {
            Cell::Empty => None,
            Cell::Text(_) => Some(CellKind::Text),
            Cell::Number(_) => Some(CellKind::Number),
            Cell::Bool(_) => Some(CellKind::Bool),
            Cell::DateTime(_) => Some(CellKind::DateTime),
        }
    }
}

/// 非空单元格的值类型（文本列判定用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CellKind {
    Text,
    Number,
    Bool,
    DateTime,
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// 零点只输出日期
fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// 候选列来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// 仅文本列
    TextOnly,
    /// 全部列
    All,
}

/// 内存表格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// 表头与行构造表格
    ///
    /// 空表头补为 `Unnamed: <序号>`，重复表头追加 `.<n>`；
    /// 行宽不足时以空单元格补齐，超出部分截断。
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let columns = normalize_headers(headers);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 指定列的单元格
    pub fn column_cells(&self, name: &str) -> Result<Vec<&Cell>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| Error::Sheet(format!("列不存在: {}", name)))?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// 指定列转文本（按行序）
    pub fn column_texts(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .column_cells(name)?
            .into_iter()
            .map(Cell::as_text)
            .collect())
    }

    /// 文本列判定
    ///
    /// 含文本单元格，或非空值类型混杂，或布尔与空值并存时视为文本列。
    pub fn is_text_column(&self, name: &str) -> bool {
        let Ok(cells) = self.column_cells(name) else {
            return false;
        };
        let kinds: HashSet<CellKind> = cells.iter().filter_map(|c| c.kind()).collect();
        let has_empty = cells.iter().any(|c| c.is_empty());
        kinds.contains(&CellKind::Text)
            || kinds.len() > 1
            || (kinds.contains(&CellKind::Bool) && has_empty)
    }

    pub fn text_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.is_text_column(c))
            .cloned()
            .collect()
    }

    /// 按来源列出候选列
    pub fn candidate_columns(&self, source: ColumnSource) -> Vec<String> {
        match source {
            ColumnSource::TextOnly => self.text_columns(),
            ColumnSource::All => self.columns.clone(),
        }
    }

    /// 追加一列（同名列已存在时覆盖）
    pub fn append_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::Sheet(format!(
                "列 {} 的值数量 ({}) 与行数 ({}) 不一致",
                name,
                values.len(),
                self.rows.len()
            )));
        }

        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Empty);
                }
                self.columns.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = Cell::Text(value);
        }
        Ok(())
    }

    /// 前 n 行
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample_table() -> Table {
        Table::new(
            vec!["姓名".into(), "年龄".into(), "在职".into()],
            vec![
                vec![text("张三"), Cell::Number(30.0), Cell::Bool(true)],
                vec![text("李四"), Cell::Number(41.5), Cell::Empty],
            ],
        )
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(Cell::Empty.as_text(), "nan");
        assert_eq!(Cell::Number(30.0).as_text(), "30");
        assert_eq!(Cell::Number(41.5).as_text(), "41.5");
        assert_eq!(Cell::Bool(true).as_text(), "True");
        assert_eq!(text("abc").as_text(), "abc");
    }

    #[test]
    fn test_datetime_as_text() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let midnight = Cell::DateTime(day.and_hms_opt(0, 0, 0).unwrap());
        let noon = Cell::DateTime(day.and_hms_opt(12, 0, 0).unwrap());
        let late = Cell::DateTime(day.and_hms_milli_opt(23, 59, 59, 999).unwrap());
        assert_eq!(midnight.as_text(), "2024-01-01");
        assert_eq!(noon.as_text(), "2024-01-01 12:00:00");
        assert_eq!(late.as_text(), "2024-01-01 23:59:59");
    }

    #[test]
    fn test_column_texts_in_row_order() {
        let table = sample_table();
        assert_eq!(table.column_texts("姓名").unwrap(), vec!["张三", "李四"]);
        assert_eq!(table.column_texts("在职").unwrap(), vec!["True", "nan"]);
    }

    #[test]
    fn test_column_texts_unknown_column() {
        let table = sample_table();
        assert!(matches!(table.column_texts("部门"), Err(Error::Sheet(_))));
    }

    #[test]
    fn test_text_columns() {
        let table = sample_table();
        // 布尔 + 空值 → 文本列
        assert_eq!(table.text_columns(), vec!["姓名", "在职"]);
        assert_eq!(table.candidate_columns(ColumnSource::All).len(), 3);
    }

    #[test]
    fn test_mixed_kinds_are_text_column() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = Table::new(
            vec!["混合".into(), "日期".into(), "金额".into()],
            vec![
                vec![Cell::Number(1.0), Cell::DateTime(day.and_hms_opt(0, 0, 0).unwrap()), Cell::Number(2.0)],
                vec![Cell::DateTime(day.and_hms_opt(8, 0, 0).unwrap()), Cell::Empty, Cell::Empty],
            ],
        );
        assert_eq!(table.text_columns(), vec!["混合"]);
    }

    #[test]
    fn test_normalize_headers() {
        let table = Table::new(
            vec!["a".into(), "".into(), "a".into(), "a".into()],
            vec![],
        );
        assert_eq!(table.columns(), &["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::new(vec!["a".into(), "b".into()], vec![vec![text("x")]]);
        assert_eq!(table.rows()[0], vec![text("x"), Cell::Empty]);
    }

    #[test]
    fn test_append_column() {
        let mut table = sample_table();
        table
            .append_column("姓名_检测结果", vec!["是".into(), "否".into()])
            .unwrap();
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.rows()[1][3], text("否"));
        // 原始列不变
        assert_eq!(table.rows()[1][0], text("李四"));
    }

    #[test]
    fn test_append_column_length_mismatch() {
        let mut table = sample_table();
        let result = table.append_column("x", vec!["是".into()]);
        assert!(result.is_err());
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_head() {
        let table = sample_table();
        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(10).len(), 2);
    }
}
