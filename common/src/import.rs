//! 表格读取
//!
//! 上传的表格文件（xlsx / xls / xlsb / ods）读取为 Table。
//! 只读第一个工作表，第一行作为表头。

use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Range, Reader};
use std::io::Cursor;
use std::path::Path;

/// 支持的扩展名
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// 扩展名判定
pub fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// 文件读取
pub fn read_table(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    read_table_from_bytes(&bytes)
}

/// 字节读取（浏览器上传使用）
pub fn read_table_from_bytes(bytes: &[u8]) -> Result<Table> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::Sheet(format!("无法打开表格文件: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Sheet("文件中没有工作表".into()))?
        .map_err(|e| Error::Sheet(format!("工作表读取错误: {}", e)))?;

    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> Table {
    // Range 从第一个非空单元格开始；左侧的空列补回，保持与文件一致的列位置
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Table::default();
    };

    let headers = std::iter::repeat(String::new())
        .take(col_offset)
        .chain(header_row.iter().map(header_text))
        .collect();
    let body = rows
        .map(|row| {
            std::iter::repeat(Cell::Empty)
                .take(col_offset)
                .chain(row.iter().map(data_to_cell))
                .collect()
        })
        .collect();

    Table::new(headers, body)
}

fn header_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        other => data_to_cell(other).as_text(),
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => datetime_to_cell(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// 日期/时长单元格（1904 日期系统与 1900 闰年 bug 由 calamine 处理）
fn datetime_to_cell(dt: &ExcelDateTime) -> Cell {
    if dt.is_duration() {
        if let Some(duration) = dt.as_duration() {
            let secs = duration.num_seconds();
            return Cell::Text(format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60));
        }
    }
    match dt.as_datetime() {
        Some(value) => Cell::DateTime(value),
        None => Cell::Number(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTimeType;
    use chrono::NaiveDate;

    fn excel_date(serial: f64, is_1904: bool) -> Cell {
        data_to_cell(&Data::DateTime(ExcelDateTime::new(
            serial,
            ExcelDateTimeType::DateTime,
            is_1904,
        )))
    }

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file(Path::new("data.xlsx")));
        assert!(is_supported_file(Path::new("DATA.XLS")));
        assert!(!is_supported_file(Path::new("data.csv")));
        assert!(!is_supported_file(Path::new("data")));
    }

    #[test]
    fn test_read_invalid_bytes() {
        let result = read_table_from_bytes(b"not a spreadsheet");
        assert!(matches!(result, Err(Error::Sheet(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_table(Path::new("/nonexistent/检测.xlsx"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(data_to_cell(&Data::String("x".into())), Cell::Text("x".into()));
        assert_eq!(data_to_cell(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn test_datetime_cell_text() {
        assert_eq!(excel_date(45292.0, false).as_text(), "2024-01-01");
        assert_eq!(excel_date(45292.5, false).as_text(), "2024-01-01 12:00:00");
    }

    #[test]
    fn test_datetime_near_midnight_rolls_to_next_day() {
        assert_eq!(excel_date(45292.999999999, false).as_text(), "2024-01-02");
    }

    #[test]
    fn test_datetime_before_1900_leap_day() {
        assert_eq!(excel_date(1.0, false).as_text(), "1900-01-01");
        assert_eq!(excel_date(59.0, false).as_text(), "1900-02-28");
        assert_eq!(excel_date(61.0, false).as_text(), "1900-03-01");
    }

    #[test]
    fn test_datetime_1904_system() {
        let expected = NaiveDate::from_ymd_opt(1904, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(excel_date(1.0, true), Cell::DateTime(expected));
    }

    #[test]
    fn test_duration_cell_as_text() {
        let cell = data_to_cell(&Data::DateTime(ExcelDateTime::new(
            1.5,
            ExcelDateTimeType::TimeDelta,
            false,
        )));
        assert_eq!(cell, Cell::Text("36:00:00".into()));
    }

    #[test]
    fn test_leading_blank_column_is_kept() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 1, "姓名").unwrap();
        worksheet.write_string(1, 1, "张三").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = read_table_from_bytes(&bytes).unwrap();
        assert_eq!(table.columns(), &["Unnamed: 0", "姓名"]);
        assert_eq!(table.rows()[0], vec![Cell::Empty, Cell::Text("张三".into())]);
    }
}
