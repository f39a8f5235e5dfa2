//! Excel 生成（共通库）
//!
//! 表格（原始列 + 结果列）写入单个工作表，第一行为表头。
//! 单元格按原始类型写回：数字仍为数字，日期保留日期格式。

use crate::table::{Cell, Table};
use rust_xlsxwriter::*;

/// 工作表名
pub const SHEET_NAME: &str = "Sheet1";

/// 日期单元格格式
const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel 写入缓冲区
///
/// # Arguments
/// * `table` - 要导出的表格
///
/// # Returns
/// xlsx 文件字节；失败时返回错误说明
pub fn generate_excel_buffer(table: &Table) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // 表头格式（与 dataframe 导出一致：加粗 + 细边框）
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("工作表名设置错误: {}", e))?;

    for (col_idx, name) in table.columns().iter().enumerate() {
        let col = column_number(col_idx)?;
        worksheet
            .write_string_with_format(0, col, name, &header_format)
            .map_err(|e| format!("表头写入错误 ({}): {}", name, e))?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1)
            .map_err(|_| format!("行数超出上限: {}", row_idx + 1))?;

        for (col_idx, cell) in row.iter().enumerate() {
            let col = column_number(col_idx)?;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Text(s) => worksheet.write_string(excel_row, col, s),
                Cell::Number(n) if n.is_finite() => worksheet.write_number(excel_row, col, *n),
                Cell::Number(_) => worksheet.write_string(excel_row, col, cell.as_text()),
                Cell::Bool(b) => worksheet.write_boolean(excel_row, col, *b),
                Cell::DateTime(dt) => worksheet.write_datetime_with_format(excel_row, col, dt, &date_format),
            };
            written.map_err(|e| {
                format!("单元格写入错误 (行 {}, 列 {}): {}", excel_row + 1, col_idx + 1, e)
            })?;
        }
    }

    // 缓冲区输出
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel 保存错误: {}", e))
}

fn column_number(idx: usize) -> Result<u16, String> {
    u16::try_from(idx).map_err(|_| format!("列数超出上限: {}", idx + 1))
}
