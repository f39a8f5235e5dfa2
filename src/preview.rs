//! 数据预览（终端表格）

use crate::classifier::ColumnLabels;
use comfy_table::{presets::UTF8_FULL, Table as DisplayTable};
use sheet_check_common::Table;

/// 前 n 行渲染为终端表格
pub fn render_preview(table: &Table, rows: usize) -> String {
    let mut display = DisplayTable::new();
    display.load_preset(UTF8_FULL);
    display.set_header(table.columns().to_vec());

    for row in table.head(rows).rows() {
        display.add_row(row.iter().map(|c| c.display_text()).collect::<Vec<_>>());
    }

    display.to_string()
}

/// 各列结果统计
pub fn render_summary(results: &[ColumnLabels]) -> String {
    let mut display = DisplayTable::new();
    display.load_preset(UTF8_FULL);
    display.set_header(vec!["列", "是", "否", "其他"]);

    for result in results {
        let summary = result.summary();
        display.add_row(vec![
            result.column.clone(),
            summary.yes.to_string(),
            summary.no.to_string(),
            summary.other.to_string(),
        ]);
    }

    display.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_check_common::Cell;

    #[test]
    fn test_render_preview_limits_rows() {
        let rows = (0..20)
            .map(|i| vec![Cell::Text(format!("row-{}", i))])
            .collect();
        let table = Table::new(vec!["名称".into()], rows);

        let rendered = render_preview(&table, 10);
        assert!(rendered.contains("名称"));
        assert!(rendered.contains("row-9"));
        assert!(!rendered.contains("row-10"));
    }

    #[test]
    fn test_render_summary() {
        let results = vec![ColumnLabels {
            column: "邮箱".into(),
            labels: vec!["是".into(), "是".into(), "不确定".into()],
        }];
        let rendered = render_summary(&results);
        assert!(rendered.contains("邮箱"));
        assert!(rendered.contains('2'));
    }
}
