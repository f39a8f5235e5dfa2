//! 导出的集成测试
//!
//! 导出 → 重新读取后，原始单元格不变，并包含追加的结果列

mod common;

use common::{sample_table, MockModel};
use indicatif::ProgressBar;
use sheet_check_common::{read_table, Cell, RuleSet, Task};
use sheet_rule_check::export::save_workbook;
use sheet_rule_check::flow::run_check;
use tempfile::tempdir;

#[tokio::test]
async fn test_export_roundtrip_preserves_original_cells() {
    let dir = tempdir().expect("Failed to create temp dir");
    let original = sample_table();

    let mut rules = RuleSet::new();
    rules.set("手机号", "必须是11位数字");

    let model = MockModel::echo();
    let outcome = run_check(&model, original.clone(), Task::ConformityFilter, &rules, &ProgressBar::hidden())
        .await
        .expect("检测失败");

    let saved = save_workbook(&outcome.workbook, dir.path()).expect("保存失败");
    assert_eq!(saved, dir.path().join("检测结果.xlsx"));

    let reparsed = read_table(&saved).expect("重新读取失败");

    assert_eq!(reparsed.columns(), &["姓名", "手机号", "金额", "手机号_检测结果"]);
    assert_eq!(reparsed.len(), original.len());

    for (row_idx, row) in original.rows().iter().enumerate() {
        assert_eq!(&reparsed.rows()[row_idx][..3], row.as_slice(), "第 {} 行被改动", row_idx + 1);
    }

    let labels: Vec<&Cell> = reparsed.column_cells("手机号_检测结果").unwrap();
    assert_eq!(labels[0], &Cell::Text("13800138000".into()));
    assert_eq!(labels[2], &Cell::Text("13912345678".into()));
}

#[tokio::test]
async fn test_export_to_explicit_file_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("out").join("手机号检测.xlsx");

    let mut rules = RuleSet::new();
    rules.set("姓名", "是中文姓名");

    let model = MockModel::always("否");
    let outcome = run_check(&model, sample_table(), Task::AnomalyDetection, &rules, &ProgressBar::hidden())
        .await
        .unwrap();

    let saved = save_workbook(&outcome.workbook, &target).unwrap();
    assert_eq!(saved, target);

    let metadata = std::fs::metadata(&saved).expect("读取文件元数据失败");
    assert!(metadata.len() > 0, "Excel 文件为空");

    let reparsed = read_table(&saved).unwrap();
    let labels = reparsed.column_texts("姓名_检测结果").unwrap();
    assert_eq!(labels, vec!["否"; 4]);
}

#[test]
fn test_read_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let result = sheet_rule_check::flow::load_table(&path);
    assert!(matches!(
        result,
        Err(sheet_rule_check::error::SheetCheckError::UnsupportedFile(_))
    ));
}
