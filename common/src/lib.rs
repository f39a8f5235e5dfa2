//! Sheet Check Common Library
//!
//! CLI 与浏览器界面共用的类型和工具

pub mod error;
pub mod table;
pub mod rules;
pub mod prompts;
pub mod label;
pub mod export;

#[cfg(feature = "excel")]
pub mod import;

pub use error::{Error, Result};
pub use table::{Cell, ColumnSource, Table, EMPTY_CELL_TEXT};
pub use rules::RuleSet;
pub use prompts::{
    result_column_name, Task, EXPORT_FILE_NAME, LABEL_NO, LABEL_YES, RESULT_COLUMN_SUFFIX,
};
pub use label::LabelSummary;

#[cfg(feature = "excel")]
pub use export::excel_core::generate_excel_buffer;
#[cfg(feature = "excel")]
pub use import::{is_supported_file, read_table, read_table_from_bytes};
