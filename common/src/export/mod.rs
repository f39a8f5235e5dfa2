//! CLI 与浏览器界面共用的导出实现

#[cfg(feature = "excel")]
pub mod excel_core;
