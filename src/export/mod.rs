use crate::error::Result;
use sheet_check_common::EXPORT_FILE_NAME;
use std::path::{Path, PathBuf};

/// 输出路径（目录或无扩展名时使用固定文件名）
pub fn output_path(output: &Path) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(EXPORT_FILE_NAME)
    } else {
        output.to_path_buf()
    }
}

/// xlsx 写入文件，返回实际路径
pub fn save_workbook(workbook: &[u8], output: &Path) -> Result<PathBuf> {
    let path = output_path(output);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, workbook)?;
    Ok(path)
}
