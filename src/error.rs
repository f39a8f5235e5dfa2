use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetCheckError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("缺少模型配置 {0}。请设置环境变量，或使用 `sheet-check config` 写入配置文件")]
    MissingSetting(&'static str),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("不支持的文件格式: {0}（支持 xlsx / xls / xlsb / ods）")]
    UnsupportedFile(String),

    #[error("列不存在: {0}")]
    ColumnNotFound(String),

    #[error("请先选择要处理的列")]
    NoColumnsSelected,

    #[error("请为以下列填写检测规则: {}", .0.join(", "))]
    MissingRules(Vec<String>),

    #[error("尚未实现该功能: {0}")]
    TaskNotImplemented(String),

    #[error("交互输入错误: {0}")]
    Prompt(String),

    #[error("模型调用错误: {0}")]
    ApiCall(String),

    #[error("模型响应解析失败: {0}")]
    ApiParse(String),

    #[error("Excel 生成错误: {0}")]
    ExcelGeneration(String),

    #[error("JSON 解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] sheet_check_common::Error),
}

pub type Result<T> = std::result::Result<T, SheetCheckError>;
