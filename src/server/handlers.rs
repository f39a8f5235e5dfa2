use super::AppState;
use crate::classifier::ColumnLabels;
use crate::error::SheetCheckError;
use crate::flow::{self, CheckOutcome, PREVIEW_ROWS};
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use indicatif::ProgressBar;
use serde::Serialize;
use serde_json::json;
use sheet_check_common::{
    read_table_from_bytes, LabelSummary, RuleSet, Table, Task, EXPORT_FILE_NAME,
};

const INDEX_HTML: &str = include_str!("index.html");

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// JSON 错误响应
pub struct ApiError {
    status: StatusCode,
    message: String,
    missing: Vec<String>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            missing: Vec::new(),
        }
    }
}

impl From<SheetCheckError> for ApiError {
    fn from(err: SheetCheckError) -> Self {
        let status = match &err {
            SheetCheckError::NoColumnsSelected
            | SheetCheckError::MissingRules(_)
            | SheetCheckError::ColumnNotFound(_)
            | SheetCheckError::UnsupportedFile(_)
            | SheetCheckError::Common(_) => StatusCode::BAD_REQUEST,
            SheetCheckError::TaskNotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            SheetCheckError::ApiCall(_) | SheetCheckError::ApiParse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let missing = match &err {
            SheetCheckError::MissingRules(cols) => cols.clone(),
            _ => Vec::new(),
        };
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self {
            status,
            message: err.to_string(),
            missing,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.missing.is_empty() {
            json!({ "error": self.message })
        } else {
            json!({ "error": self.message, "missing": self.missing })
        };
        (self.status, Json(body)).into_response()
    }
}

/// 上传表单
#[derive(Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    task: Option<String>,
    rules: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("上传数据读取失败: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("文件读取失败: {}", e)))?;
                    form.file = Some(bytes.to_vec());
                }
                "task" | "rules" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("表单读取失败: {}", e)))?;
                    if name == "task" {
                        form.task = Some(text);
                    } else {
                        form.rules = Some(text);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn table(&self) -> Result<Table, ApiError> {
        let bytes = self
            .file
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("请先上传一个 Excel 文件。"))?;
        read_table_from_bytes(bytes).map_err(|e| SheetCheckError::from(e).into())
    }

    fn task(&self) -> Result<Task, ApiError> {
        match self.task.as_deref().map(str::trim) {
            None | Some("") => Ok(Task::ConformityFilter),
            Some(s) => s.parse().map_err(|e: String| ApiError::bad_request(e)),
        }
    }

    fn rules(&self) -> Result<RuleSet, ApiError> {
        match self.rules.as_deref().map(str::trim) {
            None | Some("") => Ok(RuleSet::new()),
            Some(json) => RuleSet::from_json(json).map_err(|e| SheetCheckError::from(e).into()),
        }
    }
}

#[derive(Serialize)]
pub struct PreviewJson {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PreviewJson {
    fn from_table(table: &Table) -> Self {
        let head = table.head(PREVIEW_ROWS);
        Self {
            columns: head.columns().to_vec(),
            rows: head
                .rows()
                .iter()
                .map(|row| row.iter().map(|c| c.display_text()).collect())
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ColumnsResponse {
    task: Task,
    task_label: &'static str,
    implemented: bool,
    row_count: usize,
    columns: Vec<String>,
    candidates: Vec<String>,
    preview: PreviewJson,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn columns(multipart: Multipart) -> Result<Json<ColumnsResponse>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let table = form.table()?;
    let task = form.task()?;

    Ok(Json(ColumnsResponse {
        task,
        task_label: task.label(),
        implemented: task.is_implemented(),
        row_count: table.len(),
        columns: table.columns().to_vec(),
        candidates: flow::candidate_columns(&table, task),
        preview: PreviewJson::from_table(&table),
    }))
}

#[derive(Serialize)]
pub struct ColumnSummaryJson {
    column: String,
    #[serde(flatten)]
    summary: LabelSummary,
}

/// 检测结果：结果预览 + 统计 + base64 编码的 xlsx
#[derive(Serialize)]
pub struct CheckResponse {
    file_name: &'static str,
    row_count: usize,
    preview: PreviewJson,
    summary: Vec<ColumnSummaryJson>,
    workbook: String,
}

impl CheckResponse {
    fn from_outcome(outcome: &CheckOutcome) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            row_count: outcome.table.len(),
            preview: PreviewJson::from_table(&outcome.table),
            summary: outcome.results.iter().map(summary_json).collect(),
            workbook: BASE64.encode(&outcome.workbook),
        }
    }
}

fn summary_json(result: &ColumnLabels) -> ColumnSummaryJson {
    ColumnSummaryJson {
        column: result.column.clone(),
        summary: result.summary(),
    }
}

async fn run_upload(state: &AppState, multipart: Multipart) -> Result<CheckOutcome, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let table = form.table()?;
    let task = form.task()?;
    let rules = form.rules()?;

    tracing::info!(task = %task, columns = rules.columns().len(), rows = table.len(), "check request");

    let progress = ProgressBar::hidden();
    Ok(flow::run_check(state.model.as_ref(), table, task, &rules, &progress).await?)
}

/// 浏览器页面使用：结果预览与文件一并返回
pub async fn check(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CheckResponse>, ApiError> {
    let outcome = run_upload(&state, multipart).await?;
    Ok(Json(CheckResponse::from_outcome(&outcome)))
}

/// 直接下载 xlsx（curl 等脚本调用）
pub async fn check_xlsx(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let outcome = run_upload(&state, multipart).await?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(EXPORT_FILE_NAME)),
    ];
    Ok((headers, outcome.workbook).into_response())
}

/// 非 ASCII 文件名的 Content-Disposition（RFC 5987）
pub fn content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"result.xlsx\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}
