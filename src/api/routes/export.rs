//! Export Routes
//!
//! Download of the current history window.
//!
//! - GET /api/v1/export - Export the window as csv, json or ndjson

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::views::{self, Table};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
    Ndjson,
}

impl ExportFormat {
    fn parse(s: &str) -> ApiResult<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "ndjson" => Ok(ExportFormat::Ndjson),
            other => Err(ApiError::Validation(format!(
                "Unsupported export format: {} (expected csv, json or ndjson)",
                other
            ))),
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Ndjson => "application/x-ndjson",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Ndjson => "ndjson",
        }
    }
}

/// GET /api/v1/export
///
/// Export the history window in the requested format.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format = ExportFormat::parse(&params.format)?;
    let table = views::table(&state.snapshot());

    let body = match format {
        ExportFormat::Csv => table.to_csv()?,
        ExportFormat::Json => format_json(&table)?,
        ExportFormat::Ndjson => format_ndjson(&table)?,
    };

    tracing::debug!(rows = table.len(), format = format.extension(), "Exported history");

    let filename = format!(
        "polarwatch_export_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Format as JSON array of rows
fn format_json(table: &Table) -> ApiResult<String> {
    serde_json::to_string_pretty(&table.rows)
        .map_err(|e| ApiError::Internal(format!("JSON export failed: {}", e)))
}

/// Format as newline-delimited JSON
fn format_ndjson(table: &Table) -> ApiResult<String> {
    let mut ndjson = String::new();

    for row in &table.rows {
        let line = serde_json::to_string(row)
            .map_err(|e| ApiError::Internal(format!("NDJSON export failed: {}", e)))?;
        ndjson.push_str(&line);
        ndjson.push('\n');
    }

    Ok(ndjson)
}
