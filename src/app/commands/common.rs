use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::domain::RowId;
use crate::engine::ValidationErrorKind;
use crate::importer::LoadErrorKind;
use serde::Serialize;

// ==========================================
// 公共工具：错误映射、参数解析
// ==========================================

/// 错误响应（渲染为一行错误信息）
#[derive(Debug, Clone, Serialize)]
pub(super) struct ErrorResponse {
    /// 错误代码
    pub code: &'static str,

    /// 错误消息
    pub message: String,
}

impl ErrorResponse {
    fn from_api_error(err: &ApiError) -> Self {
        let code = match err {
            ApiError::NoTableLoaded => "NO_TABLE_LOADED",
            ApiError::Load(e) => match e.kind() {
                LoadErrorKind::MissingColumn => "MISSING_COLUMN",
                LoadErrorKind::MalformedFile => "MALFORMED_FILE",
            },
            ApiError::Validation(e) => match e.kind() {
                ValidationErrorKind::NonNumericInput => "NON_NUMERIC_INPUT",
                ValidationErrorKind::NegativeInput => "NEGATIVE_INPUT",
                ValidationErrorKind::UnknownRow => "UNKNOWN_ROW",
            },
            ApiError::Save(_) => "IO_FAILURE",
            ApiError::Config(_) => "CONFIG_ERROR",
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

/// 将ApiError转换为错误行
pub fn map_api_error(state: &AppState, err: ApiError) -> String {
    let response = ErrorResponse::from_api_error(&err);
    tracing::debug!(code = response.code, error = %response.message, "comando rejeitado");
    format!("{} [{}]: {}", state.tr("shell.error"), response.code, response.message)
}

/// 解析行号（ÍNDICE）
pub(super) fn parse_row_id(state: &AppState, text: &str) -> Result<RowId, String> {
    text.trim().parse::<usize>().map(RowId).map_err(|_| {
        state.tr_args("shell.usage", &[("usage", "count <linha> <valor>")])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ValidationError;
    use rust_decimal::Decimal;

    #[test]
    fn test_map_api_error_codes() {
        let state = AppState::default();
        let line = map_api_error(&state, ApiError::NoTableLoaded);
        assert!(line.starts_with("ERRO [NO_TABLE_LOADED]"));

        let line = map_api_error(
            &state,
            ValidationError::NegativeInput {
                value: Decimal::from(-3),
            }.into(),
        );
        assert!(line.contains("NEGATIVE_INPUT"));
    }

    #[test]
    fn test_parse_row_id() {
        let state = AppState::default();
        assert_eq!(parse_row_id(&state, " 4 "), Ok(RowId(4)));
        assert!(parse_row_id(&state, "x").is_err());
    }
}
