use crate::app::state::AppState;

use super::common::map_api_error;

// ==========================================
// 文件相关命令（加载 / 保存 / 导出）
// ==========================================

/// 加载盘点表
pub fn load_table(state: &mut AppState, path: &str) -> Result<String, String> {
    tracing::info!(path, "[load] requisição recebida");

    let (rows, source) = match state.api.load(path) {
        Ok(table) => (
            table.len(),
            table.source_name.clone().unwrap_or_else(|| path.to_string()),
        ),
        Err(e) => return Err(map_api_error(state, e)),
    };

    Ok(state.tr_args(
        "shell.loaded",
        &[("source", source.as_str()), ("rows", &rows.to_string())],
    ))
}

/// 保存为 JSON
pub fn save_table(state: &mut AppState, path: &str) -> Result<String, String> {
    let report = state.api.save_json(path).map_err(|e| map_api_error(state, e))?;
    Ok(state.tr_args(
        "shell.saved",
        &[
            ("path", &report.path.display().to_string()),
            ("rows", &report.rows.to_string()),
        ],
    ))
}

/// 导出 xlsx
pub fn export_table(state: &mut AppState, path: &str) -> Result<String, String> {
    let report = state.api.export_xlsx(path).map_err(|e| map_api_error(state, e))?;
    Ok(state.tr_args(
        "shell.exported",
        &[
            ("path", &report.path.display().to_string()),
            ("rows", &report.rows.to_string()),
        ],
    ))
}
