use crate::app::render::{render_items, render_summary};
use crate::app::state::AppState;
use crate::domain::{InventoryItem, SortDirection};

use super::common::map_api_error;

// ==========================================
// 汇总 / 视图 / 排序命令
// ==========================================

fn render_view(state: &AppState, title_key: &str, items: &[&InventoryItem]) -> String {
    if items.is_empty() {
        return format!("[{}] {}", state.tr(title_key), state.tr("shell.no_rows"));
    }
    format!(
        "[{}]\n{}\n{}",
        state.tr(title_key),
        render_items(items, &state.config().currency_symbol),
        state.tr_args("shell.rows_shown", &[("count", &items.len().to_string())])
    )
}

/// 汇总
pub fn show_summary(state: &AppState) -> Result<String, String> {
    let rows = state.api.summary_rows().map_err(|e| map_api_error(state, e))?;
    Ok(render_summary(&rows))
}

/// 全部行（TODOS）
pub fn show_all(state: &AppState) -> Result<String, String> {
    let items = state.api.view_all().map_err(|e| map_api_error(state, e))?;
    Ok(render_view(state, "view.all", &items))
}

/// 按编码 / 库位筛选
pub fn find_items(
    state: &AppState,
    code: Option<&str>,
    location: Option<&str>,
) -> Result<String, String> {
    let items = state
        .api
        .find(code, location)
        .map_err(|e| map_api_error(state, e))?;
    Ok(render_view(state, "view.search", &items))
}

/// 短缺行（FALTAS）
pub fn show_shortages(state: &AppState) -> Result<String, String> {
    let items = state.api.shortages().map_err(|e| map_api_error(state, e))?;
    Ok(render_view(state, "view.shortages", &items))
}

/// 盈余行（SOBRAS）
pub fn show_overages(state: &AppState) -> Result<String, String> {
    let items = state.api.overages().map_err(|e| map_api_error(state, e))?;
    Ok(render_view(state, "view.overages", &items))
}

/// 按 VL. DIF. 排序
pub fn sort_table(state: &mut AppState, direction: SortDirection) -> Result<String, String> {
    if let Err(e) = state.api.sort(direction) {
        return Err(map_api_error(state, e));
    }
    let direction_key = if direction.is_ascending() {
        "shell.ascending"
    } else {
        "shell.descending"
    };
    Ok(state.tr_args("shell.sorted", &[("direction", &state.tr(direction_key))]))
}
