use crate::app::render::render_items;
use crate::app::state::AppState;

use super::common::{map_api_error, parse_row_id};

// ==========================================
// 盘点录入与核算命令
// ==========================================

/// 录入单行盘点数量,返回提示 + 该行最新数据
pub fn count_row(state: &mut AppState, row: &str, value: &str) -> Result<String, String> {
    let row_id = parse_row_id(state, row)?;
    let currency_symbol = state.config().currency_symbol.clone();
    let rendered = match state.api.apply_count(row_id, value) {
        Ok(item) => render_items(&[item], &currency_symbol),
        Err(e) => return Err(map_api_error(state, e)),
    };
    Ok(format!(
        "{}\n{}",
        state.tr_args("shell.count_applied", &[("row", &row_id.to_string())]),
        rendered
    ))
}

/// 全部行填充同一盘点数量
pub fn fill_counts(state: &mut AppState, value: &str) -> Result<String, String> {
    let rows = match state.api.fill_all(value) {
        Ok(table) => table.len(),
        Err(e) => return Err(map_api_error(state, e)),
    };
    Ok(state.tr_args("shell.filled", &[("rows", &rows.to_string())]))
}

/// 全表核算
pub fn reconcile_table(state: &mut AppState) -> Result<String, String> {
    let rows = match state.api.reconcile() {
        Ok(table) => table.len(),
        Err(e) => return Err(map_api_error(state, e)),
    };
    Ok(state.tr_args("shell.reconciled", &[("rows", &rows.to_string())]))
}
