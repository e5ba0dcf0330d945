// ==========================================
// 库存盘点系统 - 核心库
// ==========================================
// 技术栈: Rust + calamine/csv/serde_json（导入）+ rust_xlsxwriter（导出）
// 系统定位: 盘点核对工具（账面数量 vs 实盘数量）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 核算 / 汇总 / 视图
pub mod engine;

// 导入层 - 外部盘点表
pub mod importer;

// 导出层 - JSON / xlsx
pub mod exporter;

// 配置层 - 应用配置
pub mod config;

// 展示格式（货币 / 百分比 / 数量）与输入解析
pub mod format;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 盘点会话
pub mod api;

// 应用层 - 会话 shell
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Column, CountStatus, InventoryItem, InventoryTable, RowId, SortDirection, SummaryReport,
    SummaryRow, VarianceSign, VarianceTag,
};

// 引擎
pub use engine::{ReconciliationEngine, SummaryEngine, ViewService};

// 导入 / 导出
pub use exporter::{ExportError, JsonRecordWriter, SaveError, XlsxExporter};
pub use importer::{ImportError, InventoryImporter, LoadError, LoadErrorKind};

// API
pub use api::{ApiError, InventoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Contagem de Estoque";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
