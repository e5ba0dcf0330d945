// ==========================================
// 库存盘点系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑,不含计算引擎逻辑
// ==========================================

pub mod item;
pub mod summary;
pub mod table;
pub mod types;

// 重导出核心类型
pub use item::{InventoryItem, RawInventoryRecord};
pub use summary::{SummaryReport, SummaryRow};
pub use table::InventoryTable;
pub use types::{
    Column, CountStatus, RowId, SortDirection, VarianceSign, VarianceTag, INDEX_HEADER,
};
