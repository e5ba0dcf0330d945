// ==========================================
// 库存盘点系统 - 盘点行实体
// ==========================================
// 职责: 单个库存单位（SKU）的账面数据、盘点数据与派生差异
// ==========================================

use crate::domain::types::{CountStatus, RowId, VarianceTag};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// InventoryItem - 盘点行
// ==========================================
// 红线: 派生字段只能由 ReconciliationEngine 写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    // ===== 标识 =====
    pub row_id: RowId, // 加载时位置,排序后不变
    pub code: String,  // COD（原样文本,保留前导零）

    // ===== 账面数据 =====
    pub description: String, // PRODUTO
    pub unit_value: Decimal, // VL. UNT.
    pub location: String,    // ENDEREÇO
    pub recorded_qty: Decimal, // QTD

    // ===== 盘点数据 =====
    pub counted_qty: Decimal,      // CONTAGEM（未盘点为 0）
    pub count_status: CountStatus, // 是否已盘点

    // ===== 派生字段 =====
    pub stock_value: Decimal,    // VL. ESTOQUE = QTD * VL. UNT.
    pub qty_variance: Decimal,   // DIF. ETQ = CONTAGEM - QTD
    pub value_variance: Decimal, // VL. DIF. = DIF. ETQ * VL. UNT.

    // 非标准列,原样保留
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl InventoryItem {
    /// 创建未盘点、未核算的行
    pub fn new(
        row_id: RowId,
        code: impl Into<String>,
        description: impl Into<String>,
        unit_value: Decimal,
        location: impl Into<String>,
        recorded_qty: Decimal,
    ) -> Self {
        Self {
            row_id,
            code: code.into(),
            description: description.into(),
            unit_value,
            location: location.into(),
            recorded_qty,
            counted_qty: Decimal::ZERO,
            count_status: CountStatus::Uncounted,
            stock_value: Decimal::ZERO,
            qty_variance: Decimal::ZERO,
            value_variance: Decimal::ZERO,
            extras: BTreeMap::new(),
        }
    }

    /// 设置盘点数量（不触发重算）
    pub fn with_count(mut self, counted_qty: Decimal) -> Self {
        self.counted_qty = counted_qty;
        self.count_status = CountStatus::Counted;
        self
    }

    /// 派生字段归零（加载后即处于"未核算"状态）
    pub fn reset_derived(&mut self) {
        self.stock_value = Decimal::ZERO;
        self.qty_variance = Decimal::ZERO;
        self.value_variance = Decimal::ZERO;
    }

    pub fn is_counted(&self) -> bool {
        self.count_status == CountStatus::Counted
    }

    pub fn variance_tag(&self) -> VarianceTag {
        VarianceTag::for_value(self.value_variance)
    }
}

// ==========================================
// RawInventoryRecord - 导入中间结构体
// ==========================================
// 用途: 文件解析 → 字段映射 → 此结构 → 清洗校验 → InventoryItem
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInventoryRecord {
    pub code: Option<String>,
    pub description: Option<String>,
    pub unit_value: Option<String>,
    pub location: Option<String>,
    pub recorded_qty: Option<String>,
    pub counted_qty: Option<String>,
    pub extras: BTreeMap<String, String>,

    // 元信息
    pub row_number: usize, // 原始文件行号（表头为第 1 行）
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_unreconciled() {
        let item = InventoryItem::new(
            RowId(0),
            "0012",
            "Parafuso",
            Decimal::new(15, 1),
            "A-01",
            Decimal::from(10),
        );
        assert_eq!(item.code, "0012");
        assert_eq!(item.counted_qty, Decimal::ZERO);
        assert!(!item.is_counted());
        assert_eq!(item.stock_value, Decimal::ZERO);
        assert_eq!(item.variance_tag(), VarianceTag::Even);
    }

    #[test]
    fn test_reset_derived() {
        let mut item = InventoryItem::new(RowId(3), "X", "Y", Decimal::TWO, "Z", Decimal::ONE)
            .with_count(Decimal::from(4));
        item.stock_value = Decimal::TWO;
        item.qty_variance = Decimal::from(3);
        item.value_variance = Decimal::from(6);

        item.reset_derived();

        assert_eq!(item.counted_qty, Decimal::from(4));
        assert!(item.is_counted());
        assert!(item.qty_variance.is_zero());
        assert!(item.value_variance.is_zero());
    }
}
