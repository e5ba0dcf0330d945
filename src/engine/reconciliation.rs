// ==========================================
// 库存盘点系统 - 盘点核算引擎
// ==========================================
// 职责: 单行录入核算 / 全表核算 / 统一填充后核算
// 输入: 盘点表 + 盘点数量
// 输出: 更新后的派生字段
// ==========================================
// 公式:
//   DIF. ETQ    = CONTAGEM - QTD
//   VL. ESTOQUE = QTD * VL. UNT.
//   VL. DIF.    = DIF. ETQ * VL. UNT.
// ==========================================

use crate::domain::item::InventoryItem;
use crate::domain::table::InventoryTable;
use crate::domain::types::{CountStatus, RowId};
use crate::engine::error::{ValidationError, ValidationResult};
use crate::format::parse_decimal;
use rust_decimal::Decimal;
use tracing::{debug, info};

// ==========================================
// ReconciliationEngine - 盘点核算引擎
// ==========================================
// 红线: 无状态引擎,派生字段是三个输入字段的纯函数
#[derive(Debug, Default, Clone, Copy)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 录入单行盘点数量（文本输入）
    ///
    /// # 参数
    /// - `table`: 盘点表
    /// - `row_id`: 稳定行标识
    /// - `counted_text`: 操作员输入（接受 `.` 或 `,` 作为小数点）
    ///
    /// # 返回
    /// - Ok(&InventoryItem): 重算后的行
    /// - Err(ValidationError): 非数值 / 负数 / 行不存在,表保持不变
    pub fn apply_count<'a>(
        &self,
        table: &'a mut InventoryTable,
        row_id: RowId,
        counted_text: &str,
    ) -> ValidationResult<&'a InventoryItem> {
        let value = parse_decimal(counted_text).map_err(|_| ValidationError::NonNumericInput {
            input: counted_text.trim().to_string(),
        })?;
        self.apply_count_value(table, row_id, value)
    }

    /// 录入单行盘点数量（数值输入）
    pub fn apply_count_value<'a>(
        &self,
        table: &'a mut InventoryTable,
        row_id: RowId,
        counted_qty: Decimal,
    ) -> ValidationResult<&'a InventoryItem> {
        let counted_qty = Self::validate_count(counted_qty)?;
        let item = table
            .get_mut(row_id)
            .ok_or(ValidationError::UnknownRow(row_id))?;

        item.counted_qty = counted_qty;
        item.count_status = CountStatus::Counted;
        self.recompute(item);

        debug!(
            row_id = %row_id,
            code = %item.code,
            counted_qty = %counted_qty,
            qty_variance = %item.qty_variance,
            value_variance = %item.value_variance,
            "contagem registrada"
        );
        Ok(item)
    }

    /// 全表核算（按当前 counted_qty 重算所有行）
    ///
    /// 幂等: 连续调用两次结果一致
    pub fn reconcile_all<'a>(&self, table: &'a mut InventoryTable) -> &'a InventoryTable {
        for item in table.items_mut() {
            self.recompute(item);
        }
        info!(rows = table.len(), "inventário apurado");
        table
    }

    /// 统一填充盘点数量后全表核算
    ///
    /// # 参数
    /// - `value`: 填充值（必须非负）
    pub fn fill_all<'a>(
        &self,
        table: &'a mut InventoryTable,
        value: Decimal,
    ) -> ValidationResult<&'a InventoryTable> {
        let value = Self::validate_count(value)?;
        for item in table.items_mut() {
            item.counted_qty = value;
            item.count_status = CountStatus::Counted;
        }
        info!(rows = table.len(), value = %value, "contagens preenchidas");
        Ok(self.reconcile_all(table))
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 重算单行派生字段
    pub fn recompute(&self, item: &mut InventoryItem) {
        item.qty_variance = item.counted_qty - item.recorded_qty;
        item.stock_value = item.recorded_qty * item.unit_value;
        item.value_variance = item.qty_variance * item.unit_value;
    }

    fn validate_count(value: Decimal) -> ValidationResult<Decimal> {
        if value.is_zero() {
            // -0 统一为 0
            return Ok(Decimal::ZERO);
        }
        if value.is_sign_negative() {
            return Err(ValidationError::NegativeInput { value });
        }
        Ok(value)
    }
}
