// ==========================================
// 库存盘点系统 - 盘点汇总
// ==========================================
// 职责: 汇总统计（纯视图,不持久化,按需重算）
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// SummaryReport - 汇总报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    // ===== 金额 =====
    pub total_stock_value: Decimal,       // 账面库存总额
    pub total_negative_variance: Decimal, // 盘亏金额合计（<= 0）
    pub total_positive_variance: Decimal, // 盘盈金额合计（>= 0）

    // ===== 计数 =====
    pub item_count: usize,           // 总行数
    pub counted_item_count: usize,   // CONTAGEM > 0 的行数
    pub uncounted_item_count: usize, // 未盘点行数
    pub negative_item_count: usize,  // DIF. ETQ < 0 的行数
    pub positive_item_count: usize,  // DIF. ETQ > 0 的行数

    // ===== 比率 =====
    pub absolute_divergence_percentage: Decimal, // 绝对差异率（%）
}

impl SummaryReport {
    /// 绝对差异金额（盘亏 + 盘盈,均取绝对值）
    pub fn absolute_divergence(&self) -> Decimal {
        self.total_negative_variance.abs() + self.total_positive_variance.abs()
    }
}

// ==========================================
// SummaryRow - 汇总展示行（标签 / 值）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: String,   // i18n 键
    pub label: String, // 已翻译标签
    pub value: String, // 已格式化值
}
