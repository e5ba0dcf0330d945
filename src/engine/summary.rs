// ==========================================
// 库存盘点系统 - 汇总引擎
// ==========================================
// 职责: 全表汇总统计 + 汇总展示行
// 输入: 盘点表（只读）
// 输出: SummaryReport
// ==========================================

use crate::domain::summary::{SummaryReport, SummaryRow};
use crate::domain::table::InventoryTable;
use crate::domain::types::CountStatus;
use crate::format::{format_currency, format_percent, NumberLocale};
use crate::i18n::t_in;
use rust_decimal::Decimal;

/// 汇总展示行的 i18n 键（按展示顺序）
pub const SUMMARY_ROW_KEYS: [&str; 7] = [
    "summary.total_stock",
    "summary.counted_items",
    "summary.negative_items",
    "summary.positive_items",
    "summary.negative_variance",
    "summary.positive_variance",
    "summary.absolute_divergence",
];

// ==========================================
// SummaryEngine - 汇总引擎
// ==========================================
// 红线: 纯读取,不修改盘点表
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryEngine;

impl SummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算汇总统计
    ///
    /// # 说明
    /// - 盘亏/盘盈按 DIF. ETQ 的符号归类
    /// - 账面总额为 0 时绝对差异率为 0（不做除法）
    pub fn summarize(&self, table: &InventoryTable) -> SummaryReport {
        let mut report = SummaryReport {
            item_count: table.len(),
            ..Default::default()
        };

        for item in table.iter() {
            report.total_stock_value += item.stock_value;

            if item.qty_variance < Decimal::ZERO {
                report.total_negative_variance += item.value_variance;
                report.negative_item_count += 1;
            } else if item.qty_variance > Decimal::ZERO {
                report.total_positive_variance += item.value_variance;
                report.positive_item_count += 1;
            }

            if item.counted_qty > Decimal::ZERO {
                report.counted_item_count += 1;
            }
            if item.count_status == CountStatus::Uncounted {
                report.uncounted_item_count += 1;
            }
        }

        report.absolute_divergence_percentage = if report.total_stock_value.is_zero() {
            Decimal::ZERO
        } else {
            report.absolute_divergence() * Decimal::ONE_HUNDRED / report.total_stock_value
        };

        report
    }

    /// 生成汇总展示行（标签已翻译,数值已格式化）
    ///
    /// # 参数
    /// - `report`: 汇总报告
    /// - `locale`: 标签语言（"pt-BR" / "en"）
    /// - `currency_symbol`: 货币符号
    pub fn summary_rows(
        &self,
        report: &SummaryReport,
        locale: &str,
        currency_symbol: &str,
    ) -> Vec<SummaryRow> {
        let money = |v: Decimal| format_currency(v, currency_symbol, NumberLocale::pt_br());
        let values = [
            money(report.total_stock_value),
            report.counted_item_count.to_string(),
            report.negative_item_count.to_string(),
            report.positive_item_count.to_string(),
            money(report.total_negative_variance),
            money(report.total_positive_variance),
            format_percent(report.absolute_divergence_percentage),
        ];

        SUMMARY_ROW_KEYS
            .iter()
            .zip(values)
            .map(|(key, value)| SummaryRow {
                key: key.to_string(),
                label: t_in(key, locale),
                value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::InventoryItem;
    use crate::domain::types::RowId;
    use crate::engine::reconciliation::ReconciliationEngine;

    fn reconciled(items: Vec<InventoryItem>) -> InventoryTable {
        let mut table = InventoryTable::new(items);
        ReconciliationEngine::new().reconcile_all(&mut table);
        table
    }

    fn item(id: usize, unit: i64, recorded: i64, counted: Option<i64>) -> InventoryItem {
        let code = format!("C{}", id);
        let base = InventoryItem::new(
            RowId(id),
            code,
            "item",
            Decimal::from(unit),
            "L",
            Decimal::from(recorded),
        );
        match counted {
            Some(c) => base.with_count(Decimal::from(c)),
            None => base,
        }
    }

    #[test]
    fn test_summarize_divergence_percentage() {
        // 账面 1000,盘亏 -100,盘盈 40 → 14%
        let table = reconciled(vec![
            item(0, 10, 50, Some(40)),
            item(1, 4, 100, Some(110)),
            item(2, 1, 100, Some(100)),
        ]);

        let report = SummaryEngine::new().summarize(&table);

        assert_eq!(report.total_stock_value, Decimal::from(1000));
        assert_eq!(report.total_negative_variance, Decimal::from(-100));
        assert_eq!(report.total_positive_variance, Decimal::from(40));
        assert_eq!(report.absolute_divergence_percentage, Decimal::from(14));
        assert_eq!(format_percent(report.absolute_divergence_percentage), "14,00%");
    }

    #[test]
    fn test_summarize_counts() {
        let table = reconciled(vec![
            item(0, 1, 5, Some(0)),
            item(1, 1, 5, Some(6)),
            item(2, 1, 5, Some(5)),
            item(3, 1, 5, None),
        ]);

        let report = SummaryEngine::new().summarize(&table);

        assert_eq!(report.item_count, 4);
        assert_eq!(report.counted_item_count, 2);
        assert_eq!(report.uncounted_item_count, 1);
        assert_eq!(report.negative_item_count, 2);
        assert_eq!(report.positive_item_count, 1);
    }

    #[test]
    fn test_summarize_zero_stock_value() {
        // 单价为 0 → 账面总额为 0,差异率必须为 0
        let table = reconciled(vec![item(0, 0, 5, Some(9))]);

        let report = SummaryEngine::new().summarize(&table);

        assert!(report.total_stock_value.is_zero());
        assert!(report.absolute_divergence_percentage.is_zero());
    }

    #[test]
    fn test_summarize_empty_table() {
        let report = SummaryEngine::new().summarize(&InventoryTable::default());
        assert_eq!(report, SummaryReport::default());
    }

    #[test]
    fn test_summarize_is_pure() {
        let table = reconciled(vec![item(0, 3, 2, Some(1))]);
        let before = table.clone();
        let engine = SummaryEngine::new();

        let first = engine.summarize(&table);
        let second = engine.summarize(&table);

        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    fn test_summary_rows_formatting() {
        let report = SummaryReport {
            total_stock_value: Decimal::new(12345, 1),
            total_negative_variance: Decimal::from(-100),
            total_positive_variance: Decimal::from(40),
            counted_item_count: 3,
            absolute_divergence_percentage: Decimal::from(14),
            ..Default::default()
        };

        let rows = SummaryEngine::new().summary_rows(&report, "pt-BR", "R$");

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].label, "ESTOQUE TOTAL");
        assert_eq!(rows[0].value, "R$ 1.234,50");
        assert_eq!(rows[1].value, "3");
        assert_eq!(rows[4].value, "R$ -100,00");
        assert_eq!(rows[6].value, "14,00%");
    }
}
