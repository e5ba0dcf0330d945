// ==========================================
// 库存盘点系统 - 文本渲染
// ==========================================
// 职责: 盘点行 / 汇总行 → 终端文本块
// 说明: 行首标记 '-' 短缺, '+' 盈余（对应界面红/绿行）
// ==========================================

use crate::domain::{Column, InventoryItem, SummaryRow, INDEX_HEADER};
use crate::format::{format_currency, format_quantity, NumberLocale};
use rust_decimal::Decimal;

const SEPARATOR: &str = "  ";

/// 渲染盘点行表格
///
/// # 参数
/// - items: 要展示的行（已按视图筛选/排序）
/// - currency_symbol: 货币符号
pub fn render_items(items: &[&InventoryItem], currency_symbol: &str) -> String {
    let money = |v: Decimal| format_currency(v, currency_symbol, NumberLocale::pt_br());

    let mut header = vec![String::new(), INDEX_HEADER.to_string()];
    header.extend(Column::ALL.iter().map(|c| c.header().to_string()));

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.variance_tag().marker().to_string(),
                item.row_id.to_string(),
                item.code.clone(),
                item.description.clone(),
                money(item.unit_value),
                item.location.clone(),
                format_quantity(item.recorded_qty),
                if item.is_counted() {
                    format_quantity(item.counted_qty)
                } else {
                    "-".to_string()
                },
                format_quantity(item.qty_variance),
                money(item.stock_value),
                money(item.value_variance),
            ]
        })
        .collect();

    // 数值列右对齐: ÍNDICE / VL. UNT. / QTD / CONTAGEM / DIF. ETQ / VL. ESTOQUE / VL. DIF.
    let right_aligned = |col: usize| matches!(col, 1 | 4 | 6..=10);

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_line(&header, &widths, right_aligned));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    );
    for row in &rows {
        lines.push(render_line(row, &widths, right_aligned));
    }
    lines.join("\n")
}

fn render_line(cells: &[String], widths: &[usize], right_aligned: impl Fn(usize) -> bool) -> String {
    let padded: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(col, cell)| pad(cell, widths[col], right_aligned(col)))
        .collect();
    padded.join(SEPARATOR).trim_end().to_string()
}

fn pad(cell: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    if right {
        format!("{}{}", fill, cell)
    } else {
        format!("{}{}", cell, fill)
    }
}

/// 渲染汇总行（标签左对齐,数值右对齐）
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|r| r.value.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|r| {
            format!(
                "{}{}{}",
                pad(&r.label, label_width, false),
                SEPARATOR,
                pad(&r.value, value_width, true)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowId;

    #[test]
    fn test_render_items_layout() {
        let mut shortage =
            InventoryItem::new(RowId(0), "A1", "Parafuso", Decimal::TEN, "L-01", Decimal::from(5))
                .with_count(Decimal::from(3));
        shortage.stock_value = Decimal::from(50);
        shortage.qty_variance = Decimal::from(-2);
        shortage.value_variance = Decimal::from(-20);
        let uncounted =
            InventoryItem::new(RowId(1), "B2", "Porca", Decimal::new(12345, 1), "L-02", Decimal::ONE);

        let text = render_items(&[&shortage, &uncounted], "R$");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("ÍNDICE"));
        assert!(lines[0].find("DIF. ETQ") < lines[0].find("VL. ESTOQUE"));
        assert!(lines[0].contains("VL. DIF."));
        assert!(lines[2].starts_with('-'));
        assert!(lines[2].contains("R$ -20,00"));
        assert!(lines[3].starts_with(' '));
        assert!(lines[3].contains("R$ 1.234,50"));
    }

    #[test]
    fn test_render_summary_alignment() {
        let rows = vec![
            SummaryRow {
                key: "a".into(),
                label: "ESTOQUE TOTAL".into(),
                value: "R$ 1.000,00".into(),
            },
            SummaryRow {
                key: "b".into(),
                label: "% DIVERGÊNCIA ABSOLUTA".into(),
                value: "14,00%".into(),
            },
        ];
        let text = render_summary(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
        assert!(lines[1].ends_with("14,00%"));
    }
}
