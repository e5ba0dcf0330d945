// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 验证核算 → 汇总 → 视图/排序 之间的协作
// 场景: 录入、填充、排序后再录入,汇总始终基于最新派生字段
// ==========================================

use contagem_estoque::engine::ValidationErrorKind;
use contagem_estoque::{
    CountStatus, InventoryItem, InventoryTable, ReconciliationEngine, RowId, SortDirection,
    SummaryEngine, VarianceSign, ViewService,
};
use rust_decimal::Decimal;

// ==========================================
// 测试辅助函数
// ==========================================

/// 账面总额 1000 的盘点表
fn warehouse_table() -> InventoryTable {
    InventoryTable::new(vec![
        InventoryItem::new(RowId(0), "A-100", "Parafuso", Decimal::TEN, "RUA-1", Decimal::from(50)),
        InventoryItem::new(RowId(1), "B-200", "Porca", Decimal::from(4), "RUA-2", Decimal::ONE_HUNDRED),
        InventoryItem::new(RowId(2), "C-300", "Arruela", Decimal::ONE, "RUA-1", Decimal::ONE_HUNDRED),
    ])
}

fn order(table: &InventoryTable) -> Vec<usize> {
    table.iter().map(|i| i.row_id.index()).collect()
}

#[test]
fn test_count_then_summary_divergence() {
    let mut table = warehouse_table();
    let engine = ReconciliationEngine::new();

    engine.apply_count(&mut table, RowId(0), "40").unwrap();
    engine.apply_count(&mut table, RowId(1), "110").unwrap();
    engine.apply_count(&mut table, RowId(2), "100").unwrap();

    let report = SummaryEngine::new().summarize(&table);

    assert_eq!(report.total_stock_value, Decimal::from(1000));
    assert_eq!(report.total_negative_variance, Decimal::from(-100));
    assert_eq!(report.total_positive_variance, Decimal::from(40));
    assert_eq!(report.negative_item_count, 1);
    assert_eq!(report.positive_item_count, 1);
    assert_eq!(report.counted_item_count, 3);
    assert_eq!(report.absolute_divergence_percentage, Decimal::from(14));
}

#[test]
fn test_reconcile_uncounted_rows_as_zero() {
    let mut table = warehouse_table();
    let engine = ReconciliationEngine::new();

    engine.reconcile_all(&mut table);

    assert!(table.iter().all(|i| i.count_status == CountStatus::Uncounted));
    assert_eq!(table.items()[0].qty_variance, Decimal::from(-50));
    assert_eq!(table.items()[0].value_variance, Decimal::from(-500));

    let report = SummaryEngine::new().summarize(&table);
    assert_eq!(report.uncounted_item_count, 3);
    assert_eq!(report.counted_item_count, 0);
    assert_eq!(report.absolute_divergence_percentage, Decimal::ONE_HUNDRED);
}

#[test]
fn test_reconcile_idempotent_after_counts() {
    let mut table = warehouse_table();
    let engine = ReconciliationEngine::new();
    engine.apply_count(&mut table, RowId(1), "7,5").unwrap();

    engine.reconcile_all(&mut table);
    let once = table.clone();
    engine.reconcile_all(&mut table);

    assert_eq!(table, once);
    for item in table.iter() {
        assert_eq!(item.qty_variance, item.counted_qty - item.recorded_qty);
        assert_eq!(item.stock_value, item.recorded_qty * item.unit_value);
        assert_eq!(item.value_variance, item.qty_variance * item.unit_value);
    }
}

#[test]
fn test_summary_does_not_modify_table() {
    let mut table = warehouse_table();
    ReconciliationEngine::new().fill_all(&mut table, Decimal::from(60)).unwrap();
    let before = table.clone();

    let engine = SummaryEngine::new();
    let first = engine.summarize(&table);
    let second = engine.summarize(&table);

    assert_eq!(first, second);
    assert_eq!(table, before);
}

#[test]
fn test_sort_then_count_hits_same_row() {
    let mut table = warehouse_table();
    let engine = ReconciliationEngine::new();
    let views = ViewService::new();

    engine.apply_count(&mut table, RowId(0), "40").unwrap(); // -100
    engine.apply_count(&mut table, RowId(1), "110").unwrap(); // +40
    engine.apply_count(&mut table, RowId(2), "100").unwrap(); // 0

    views.sort_by_value_variance(&mut table, SortDirection::Descending);
    assert_eq!(order(&table), vec![1, 2, 0]);

    // 排序后按 row_id 录入,仍然命中原来的行
    let item = engine.apply_count(&mut table, RowId(0), "50").unwrap();
    assert_eq!(item.code, "A-100");
    assert!(item.value_variance.is_zero());
    assert_eq!(order(&table), vec![1, 2, 0]);

    // 稳定排序: 相等的 VL. DIF. 保持当前相对顺序
    views.sort_by_value_variance(&mut table, SortDirection::Ascending);
    assert_eq!(order(&table), vec![2, 0, 1]);
}

#[test]
fn test_variance_views_follow_value_variance() {
    let items = [-5i64, 0, 3, -1]
        .iter()
        .enumerate()
        .map(|(i, diff)| {
            InventoryItem::new(RowId(i), format!("C{}", i), "item", Decimal::ONE, "L", Decimal::TEN)
                .with_count(Decimal::from(10 + diff))
        })
        .collect();
    let mut table = InventoryTable::new(items);
    ReconciliationEngine::new().reconcile_all(&mut table);
    let views = ViewService::new();

    let shortages: Vec<usize> = views
        .filter_by_variance_sign(&table, VarianceSign::Negative)
        .iter()
        .map(|i| i.row_id.index())
        .collect();
    let overages: Vec<usize> = views
        .filter_by_variance_sign(&table, VarianceSign::Positive)
        .iter()
        .map(|i| i.row_id.index())
        .collect();

    assert_eq!(shortages, vec![0, 3]);
    assert_eq!(overages, vec![2]);
}

#[test]
fn test_rejected_count_keeps_summary() {
    let mut table = warehouse_table();
    let engine = ReconciliationEngine::new();
    engine.apply_count(&mut table, RowId(2), "90").unwrap();
    let before = SummaryEngine::new().summarize(&table);

    let err = engine.apply_count(&mut table, RowId(2), "-3").unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::NegativeInput);

    let err = engine.apply_count(&mut table, RowId(2), "abc").unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::NonNumericInput);

    assert_eq!(table.items()[2].counted_qty, Decimal::from(90));
    assert_eq!(SummaryEngine::new().summarize(&table), before);
}

#[test]
fn test_fractional_counts_sum_exactly() {
    // 三行 0,1 的盘亏合计必须恰好是 -0,3
    let items = (0..3)
        .map(|i| {
            InventoryItem::new(RowId(i), format!("F{}", i), "item", Decimal::ONE, "L", Decimal::ONE)
        })
        .collect();
    let mut table = InventoryTable::new(items);
    let engine = ReconciliationEngine::new();
    for i in 0..3 {
        engine.apply_count(&mut table, RowId(i), "0,9").unwrap();
    }

    let report = SummaryEngine::new().summarize(&table);

    assert_eq!(report.total_negative_variance, Decimal::new(-3, 1));
    assert_eq!(report.absolute_divergence_percentage, Decimal::TEN);
}
