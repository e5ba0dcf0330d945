// ==========================================
// 库存盘点系统 - JSON 记录写出
// ==========================================
// 格式: [{"COD": "...", "PRODUTO": "...", ..., "VL. DIF.": 0.0, <附加列>...}, ...]
// 规则: 按当前表格顺序写出；未盘点行写 "CONTAGEM": null
// 红线: 先完整序列化再落盘,失败时不留下半截文件
// ==========================================

use crate::domain::{Column, InventoryItem, InventoryTable};
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::ExportReport;
use crate::perf::PerfGuard;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct JsonRecordWriter;

/// 十进制值 → JSON 数字（最接近的 f64,0.7 × 3 写作 2.1）
fn number(value: Decimal) -> Value {
    Value::from(value.to_f64().unwrap_or_default())
}

impl JsonRecordWriter {
    /// 单行 → JSON 对象（标准列在前,附加列在后）
    pub fn record(&self, item: &InventoryItem, extra_columns: &[String]) -> Map<String, Value> {
        let mut obj = Map::new();
        for column in Column::ALL {
            let value = match column {
                Column::Code => Value::from(item.code.clone()),
                Column::Description => Value::from(item.description.clone()),
                Column::UnitValue => number(item.unit_value),
                Column::Location => Value::from(item.location.clone()),
                Column::RecordedQty => number(item.recorded_qty),
                Column::CountedQty if item.is_counted() => number(item.counted_qty),
                Column::CountedQty => Value::Null,
                Column::QtyVariance => number(item.qty_variance),
                Column::StockValue => number(item.stock_value),
                Column::ValueVariance => number(item.value_variance),
            };
            obj.insert(column.header().to_string(), value);
        }
        for extra in extra_columns {
            let value = item.extras.get(extra).cloned().unwrap_or_default();
            obj.insert(extra.clone(), Value::from(value));
        }
        obj
    }

    /// 整表 → JSON 文本
    pub fn to_json_string(&self, table: &InventoryTable) -> ExportResult<String> {
        let records: Vec<Value> = table
            .iter()
            .map(|item| Value::Object(self.record(item, &table.extra_columns)))
            .collect();
        Ok(serde_json::to_string_pretty(&Value::Array(records))?)
    }

    /// 保存为 JSON 文件
    pub fn write<P: AsRef<Path>>(&self, table: &InventoryTable, path: P) -> ExportResult<ExportReport> {
        let path = path.as_ref();
        let mut perf = PerfGuard::new("save_json");

        let json = self.to_json_string(table)?;
        fs::write(path, json).map_err(|e| ExportError::io(path, e))?;

        perf.set_rows(table.len());
        info!(path = %path.display(), rows = table.len(), "tabela salva em JSON");
        Ok(ExportReport {
            path: path.to_path_buf(),
            rows: table.len(),
            columns: Column::ALL.len() + table.extra_columns.len(),
            exported_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowId;
    use crate::engine::ReconciliationEngine;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_record_key_order_and_null_count() {
        let mut item = InventoryItem::new(RowId(0), "0012", "Parafuso", Decimal::TEN, "A-01", dec("5"));
        item.extras.insert("LOTE".into(), "L-1".into());
        let obj = JsonRecordWriter.record(&item, &["LOTE".to_string(), "OBS".to_string()]);

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "COD", "PRODUTO", "VL. UNT.", "ENDEREÇO", "QTD", "CONTAGEM", "DIF. ETQ",
                "VL. ESTOQUE", "VL. DIF.", "LOTE", "OBS"
            ]
        );
        assert_eq!(obj["COD"], Value::from("0012"));
        assert_eq!(obj["CONTAGEM"], Value::Null);
        assert_eq!(obj["OBS"], Value::from(""));
    }

    #[test]
    fn test_counted_zero_is_not_null() {
        let item = InventoryItem::new(RowId(0), "A", "X", Decimal::ONE, "L", Decimal::TWO)
            .with_count(Decimal::ZERO);
        let obj = JsonRecordWriter.record(&item, &[]);
        assert_eq!(obj["CONTAGEM"], Value::from(0.0));
    }

    #[test]
    fn test_decimal_values_written_without_float_noise() {
        let item = InventoryItem::new(RowId(0), "A", "X", dec("0.7"), "L", dec("3"))
            .with_count(dec("3"));
        let mut table = InventoryTable::new(vec![item]);
        ReconciliationEngine::new().reconcile_all(&mut table);

        let json = JsonRecordWriter.to_json_string(&table).unwrap();

        assert!(json.contains("\"VL. ESTOQUE\": 2.1"));
        assert!(!json.contains("2.0999"));
    }

    #[test]
    fn test_write_to_bad_path() {
        let table = InventoryTable::new(vec![]);
        let err = JsonRecordWriter
            .write(&table, Path::new("/nao/existe/dir/saida.json"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
