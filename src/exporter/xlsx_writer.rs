// ==========================================
// 库存盘点系统 - xlsx 导出
// ==========================================
// 工具: rust_xlsxwriter
// 布局: ÍNDICE + 标准列 + 附加列；每行一个盘点行,按当前表格顺序
// 样式: 表头加粗并冻结；短缺行红底,盈余行绿底（与界面行标记一致）
// ==========================================

use crate::domain::{Column, InventoryItem, InventoryTable, VarianceTag, INDEX_HEADER};
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::ExportReport;
use crate::perf::PerfGuard;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;
use tracing::info;

const MONEY_FORMAT: &str = "#,##0.00";
const QTY_FORMAT: &str = "#,##0.###";
const SHORTAGE_FILL: u32 = 0xFFC7CE;
const OVERAGE_FILL: u32 = 0xC6EFCE;

/// 单元格数值（rust_xlsxwriter 只接受 f64）
fn cell_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// 一组行样式（文本 / 数量 / 金额）
struct RowFormats {
    text: Format,
    qty: Format,
    money: Format,
}

impl RowFormats {
    fn new(fill: Option<u32>) -> Self {
        let base = match fill {
            Some(rgb) => Format::new().set_background_color(Color::RGB(rgb)),
            None => Format::new(),
        };
        Self {
            text: base.clone(),
            qty: base.clone().set_num_format(QTY_FORMAT),
            money: base.set_num_format(MONEY_FORMAT),
        }
    }
}

pub struct XlsxExporter {
    sheet_name: String,
}

impl XlsxExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// 导出盘点表为 xlsx
    ///
    /// # 参数
    /// - table: 盘点表（导出前由调用方完成核算）
    /// - path: 输出文件路径
    ///
    /// # 返回
    /// - Ok(ExportReport): 导出统计
    /// - Err(ExportError): 工作表创建或保存失败
    pub fn export<P: AsRef<Path>>(&self, table: &InventoryTable, path: P) -> ExportResult<ExportReport> {
        let path = path.as_ref();
        let mut perf = PerfGuard::new("export_xlsx");

        let mut workbook = XlsxWorkbook::new();
        let worksheet = workbook.add_worksheet().set_name(&self.sheet_name)?;

        let columns = self.write_header(worksheet, &table.extra_columns)?;

        let plain = RowFormats::new(None);
        let shortage = RowFormats::new(Some(SHORTAGE_FILL));
        let overage = RowFormats::new(Some(OVERAGE_FILL));

        for (idx, item) in table.iter().enumerate() {
            let formats = match item.variance_tag() {
                VarianceTag::Shortage => &shortage,
                VarianceTag::Overage => &overage,
                VarianceTag::Even => &plain,
            };
            // rust_xlsxwriter 行列从 0 开始（u32 / u16）,第 0 行为表头
            self.write_row(worksheet, idx as u32 + 1, item, &table.extra_columns, formats)?;
        }

        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofit();

        workbook
            .save(path)
            .map_err(|e| ExportError::io(path, e))?;

        perf.set_rows(table.len());
        info!(path = %path.display(), rows = table.len(), "planilha exportada");
        Ok(ExportReport {
            path: path.to_path_buf(),
            rows: table.len(),
            columns,
            exported_at: Utc::now(),
        })
    }

    fn write_header(&self, worksheet: &mut Worksheet, extras: &[String]) -> ExportResult<usize> {
        let bold = Format::new().set_bold();
        let headers = std::iter::once(INDEX_HEADER)
            .chain(Column::ALL.iter().map(|c| c.header()))
            .chain(extras.iter().map(String::as_str));

        let mut count = 0usize;
        for (col, header) in headers.enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &bold)?;
            count += 1;
        }
        Ok(count)
    }

    fn write_row(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        item: &InventoryItem,
        extras: &[String],
        formats: &RowFormats,
    ) -> ExportResult<()> {
        worksheet.write_number_with_format(row, 0, item.row_id.index() as f64, &formats.qty)?;

        for (offset, column) in Column::ALL.iter().enumerate() {
            let col = offset as u16 + 1;
            let (value, format) = match column {
                Column::Code => {
                    worksheet.write_string_with_format(row, col, &item.code, &formats.text)?;
                    continue;
                }
                Column::Description => {
                    worksheet.write_string_with_format(row, col, &item.description, &formats.text)?;
                    continue;
                }
                Column::Location => {
                    worksheet.write_string_with_format(row, col, &item.location, &formats.text)?;
                    continue;
                }
                // 未盘点留空,重新加载后仍为未盘点
                Column::CountedQty if !item.is_counted() => {
                    worksheet.write_blank(row, col, &formats.qty)?;
                    continue;
                }
                Column::UnitValue => (item.unit_value, &formats.money),
                Column::RecordedQty => (item.recorded_qty, &formats.qty),
                Column::CountedQty => (item.counted_qty, &formats.qty),
                Column::QtyVariance => (item.qty_variance, &formats.qty),
                Column::StockValue => (item.stock_value, &formats.money),
                Column::ValueVariance => (item.value_variance, &formats.money),
            };
            worksheet.write_number_with_format(row, col, cell_number(value), format)?;
        }

        let first_extra = Column::ALL.len() as u16 + 1;
        for (offset, extra) in extras.iter().enumerate() {
            if let Some(value) = item.extras.get(extra) {
                worksheet.write_string_with_format(
                    row,
                    first_extra + offset as u16,
                    value,
                    &formats.text,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowId;
    use calamine::{open_workbook_auto, Data, Reader};
    use tempfile::Builder;

    #[test]
    fn test_export_layout_readable_by_calamine() {
        let mut item =
            InventoryItem::new(RowId(0), "0012", "Parafuso", Decimal::TEN, "A-01", Decimal::from(5));
        item.extras.insert("LOTE".into(), "L-1".into());
        let mut table = InventoryTable::new(vec![item]);
        table.extra_columns = vec!["LOTE".into()];

        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let report = XlsxExporter::new("Contagem").export(&table, file.path()).unwrap();
        assert_eq!(report.rows, 1);
        assert_eq!(report.columns, 11);

        let mut workbook = open_workbook_auto(file.path()).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Contagem".to_string()]);
        let range = workbook.worksheet_range("Contagem").unwrap();

        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            header,
            vec![
                "ÍNDICE", "COD", "PRODUTO", "VL. UNT.", "ENDEREÇO", "QTD", "CONTAGEM", "DIF. ETQ",
                "VL. ESTOQUE", "VL. DIF.", "LOTE"
            ]
        );

        let row: Vec<&Data> = range.rows().nth(1).unwrap().iter().collect();
        assert_eq!(row[1], &Data::String("0012".into()));
        assert_eq!(row[3], &Data::Float(10.0));
        assert_eq!(row[10], &Data::String("L-1".into()));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let table = InventoryTable::new(vec![]);
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = XlsxExporter::new("a[b]").export(&table, file.path()).unwrap_err();
        assert!(matches!(err, ExportError::Xlsx(_)));
    }
}
