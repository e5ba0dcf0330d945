// ==========================================
// 库存盘点系统 - 盘点表导入器
// ==========================================
// 职责: 整合导入流程,从文件到 InventoryTable
// 流程: 解析 → 表头映射 → 列校验 → 清洗/类型转换 → 构建盘点行
// 红线: 任何一步失败都不产生半成品表格
// ==========================================

use crate::domain::{Column, CountStatus, InventoryItem, InventoryTable, RawInventoryRecord, RowId};
use crate::importer::column_validator::ColumnValidator;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{DataCleaner as _, RawSheet};
use crate::perf::PerfGuard;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info};

// ==========================================
// InventoryImporter
// ==========================================
pub struct InventoryImporter {
    file_parser: UniversalFileParser,
    field_mapper: FieldMapper,
    data_cleaner: DataCleaner,
    column_validator: ColumnValidator,
    skip_blank_rows: bool,
}

impl Default for InventoryImporter {
    fn default() -> Self {
        Self::new(&BTreeMap::new(), true)
    }
}

impl InventoryImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - column_aliases: 附加表头别名（标准表头 → 别名列表）
    /// - skip_blank_rows: 是否跳过全空行（否则全空行按缺失 COD 报错）
    pub fn new(column_aliases: &BTreeMap<String, Vec<String>>, skip_blank_rows: bool) -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper: FieldMapper::new(column_aliases),
            data_cleaner: DataCleaner,
            column_validator: ColumnValidator,
            skip_blank_rows,
        }
    }

    /// 从文件加载盘点表
    ///
    /// # 返回
    /// - Ok(InventoryTable): 派生字段全部为 0 的新表格
    /// - Err(ImportError): 缺列（MissingColumn）或文件问题（MalformedFile）
    pub fn load<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<InventoryTable> {
        let path = file_path.as_ref();
        let mut perf = PerfGuard::new("load");
        info!(file_path = %path.display(), "carregando planilha de contagem");

        let sheet = self.file_parser.parse(path).map_err(|e| {
            error!(error = %e, "falha ao interpretar o arquivo");
            e
        })?;
        debug!(rows = sheet.rows.len(), headers = sheet.headers.len(), "arquivo interpretado");

        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let table = self.load_sheet(sheet, Some(source_name))?;
        perf.set_rows(table.len());
        Ok(table)
    }

    /// 从已解析的原始表格构建盘点表
    pub fn load_sheet(
        &self,
        sheet: RawSheet,
        source_name: Option<String>,
    ) -> ImportResult<InventoryTable> {
        // === 步骤 1: 表头映射 + 列校验 ===
        let header_map = self.field_mapper.resolve_headers(&sheet.headers);
        self.column_validator.validate(&header_map).map_err(|e| {
            error!(error = %e, "coluna obrigatória ausente");
            e
        })?;
        let has_count_column = header_map.has(Column::CountedQty);

        // === 步骤 2: 逐行映射与清洗 ===
        let mut items = Vec::with_capacity(sheet.rows.len());
        let mut skipped = 0usize;
        for row in &sheet.rows {
            if self.skip_blank_rows && row.is_blank() {
                skipped += 1;
                continue;
            }
            let record = self.field_mapper.map_record(row, &header_map);
            let item = self.build_item(RowId(items.len()), record)?;
            items.push(item);
        }

        let mut table = InventoryTable::new(items);
        table.source_name = source_name;
        table.extra_columns = header_map.extras;
        table.has_count_column = has_count_column;

        info!(
            rows = table.len(),
            skipped_blank_rows = skipped,
            has_count_column,
            extra_columns = table.extra_columns.len(),
            "planilha carregada"
        );
        Ok(table)
    }

    /// 原始记录 → 盘点行（派生字段为 0）
    fn build_item(&self, row_id: RowId, record: RawInventoryRecord) -> ImportResult<InventoryItem> {
        let row = record.row_number;
        let cleaner = &self.data_cleaner;

        let code = cleaner
            .code_text(record.code.as_deref())
            .ok_or(ImportError::MissingCode { row })?;
        let unit_value =
            cleaner.number_or_zero(record.unit_value.as_deref(), row, Column::UnitValue.header())?;
        let recorded_qty = cleaner.number_or_zero(
            record.recorded_qty.as_deref(),
            row,
            Column::RecordedQty.header(),
        )?;
        let counted_qty = cleaner.parse_number(
            record.counted_qty.as_deref(),
            row,
            Column::CountedQty.header(),
        )?;

        let mut item = InventoryItem::new(
            row_id,
            code,
            cleaner.text_or_empty(record.description.as_deref()),
            unit_value,
            cleaner.text_or_empty(record.location.as_deref()),
            recorded_qty,
        );

        if let Some(value) = counted_qty {
            if value.is_sign_negative() {
                return Err(ImportError::NegativeCount { row, value });
            }
            item.counted_qty = value;
            item.count_status = CountStatus::Counted;
        }

        item.extras = record.extras;
        item.reset_derived();
        Ok(item)
    }
}
