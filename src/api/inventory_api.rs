// ==========================================
// 库存盘点系统 - 盘点会话 API
// ==========================================
// 职责: 持有当前盘点表,串联 导入 → 核算 → 汇总/视图 → 保存/导出
// 红线: 加载失败保留原表；任何失败操作不修改盘点表
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::{
    InventoryItem, InventoryTable, RowId, SortDirection, SummaryReport, SummaryRow, VarianceSign,
};
use crate::engine::{ReconciliationEngine, SummaryEngine, ValidationError, ViewService};
use crate::exporter::{ExportReport, JsonRecordWriter, XlsxExporter};
use crate::format::parse_decimal;
use crate::importer::InventoryImporter;
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// InventoryApi - 盘点会话
// ==========================================
pub struct InventoryApi {
    config: AppConfig,
    table: Option<InventoryTable>,
    importer: InventoryImporter,
    reconciliation: ReconciliationEngine,
    summary: SummaryEngine,
    views: ViewService,
}

impl Default for InventoryApi {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl InventoryApi {
    pub fn new(config: AppConfig) -> Self {
        let importer = InventoryImporter::new(&config.column_aliases, config.skip_blank_rows);
        Self {
            config,
            table: None,
            importer,
            reconciliation: ReconciliationEngine::new(),
            summary: SummaryEngine::new(),
            views: ViewService::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    /// 当前盘点表
    pub fn table(&self) -> ApiResult<&InventoryTable> {
        self.table.as_ref().ok_or(ApiError::NoTableLoaded)
    }

    fn table_mut(&mut self) -> ApiResult<&mut InventoryTable> {
        self.table.as_mut().ok_or(ApiError::NoTableLoaded)
    }

    // ==========================================
    // 加载 / 保存 / 导出
    // ==========================================

    /// 加载盘点表（整体替换当前表）
    ///
    /// # 返回
    /// - Ok(&InventoryTable): 新表（派生字段为 0）
    /// - Err(ApiError::Load): 原表保持不变
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<&InventoryTable> {
        match self.importer.load(path.as_ref()) {
            Ok(table) => {
                if let Some(previous) = &self.table {
                    info!(previous_rows = previous.len(), "substituindo planilha atual");
                }
                Ok(self.table.insert(table))
            }
            Err(e) => {
                warn!(error = %e, kept_previous = self.table.is_some(), "carga rejeitada");
                Err(e.into())
            }
        }
    }

    /// 加载后立即全表核算（一次性命令使用）
    pub fn load_and_reconcile<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<&InventoryTable> {
        self.load(path)?;
        self.reconcile()
    }

    /// 保存为 JSON 记录
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ApiResult<ExportReport> {
        let table = self.table()?;
        Ok(JsonRecordWriter.write(table, path)?)
    }

    /// 导出 xlsx
    pub fn export_xlsx<P: AsRef<Path>>(&self, path: P) -> ApiResult<ExportReport> {
        let table = self.table()?;
        let exporter = XlsxExporter::new(self.config.export_sheet_name.as_str());
        Ok(exporter.export(table, path)?)
    }

    // ==========================================
    // 核算
    // ==========================================

    /// 录入单行盘点数量
    pub fn apply_count(&mut self, row_id: RowId, counted_text: &str) -> ApiResult<&InventoryItem> {
        let engine = self.reconciliation;
        let table = self.table_mut()?;
        Ok(engine.apply_count(table, row_id, counted_text)?)
    }

    /// 全部行填充同一盘点数量
    pub fn fill_all(&mut self, value_text: &str) -> ApiResult<&InventoryTable> {
        let value = parse_decimal(value_text).map_err(|_| ValidationError::NonNumericInput {
            input: value_text.trim().to_string(),
        })?;
        let engine = self.reconciliation;
        let table = self.table_mut()?;
        Ok(engine.fill_all(table, value)?)
    }

    /// 全表核算
    pub fn reconcile(&mut self) -> ApiResult<&InventoryTable> {
        let engine = self.reconciliation;
        let table = self.table_mut()?;
        Ok(engine.reconcile_all(table))
    }

    // ==========================================
    // 汇总
    // ==========================================

    pub fn summary(&self) -> ApiResult<SummaryReport> {
        Ok(self.summary.summarize(self.table()?))
    }

    /// 汇总展示行（按配置的语言与货币符号）
    pub fn summary_rows(&self) -> ApiResult<Vec<SummaryRow>> {
        let report = self.summary()?;
        Ok(self
            .summary
            .summary_rows(&report, &self.config.locale, &self.config.currency_symbol))
    }

    // ==========================================
    // 视图 / 排序
    // ==========================================

    /// 全部行（TODOS）
    pub fn view_all(&self) -> ApiResult<Vec<&InventoryItem>> {
        Ok(self.views.all(self.table()?))
    }

    /// 按编码 / 库位筛选
    pub fn find(&self, code: Option<&str>, location: Option<&str>) -> ApiResult<Vec<&InventoryItem>> {
        Ok(self.views.filter_by_text(self.table()?, code, location))
    }

    /// 短缺行（FALTAS）
    pub fn shortages(&self) -> ApiResult<Vec<&InventoryItem>> {
        Ok(self
            .views
            .filter_by_variance_sign(self.table()?, VarianceSign::Negative))
    }

    /// 盈余行（SOBRAS）
    pub fn overages(&self) -> ApiResult<Vec<&InventoryItem>> {
        Ok(self
            .views
            .filter_by_variance_sign(self.table()?, VarianceSign::Positive))
    }

    /// 按 VL. DIF. 排序（修改规范顺序）
    pub fn sort(&mut self, direction: SortDirection) -> ApiResult<&InventoryTable> {
        let views = self.views;
        let table = self.table_mut()?;
        Ok(views.sort_by_value_variance(table, direction))
    }
}
