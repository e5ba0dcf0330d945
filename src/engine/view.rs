// ==========================================
// 库存盘点系统 - 筛选/排序服务
// ==========================================
// 职责: 按编码/库位筛选、按差异方向筛选、按金额差异排序
// 红线: 筛选只生成视图,不改变规范顺序；排序改变规范顺序但不改变行标识
// ==========================================

use crate::domain::item::InventoryItem;
use crate::domain::table::InventoryTable;
use crate::domain::types::{SortDirection, VarianceSign};
use tracing::info;

// ==========================================
// TextFilter - 文本筛选条件
// ==========================================
// 空字符串等同于未指定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    pub code: Option<String>,
    pub location: Option<String>,
}

impl TextFilter {
    pub fn new(code: Option<&str>, location: Option<&str>) -> Self {
        Self {
            code: code.map(str::to_string),
            location: location.map(str::to_string),
        }
    }

    fn code_pattern(&self) -> Option<&str> {
        self.code.as_deref().filter(|s| !s.is_empty())
    }

    fn location_pattern(&self) -> Option<&str> {
        self.location.as_deref().filter(|s| !s.is_empty())
    }

    /// 区分大小写的子串匹配,两个条件同时给出时取交集
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let code_ok = self
            .code_pattern()
            .map_or(true, |pattern| item.code.contains(pattern));
        let location_ok = self
            .location_pattern()
            .map_or(true, |pattern| item.location.contains(pattern));
        code_ok && location_ok
    }
}

// ==========================================
// ViewService - 筛选/排序服务
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewService;

impl ViewService {
    pub fn new() -> Self {
        Self
    }

    /// 全部行（规范顺序）
    pub fn all<'a>(&self, table: &'a InventoryTable) -> Vec<&'a InventoryItem> {
        table.iter().collect()
    }

    /// 按编码 / 库位子串筛选
    ///
    /// # 参数
    /// - `code`: 编码子串（None 或空串表示不筛选）
    /// - `location`: 库位子串（None 或空串表示不筛选）
    pub fn filter_by_text<'a>(
        &self,
        table: &'a InventoryTable,
        code: Option<&str>,
        location: Option<&str>,
    ) -> Vec<&'a InventoryItem> {
        let filter = TextFilter::new(code, location);
        table.iter().filter(|item| filter.matches(item)).collect()
    }

    /// 按金额差异方向筛选（盘亏 FALTAS / 盘盈 SOBRAS）
    pub fn filter_by_variance_sign<'a>(
        &self,
        table: &'a InventoryTable,
        sign: VarianceSign,
    ) -> Vec<&'a InventoryItem> {
        table
            .iter()
            .filter(|item| sign.matches(item.value_variance))
            .collect()
    }

    /// 按 VL. DIF. 稳定排序
    ///
    /// # 说明
    /// - 相等时保持原有相对顺序
    /// - 修改规范顺序,row_id 不变,后续录入仍命中正确的行
    pub fn sort_by_value_variance<'a>(
        &self,
        table: &'a mut InventoryTable,
        direction: SortDirection,
    ) -> &'a InventoryTable {
        table.items_mut().sort_by(|a, b| {
            let ord = a.value_variance.cmp(&b.value_variance);
            if direction.is_ascending() {
                ord
            } else {
                ord.reverse()
            }
        });
        info!(rows = table.len(), ?direction, "VL. DIF. classificado");
        table
    }
}
