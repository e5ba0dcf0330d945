// ==========================================
// 库存盘点系统 - 盘点表
// ==========================================
// 职责: 有序的盘点行集合 + 源文件列信息
// 生命周期: 由导入器创建,会话独占,下次加载时整体替换
// ==========================================

use crate::domain::item::InventoryItem;
use crate::domain::types::RowId;
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryTable - 盘点表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryTable {
    /// 当前规范顺序（排序会改变,筛选不会）
    items: Vec<InventoryItem>,

    /// 来源描述（文件名）
    pub source_name: Option<String>,

    /// 源文件中的非标准列（按表头顺序）
    pub extra_columns: Vec<String>,

    /// 源文件是否带 CONTAGEM 列
    pub has_count_column: bool,
}

impl InventoryTable {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [InventoryItem] {
        &mut self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InventoryItem> {
        self.items.iter()
    }

    /// 按稳定行标识查找（与当前展示顺序无关）
    pub fn get(&self, row_id: RowId) -> Option<&InventoryItem> {
        self.position_of(row_id).map(|pos| &self.items[pos])
    }

    pub fn get_mut(&mut self, row_id: RowId) -> Option<&mut InventoryItem> {
        self.position_of(row_id).map(move |pos| &mut self.items[pos])
    }

    /// 行标识在当前顺序中的位置
    ///
    /// 未排序时 row_id 即位置,直接命中；排序后退化为线性查找
    pub fn position_of(&self, row_id: RowId) -> Option<usize> {
        match self.items.get(row_id.index()) {
            Some(item) if item.row_id == row_id => Some(row_id.index()),
            _ => self.items.iter().position(|item| item.row_id == row_id),
        }
    }
}

impl<'a> IntoIterator for &'a InventoryTable {
    type Item = &'a InventoryItem;
    type IntoIter = std::slice::Iter<'a, InventoryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn table_of(n: usize) -> InventoryTable {
        let items = (0..n)
            .map(|i| InventoryItem::new(RowId(i), format!("C{}", i), "d", Decimal::ONE, "L", Decimal::ONE))
            .collect();
        InventoryTable::new(items)
    }

    #[test]
    fn test_get_by_row_id_after_reorder() {
        let mut table = table_of(4);
        table.items_mut().reverse();

        assert_eq!(table.items()[0].row_id, RowId(3));
        assert_eq!(table.get(RowId(3)).map(|i| i.code.as_str()), Some("C3"));
        assert_eq!(table.position_of(RowId(0)), Some(3));
    }

    #[test]
    fn test_unknown_row_id() {
        let table = table_of(2);
        assert!(table.get(RowId(7)).is_none());
    }
}
