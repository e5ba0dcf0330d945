// ==========================================
// 库存盘点系统 - 导入 Trait
// ==========================================
// 职责: 定义导入管道接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RawSheet - 原始表格
// ==========================================
// 用途: 文件解析产物（表头 + 行记录）,与文件格式无关
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>, // 表头（已 TRIM）
    pub rows: Vec<RawRow>,    // 数据行（含空白行,单元格原样）
}

/// 原始行记录
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub row_number: usize,              // 原始文件行号（表头为第 1 行）
    pub cells: HashMap<String, String>, // 表头 → 单元格文本
}

impl RawRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser, JsonParser
pub trait FileParser {
    /// 解析文件为原始表格
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头 + 行记录
    /// - Err: 文件读取错误、格式错误
    fn parse(&self, file_path: &Path) -> ImportResult<RawSheet>;

    /// 支持的扩展名（小写,不带点）
    fn extensions(&self) -> &'static [&'static str];
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleaner
pub trait DataCleaner {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化数值单元格的 NULL 值（空白/"nan"/"null" → None）
    ///
    /// 只用于数值字段；文本字段中的 "null" 是合法内容
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 解析数值字段
    ///
    /// # 参数
    /// - value: 原始文本（None 表示空单元格）
    /// - row: 行号（用于错误报告）
    /// - field: 列名（用于错误报告）
    ///
    /// # 返回
    /// - Ok(Some(Decimal)): 解析成功（十进制精确值）
    /// - Ok(None): 空值
    /// - Err: 非数值
    fn parse_number(&self, value: Option<&str>, row: usize, field: &str)
        -> ImportResult<Option<Decimal>>;
}
