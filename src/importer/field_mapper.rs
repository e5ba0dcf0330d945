// ==========================================
// 库存盘点系统 - 字段映射器实现
// ==========================================
// 职责: 源表头 → 标准列映射（别名 + 大小写/重音不敏感）
// 说明: ÍNDICE 与派生列（VL. ESTOQUE / DIF. ETQ / VL. DIF.）在加载时忽略,
//       由核算引擎重新计算
// ==========================================

use crate::domain::{Column, RawInventoryRecord, INDEX_HEADER};
use crate::importer::importer_trait::RawRow;
use std::collections::{BTreeMap, HashMap};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization as _;

/// 表头规范化: TRIM + NFD 去组合符号 + 大写 + 去 '.' + 合并空白
///
/// "Vl. Unt." → "VL UNT", "Endereço" → "ENDERECO"
/// 预组合（NFC）与分解（NFD）两种写法得到同一结果
pub fn normalize_header(header: &str) -> String {
    let folded: String = header
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && *c != '.')
        .collect::<String>()
        .to_uppercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 内置别名（不含标准表头本身）
fn default_aliases(column: Column) -> &'static [&'static str] {
    match column {
        Column::Code => &["CODIGO", "CODE", "SKU"],
        Column::Description => &["DESCRICAO", "DESCRIPTION", "PRODUCT"],
        Column::UnitValue => &["VALOR UNITARIO", "VL UNIT", "UNIT VALUE", "UNIT PRICE"],
        Column::Location => &["LOCALIZACAO", "LOCAL", "LOCATION"],
        Column::RecordedQty => &["QUANTIDADE", "QTDE", "QTY", "QUANTITY"],
        Column::CountedQty => &["CONTAGEM FISICA", "COUNT", "COUNTED"],
        Column::QtyVariance | Column::StockValue | Column::ValueVariance => &[],
    }
}

// ==========================================
// HeaderMap - 表头解析结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    /// 标准列 → 源表头（原样）
    pub columns: HashMap<Column, String>,
    /// 未识别的源表头（按出现顺序保留）
    pub extras: Vec<String>,
}

impl HeaderMap {
    pub fn source_of(&self, column: Column) -> Option<&str> {
        self.columns.get(&column).map(String::as_str)
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }
}

// ==========================================
// FieldMapper
// ==========================================
pub struct FieldMapper {
    // 规范化别名 → 标准列
    lookup: HashMap<String, Column>,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(&BTreeMap::new())
    }
}

impl FieldMapper {
    /// 创建映射器
    ///
    /// # 参数
    /// - extra_aliases: 配置中的附加别名（标准表头 → 别名列表）,与内置别名合并
    pub fn new(extra_aliases: &BTreeMap<String, Vec<String>>) -> Self {
        let mut lookup = HashMap::new();

        for column in Column::ALL {
            if column.is_derived() {
                continue;
            }
            lookup.insert(normalize_header(column.header()), column);
            for alias in default_aliases(column) {
                lookup.insert(normalize_header(alias), column);
            }
        }

        for (canonical, aliases) in extra_aliases {
            let key = normalize_header(canonical);
            let column = match Column::ALL
                .iter()
                .copied()
                .find(|c| normalize_header(c.header()) == key)
            {
                Some(c) if !c.is_derived() => c,
                _ => {
                    tracing::warn!(column = %canonical, "ignorando aliases para coluna desconhecida");
                    continue;
                }
            };
            for alias in aliases {
                lookup.insert(normalize_header(alias), column);
            }
        }

        Self { lookup }
    }

    /// 识别单个表头
    pub fn column_for(&self, header: &str) -> Option<Column> {
        self.lookup.get(&normalize_header(header)).copied()
    }

    /// 解析表头行
    ///
    /// 同一标准列出现多次时以第一次为准；其余作为附加列保留
    pub fn resolve_headers(&self, headers: &[String]) -> HeaderMap {
        let index_key = normalize_header(INDEX_HEADER);
        let derived: Vec<String> = Column::DERIVED
            .iter()
            .map(|c| normalize_header(c.header()))
            .collect();

        let mut map = HeaderMap::default();
        for header in headers {
            if header.trim().is_empty() {
                continue;
            }
            let key = normalize_header(header);
            if key == index_key || derived.contains(&key) {
                continue;
            }
            match self.lookup.get(&key) {
                Some(column) if !map.columns.contains_key(column) => {
                    map.columns.insert(*column, header.clone());
                }
                // 同名表头只读一次（取第一列）
                _ if map.columns.values().any(|h| h == header) => {}
                _ => {
                    if !map.extras.contains(header) {
                        map.extras.push(header.clone());
                    }
                }
            }
        }
        map
    }

    /// 原始行 → 原始库存记录（不做类型转换）
    pub fn map_record(&self, row: &RawRow, headers: &HeaderMap) -> RawInventoryRecord {
        let cell = |column: Column| -> Option<String> {
            headers
                .source_of(column)
                .and_then(|h| row.get(h))
                .map(str::to_string)
        };

        let extras = headers
            .extras
            .iter()
            .filter_map(|h| row.get(h).map(|v| (h.clone(), v.to_string())))
            .collect();

        RawInventoryRecord {
            code: cell(Column::Code),
            description: cell(Column::Description),
            unit_value: cell(Column::UnitValue),
            location: cell(Column::Location),
            recorded_qty: cell(Column::RecordedQty),
            counted_qty: cell(Column::CountedQty),
            extras,
            row_number: row.row_number,
        }
    }
}
