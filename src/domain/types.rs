// ==========================================
// 库存盘点系统 - 领域类型定义
// ==========================================
// 职责: 行标识、计数状态、差异方向、排序方向、标准列
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 行标识 (Row Id)
// ==========================================
// 红线: 加载时按原始位置分配,排序/筛选后不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl RowId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 计数状态 (Count Status)
// ==========================================
// 区分"未盘点"与"盘点结果为 0"
// 数值口径不变: 未盘点行的 counted_qty 仍为 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountStatus {
    #[default]
    Uncounted, // 未盘点
    Counted,   // 已盘点（含盘点为 0）
}

impl fmt::Display for CountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountStatus::Uncounted => write!(f, "UNCOUNTED"),
            CountStatus::Counted => write!(f, "COUNTED"),
        }
    }
}

// ==========================================
// 差异方向 (Variance Sign)
// ==========================================
// Negative = 盘亏 (FALTAS), Positive = 盘盈 (SOBRAS)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceSign {
    Negative,
    Positive,
}

impl VarianceSign {
    /// 判断金额差异是否落在该方向（0 不属于任何方向）
    pub fn matches(self, value_variance: Decimal) -> bool {
        match self {
            VarianceSign::Negative => value_variance < Decimal::ZERO,
            VarianceSign::Positive => value_variance > Decimal::ZERO,
        }
    }
}

impl fmt::Display for VarianceSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarianceSign::Negative => write!(f, "NEGATIVE"),
            VarianceSign::Positive => write!(f, "POSITIVE"),
        }
    }
}

// ==========================================
// 排序方向 (Sort Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "crescente" | "-" => Some(SortDirection::Ascending),
            "desc" | "descending" | "decrescente" | "+" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

// ==========================================
// 差异标记 (Variance Tag)
// ==========================================
// 仅用于展示: 红(盘亏) / 白(持平) / 绿(盘盈)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceTag {
    Shortage,
    Even,
    Overage,
}

impl VarianceTag {
    pub fn for_value(value_variance: Decimal) -> Self {
        if value_variance < Decimal::ZERO {
            VarianceTag::Shortage
        } else if value_variance > Decimal::ZERO {
            VarianceTag::Overage
        } else {
            VarianceTag::Even
        }
    }

    /// 终端展示用的单字符标记
    pub fn marker(self) -> char {
        match self {
            VarianceTag::Shortage => '-',
            VarianceTag::Even => ' ',
            VarianceTag::Overage => '+',
        }
    }
}

// ==========================================
// 标准列 (Canonical Column)
// ==========================================
// 表头与盘点表格一致,顺序即导出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Column {
    Code,          // COD
    Description,   // PRODUTO
    UnitValue,     // VL. UNT.
    Location,      // ENDEREÇO
    RecordedQty,   // QTD
    CountedQty,    // CONTAGEM
    QtyVariance,   // DIF. ETQ
    StockValue,    // VL. ESTOQUE
    ValueVariance, // VL. DIF.
}

/// 行索引列表头（仅导出使用）
pub const INDEX_HEADER: &str = "ÍNDICE";

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Code,
        Column::Description,
        Column::UnitValue,
        Column::Location,
        Column::RecordedQty,
        Column::CountedQty,
        Column::QtyVariance,
        Column::StockValue,
        Column::ValueVariance,
    ];

    /// 加载时必须存在的列
    pub const REQUIRED: [Column; 5] = [
        Column::Code,
        Column::Description,
        Column::UnitValue,
        Column::Location,
        Column::RecordedQty,
    ];

    /// 派生列（加载时总是重置为 0）
    pub const DERIVED: [Column; 3] = [Column::QtyVariance, Column::StockValue, Column::ValueVariance];

    pub fn header(self) -> &'static str {
        match self {
            Column::Code => "COD",
            Column::Description => "PRODUTO",
            Column::UnitValue => "VL. UNT.",
            Column::Location => "ENDEREÇO",
            Column::RecordedQty => "QTD",
            Column::CountedQty => "CONTAGEM",
            Column::QtyVariance => "DIF. ETQ",
            Column::StockValue => "VL. ESTOQUE",
            Column::ValueVariance => "VL. DIF.",
        }
    }

    pub fn is_derived(self) -> bool {
        Column::DERIVED.contains(&self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_sign_excludes_zero() {
        assert!(VarianceSign::Negative.matches(Decimal::new(-1, 2)));
        assert!(!VarianceSign::Negative.matches(Decimal::ZERO));
        assert!(VarianceSign::Positive.matches(Decimal::from(3)));
        assert!(!VarianceSign::Positive.matches(Decimal::ZERO));
    }

    #[test]
    fn test_variance_tag() {
        assert_eq!(VarianceTag::for_value(Decimal::from(-5)), VarianceTag::Shortage);
        assert_eq!(VarianceTag::for_value(Decimal::ZERO), VarianceTag::Even);
        assert_eq!(VarianceTag::for_value(Decimal::new(25, 1)), VarianceTag::Overage);
    }

    #[test]
    fn test_column_headers_in_sheet_order() {
        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec![
                "COD",
                "PRODUTO",
                "VL. UNT.",
                "ENDEREÇO",
                "QTD",
                "CONTAGEM",
                "DIF. ETQ",
                "VL. ESTOQUE",
                "VL. DIF.",
            ]
        );
        assert!(Column::ValueVariance.is_derived());
        assert!(Column::QtyVariance.is_derived());
        assert!(!Column::CountedQty.is_derived());
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("Decrescente"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("sideways"), None);
    }
}
