// ==========================================
// 库存盘点系统 - 数值格式化与解析
// ==========================================
// 职责: 唯一的"数值 ↔ 展示字符串"边界
// 格式: 巴西货币习惯（千分位 '.', 小数点 ','）
// 红线: 核算引擎只处理 Decimal,不接触展示字符串
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// 默认货币符号
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

// ==========================================
// NumberLocale - 数字分隔符
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal_sep: char,
    pub thousands_sep: char,
}

impl NumberLocale {
    pub const fn pt_br() -> Self {
        Self {
            decimal_sep: ',',
            thousands_sep: '.',
        }
    }

    pub const fn en_us() -> Self {
        Self {
            decimal_sep: '.',
            thousands_sep: ',',
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::pt_br()
    }
}

// ==========================================
// 格式化
// ==========================================

/// 货币格式（R$ 1.234,50）
pub fn format_brl(value: Decimal) -> String {
    format_currency(value, DEFAULT_CURRENCY_SYMBOL, NumberLocale::pt_br())
}

/// 货币格式,符号与分隔符可配置
///
/// 负数形如 `R$ -1.234,50`
pub fn format_currency(value: Decimal, symbol: &str, locale: NumberLocale) -> String {
    format!("{} {}", symbol, format_fixed(value, 2, true, locale))
}

/// 百分比格式（14,00%）
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_fixed(value, 2, true, NumberLocale::pt_br()))
}

/// 数量格式: 最多 3 位小数,去掉末尾 0
pub fn format_quantity(value: Decimal) -> String {
    let fixed = format_fixed(value, 3, false, NumberLocale::pt_br());
    if !fixed.contains(',') {
        return fixed;
    }
    fixed
        .trim_end_matches('0')
        .trim_end_matches(',')
        .to_string()
}

/// 定点格式化（四舍五入,0.5 远离零）
fn format_fixed(value: Decimal, decimals: u32, grouping: bool, locale: NumberLocale) -> String {
    let mut rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    // -0,00 显示为 0,00
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(decimals);
    let text = rounded.to_string();

    let (int_raw, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let int_part = if grouping {
        group_thousands(int_raw, locale.thousands_sep)
    } else {
        int_raw.to_string()
    };

    let mut out = String::with_capacity(text.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&int_part);
    if !frac.is_empty() {
        out.push(locale.decimal_sep);
        out.push_str(frac);
    }
    out
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        let pos_from_end = len - i;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}

// ==========================================
// 解析
// ==========================================

/// 数值解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    #[error("valor vazio")]
    Empty,

    #[error("valor não numérico: '{0}'")]
    Invalid(String),
}

/// 解析本地化数值输入
///
/// 规则:
/// - 接受 `.` 或 `,` 作为小数点（`7,5` 与 `7.5` 等价）
/// - 同时出现时,靠后的为小数点,另一个视为千分位（`1.234,5` / `1,234.5`）
/// - 只有多个 `.` 时视为千分位（`1.234.567`）
/// - 允许 `R$` 前缀与空白
/// - 接受科学计数法（JSON 数值可能写成 `1e21`）
/// - 拒绝 NaN / 无穷大
pub fn parse_decimal(text: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix(DEFAULT_CURRENCY_SYMBOL)
        .unwrap_or(trimmed)
        .trim();
    if body.is_empty() {
        return Err(ParseDecimalError::Empty);
    }

    let invalid = || ParseDecimalError::Invalid(trimmed.to_string());
    let normalized = normalize_separators(body).ok_or_else(invalid)?;

    let parsed = if normalized.contains(|c: char| c == 'e' || c == 'E') {
        Decimal::from_scientific(&normalized)
    } else {
        Decimal::from_str(&normalized)
    };
    match parsed {
        // -0 统一为 0
        Ok(v) if v.is_zero() => Ok(Decimal::ZERO),
        Ok(v) => Ok(v),
        Err(_) => Err(invalid()),
    }
}

fn normalize_separators(body: &str) -> Option<String> {
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let last_dot = body.rfind('.');
    let last_comma = body.rfind(',');

    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if comma > dot => body.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => body.replace(',', ""),
        (None, Some(_)) => {
            if body.matches(',').count() > 1 {
                return None;
            }
            body.replace(',', ".")
        }
        (Some(_), None) if body.matches('.').count() > 1 => body.replace('.', ""),
        _ => body,
    };
    Some(normalized)
}
