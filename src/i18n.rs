// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认 pt-BR）和英文（en）
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["pt-BR", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" 或 "en"）,不支持的语言回退到默认语言
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(normalize_locale(locale));
}

/// 规范化语言代码（"pt_br" / "PT-BR" → "pt-BR",未知 → 默认语言）
pub fn normalize_locale(locale: &str) -> &'static str {
    let lowered = locale.trim().replace('_', "-").to_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.to_lowercase() == lowered || l.split('-').next() == Some(lowered.as_str()))
        .unwrap_or(DEFAULT_LOCALE)
}

/// 翻译消息（当前语言）
///
/// # 示例
/// ```no_run
/// use contagem_estoque::i18n::t;
/// let msg = t("summary.total_stock");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（指定语言,不修改全局语言）
pub fn t_in(key: &str, locale: &str) -> String {
    let locale = normalize_locale(locale);
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use contagem_estoque::i18n::t_with_args;
/// let msg = t_with_args("shell.loaded", &[("rows", "12")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    interpolate(rust_i18n::t!(key).to_string(), args)
}

/// 翻译消息（指定语言 + 参数）
pub fn t_in_with_args(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    interpolate(t_in(key, locale), args)
}

fn interpolate(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
