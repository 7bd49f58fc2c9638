use portal_domain::TaxonomyPath;
use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s-]").expect("valid sanitizer pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// 将自由文本清洗为路径片段
/// 仅保留字母、数字、空白和连字符，去除首尾空白，空白串折叠为单个下划线
pub fn sanitize(raw: &str) -> String {
    let stripped = DISALLOWED.replace_all(raw, "");
    WHITESPACE.replace_all(stripped.trim(), "_").into_owned()
}

/// 清洗后为空时使用占位符
pub fn sanitize_segment(raw: &str, placeholder: &str) -> String {
    let segment = sanitize(raw);
    if segment.is_empty() {
        placeholder.to_string()
    } else {
        segment
    }
}

/// 构造分类目录
pub fn taxonomy_path(grade: &str, subject: &str, medium: &str, placeholder: &str) -> TaxonomyPath {
    TaxonomyPath {
        grade: sanitize_segment(grade, placeholder),
        subject: sanitize_segment(subject, placeholder),
        medium: sanitize_segment(medium, placeholder),
    }
}
