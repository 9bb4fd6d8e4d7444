//! Slug：URL 安全的资源标识符
//!
//! 与路由中的 slug 转换器一致，合法字符为 ASCII 字母、数字、`-` 与 `_`，且不能为空。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 已校验的 slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

/// slug 校验错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug 不能为空")]
    Empty,
    #[error("slug 包含非法字符: {0:?}")]
    InvalidChar(char),
}

impl Slug {
    /// 按原样校验，不做任何大小写或编码转换
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }
        if let Some(c) = raw.chars().find(|c| !is_slug_char(*c)) {
            return Err(SlugError::InvalidChar(c));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// 由名称生成 slug
///
/// 转为小写，丢弃字母数字、空白、`-`、`_` 之外的字符，
/// 连续的空白与 `-` 合并为单个 `-`，去掉首尾的 `-` 和 `_`。
/// 非 ASCII 字母数字会被丢弃，全部被丢弃时返回 `None`。
pub fn slugify(name: &str) -> Option<Slug> {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        }
    }

    let trimmed = out.trim_matches(|c| c == '-' || c == '_');
    Slug::parse(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_slug_chars() {
        let slug = Slug::parse("Red-Shoes_42").unwrap();
        assert_eq!(slug.as_str(), "Red-Shoes_42");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert_eq!(Slug::parse("a b"), Err(SlugError::InvalidChar(' ')));
        assert_eq!(Slug::parse("a.b"), Err(SlugError::InvalidChar('.')));
        assert_eq!(Slug::parse("café"), Err(SlugError::InvalidChar('é')));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Running Shoes").unwrap().as_str(), "running-shoes");
        assert_eq!(slugify("  Hello,  World! ").unwrap().as_str(), "hello-world");
        assert_eq!(slugify("a -- b").unwrap().as_str(), "a-b");
        assert_eq!(slugify("_edge_").unwrap().as_str(), "edge");
        assert!(slugify("!!!").is_none());
    }

    #[test]
    fn test_serde_validates() {
        let ok: Slug = serde_json::from_str("\"blue-mug\"").unwrap();
        assert_eq!(ok.as_str(), "blue-mug");
        assert!(serde_json::from_str::<Slug>("\"blue mug\"").is_err());
    }
}
