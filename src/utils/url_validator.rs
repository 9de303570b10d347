//! URL 验证模块
//!
//! 只接受能解析为绝对地址、且协议为 http/https 的 URL

use url::Url;

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证 URL
///
/// 检查项目：
/// 1. URL 不为空
/// 2. 能解析为绝对 URL
/// 3. 协议必须是 http 或 https
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(UrlValidationError::InvalidProtocol(format!("{}:", other))),
    }
}

/// 获取 URL 验证错误的用户友好消息
pub fn validation_error_message(error: &UrlValidationError) -> &'static str {
    match error {
        UrlValidationError::EmptyUrl => "URL is required",
        UrlValidationError::InvalidProtocol(_) | UrlValidationError::InvalidFormat(_) => {
            "Must be a valid http:// or https:// URL"
        }
    }
}
