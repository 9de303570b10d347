use std::fmt;

use crate::services::ValidationErrors;

#[derive(Debug, Clone)]
pub enum PocketlinkError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    Validation(String),
    InvalidFields(ValidationErrors),
    NotFound(String),
    Expired(String),
    CodeSpaceExhausted(String),
    BatchTooLarge(String),
    DateParse(String),
    Logging(String),
}

impl PocketlinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PocketlinkError::Config(_) => "E001",
            PocketlinkError::FileOperation(_) => "E002",
            PocketlinkError::Serialization(_) => "E003",
            PocketlinkError::Validation(_) => "E004",
            PocketlinkError::InvalidFields(_) => "E005",
            PocketlinkError::NotFound(_) => "E006",
            PocketlinkError::Expired(_) => "E007",
            PocketlinkError::CodeSpaceExhausted(_) => "E008",
            PocketlinkError::BatchTooLarge(_) => "E009",
            PocketlinkError::DateParse(_) => "E010",
            PocketlinkError::Logging(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PocketlinkError::Config(_) => "Configuration Error",
            PocketlinkError::FileOperation(_) => "File Operation Error",
            PocketlinkError::Serialization(_) => "Serialization Error",
            PocketlinkError::Validation(_) => "Validation Error",
            PocketlinkError::InvalidFields(_) => "Invalid Input",
            PocketlinkError::NotFound(_) => "Resource Not Found",
            PocketlinkError::Expired(_) => "Link Expired",
            PocketlinkError::CodeSpaceExhausted(_) => "Shortcode Generation Failed",
            PocketlinkError::BatchTooLarge(_) => "Batch Too Large",
            PocketlinkError::DateParse(_) => "Date Parse Error",
            PocketlinkError::Logging(_) => "Logging Setup Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            PocketlinkError::InvalidFields(errors) => errors.to_string(),
            PocketlinkError::Config(msg)
            | PocketlinkError::FileOperation(msg)
            | PocketlinkError::Serialization(msg)
            | PocketlinkError::Validation(msg)
            | PocketlinkError::NotFound(msg)
            | PocketlinkError::Expired(msg)
            | PocketlinkError::CodeSpaceExhausted(msg)
            | PocketlinkError::BatchTooLarge(msg)
            | PocketlinkError::DateParse(msg)
            | PocketlinkError::Logging(msg) => msg.clone(),
        }
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PocketlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PocketlinkError {}

// 便捷的构造函数
impl PocketlinkError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Expired(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::CodeSpaceExhausted(msg.into())
    }

    pub fn batch_too_large<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::BatchTooLarge(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::DateParse(msg.into())
    }

    pub fn logging<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Logging(msg.into())
    }
}

impl From<ValidationErrors> for PocketlinkError {
    fn from(errors: ValidationErrors) -> Self {
        PocketlinkError::InvalidFields(errors)
    }
}

impl From<std::io::Error> for PocketlinkError {
    fn from(err: std::io::Error) -> Self {
        PocketlinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PocketlinkError {
    fn from(err: serde_json::Error) -> Self {
        PocketlinkError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PocketlinkError {
    fn from(err: chrono::ParseError) -> Self {
        PocketlinkError::DateParse(err.to_string())
    }
}

impl From<config::ConfigError> for PocketlinkError {
    fn from(err: config::ConfigError) -> Self {
        PocketlinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PocketlinkError>;
