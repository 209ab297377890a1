use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkvaultError {
    AliasInUse(String),
    InvalidAlias(String),
    InvalidUrl(String),
    Persistence(String),
    CorruptState(String),
    FileOperation(String),
    Config(String),
}

impl LinkvaultError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkvaultError::AliasInUse(_) => "E001",
            LinkvaultError::InvalidAlias(_) => "E002",
            LinkvaultError::InvalidUrl(_) => "E003",
            LinkvaultError::Persistence(_) => "E004",
            LinkvaultError::CorruptState(_) => "E005",
            LinkvaultError::FileOperation(_) => "E006",
            LinkvaultError::Config(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkvaultError::AliasInUse(_) => "Alias In Use",
            LinkvaultError::InvalidAlias(_) => "Invalid Alias",
            LinkvaultError::InvalidUrl(_) => "Invalid URL",
            LinkvaultError::Persistence(_) => "Persistence Error",
            LinkvaultError::CorruptState(_) => "Corrupt State",
            LinkvaultError::FileOperation(_) => "File Operation Error",
            LinkvaultError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkvaultError::AliasInUse(msg) => msg,
            LinkvaultError::InvalidAlias(msg) => msg,
            LinkvaultError::InvalidUrl(msg) => msg,
            LinkvaultError::Persistence(msg) => msg,
            LinkvaultError::CorruptState(msg) => msg,
            LinkvaultError::FileOperation(msg) => msg,
            LinkvaultError::Config(msg) => msg,
        }
    }

    /// Whether the caller can fix the request and try again.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LinkvaultError::AliasInUse(_)
                | LinkvaultError::InvalidAlias(_)
                | LinkvaultError::InvalidUrl(_)
        )
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

impl fmt::Display for LinkvaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkvaultError {}

// 便捷的构造函数
impl LinkvaultError {
    pub fn alias_in_use<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::AliasInUse(msg.into())
    }

    pub fn invalid_alias<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::InvalidAlias(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::InvalidUrl(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::Persistence(msg.into())
    }

    pub fn corrupt_state<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::CorruptState(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkvaultError::Config(msg.into())
    }
}

impl From<std::io::Error> for LinkvaultError {
    fn from(err: std::io::Error) -> Self {
        LinkvaultError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for LinkvaultError {
    fn from(err: csv::Error) -> Self {
        LinkvaultError::CorruptState(err.to_string())
    }
}

impl From<crate::utils::url_validator::UrlValidationError> for LinkvaultError {
    fn from(err: crate::utils::url_validator::UrlValidationError) -> Self {
        LinkvaultError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkvaultError>;
