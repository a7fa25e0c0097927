use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 取值不合法
    #[error("环境变量 {var_name} 取值不合法: {reason}")]
    InvalidValue { var_name: String, reason: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): code={code}, message={message:?}")]
    BadResponse {
        endpoint: String,
        code: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 评论 ID 解析错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 在评论列表和标题中都没有找到刚发布的评论
    #[error("找不到刚发布的评论 (媒体: {media_id})，可能会泄漏")]
    NotFound { media_id: String },
    /// 读取评论或媒体时失败
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建错误响应
    pub fn bad_response(endpoint: impl Into<String>, code: u16, message: Option<String>) -> Self {
        ApiError::BadResponse {
            endpoint: endpoint.into(),
            code,
            message,
        }
    }

    /// 创建JSON解析错误
    pub fn json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

impl ConfigError {
    pub fn not_found(var_name: &str) -> Self {
        ConfigError::EnvVarNotFound {
            var_name: var_name.to_string(),
        }
    }

    pub fn invalid(var_name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            var_name: var_name.to_string(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
