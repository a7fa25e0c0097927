use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ENV_HASHTAGS: &str = "HASHTAGS";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// API 访问令牌
    pub access_token: String,
    /// 标签列表（按配置顺序）
    pub hashtags: Vec<String>,
    /// 评论可见时长，到期后删除
    pub comment_interval: Duration,
    /// 新媒体轮询间隔
    pub poll_interval: Duration,
    /// 每条评论包含的标签数
    pub hashtag_batch_size: usize,
    /// 发布评论后等待多久再读取评论列表
    pub resolve_grace: Duration,
    // --- API 配置 ---
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            hashtags: Vec::new(),
            comment_interval: Duration::from_secs(5 * 60),
            poll_interval: Duration::from_secs(20),
            hashtag_batch_size: 4,
            resolve_grace: Duration::from_secs(3),
            api_base_url: "https://api.instagram.com/v1".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置（便于测试）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let access_token = required(&lookup, ENV_ACCESS_TOKEN)?;
        let hashtags = parse_hashtags(&required(&lookup, ENV_HASHTAGS)?);
        if hashtags.is_empty() {
            return Err(ConfigError::invalid(ENV_HASHTAGS, "至少需要一个标签"));
        }

        let hashtag_batch_size =
            parsed(&lookup, "HASHTAG_BATCH_SIZE", "usize")?.unwrap_or(default.hashtag_batch_size);
        if hashtag_batch_size == 0 {
            return Err(ConfigError::invalid("HASHTAG_BATCH_SIZE", "必须大于 0"));
        }

        Ok(Self {
            access_token,
            hashtags,
            comment_interval: parsed(&lookup, "COMMENT_INTERVAL_SECS", "u64")?
                .map(Duration::from_secs)
                .unwrap_or(default.comment_interval),
            poll_interval: parsed(&lookup, "POLL_INTERVAL_SECS", "u64")?
                .map(Duration::from_secs)
                .unwrap_or(default.poll_interval),
            hashtag_batch_size,
            resolve_grace: parsed(&lookup, "RESOLVE_GRACE_SECS", "u64")?
                .map(Duration::from_secs)
                .unwrap_or(default.resolve_grace),
            api_base_url: lookup("INSTAGRAM_API_BASE_URL").unwrap_or(default.api_base_url),
        })
    }
}

/// 逗号分隔，去掉空白和空项
pub fn parse_hashtags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn required<F>(lookup: &F, var_name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::not_found(var_name)),
    }
}

fn parsed<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}
