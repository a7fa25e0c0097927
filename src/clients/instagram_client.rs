/// Instagram API 客户端
///
/// 封装所有与 Instagram REST API 相关的调用逻辑
use crate::clients::InstagramApi;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Comment, Media};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 响应外壳：`{ "meta": {...}, "data": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    meta: Meta,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    code: u16,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl Meta {
    fn describe(&self) -> Option<String> {
        match (&self.error_type, &self.error_message) {
            (Some(kind), Some(message)) => Some(format!("{}: {}", kind, message)),
            (Some(kind), None) => Some(kind.clone()),
            (None, Some(message)) => Some(message.clone()),
            (None, None) => None,
        }
    }
}

/// Instagram 客户端
pub struct InstagramClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl InstagramClient {
    /// 创建新的 Instagram 客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::request_failed("client", e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// 发送请求并拆开响应外壳
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = request
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        debug!("API {} 返回 HTTP {}", endpoint, status.as_u16());

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ApiError::bad_response(
                    endpoint,
                    status.as_u16(),
                    Some(body),
                ));
            }
            Err(e) => return Err(ApiError::json_parse_failed(endpoint, e)),
        };

        if !status.is_success() || envelope.meta.code != 200 {
            return Err(ApiError::bad_response(
                endpoint,
                envelope.meta.code,
                envelope.meta.describe(),
            ));
        }

        Ok(envelope.data)
    }

    async fn send_for_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(endpoint, request).await?.ok_or_else(|| {
            ApiError::bad_response(endpoint, 200, Some("响应缺少 data 字段".to_string()))
        })
    }
}

#[async_trait]
impl InstagramApi for InstagramClient {
    async fn recent_media(&self, since: DateTime<Utc>) -> Result<Vec<Media>, ApiError> {
        let endpoint = "users/self/media/recent";
        // 平台按整秒过滤且包含边界，往前退一秒避免漏掉同一秒发布的媒体
        let min_timestamp = since.timestamp() - 1;
        let request = self
            .http
            .get(self.url(endpoint))
            .query(&[("min_timestamp", min_timestamp)]);

        let media: Vec<Media> = self.send_for_data(endpoint, request).await?;
        let total = media.len();
        // 多取的那一秒在上一次 tick 已经处理过，这里按水位线严格过滤
        let fresh: Vec<Media> = media
            .into_iter()
            .filter(|m| m.created_time > since)
            .collect();
        if fresh.len() < total {
            debug!("过滤掉 {} 个水位线之前的媒体", total - fresh.len());
        }

        Ok(fresh)
    }

    async fn get_media(&self, media_id: &str) -> Result<Media, ApiError> {
        let endpoint = format!("media/{}", media_id);
        let request = self.http.get(self.url(&endpoint));

        self.send_for_data(&endpoint, request).await
    }

    async fn add_comment(&self, media_id: &str, text: &str) -> Result<(), ApiError> {
        let endpoint = format!("media/{}/comments", media_id);
        let request = self.http.post(self.url(&endpoint)).form(&[("text", text)]);

        self.send::<IgnoredAny>(&endpoint, request).await?;
        Ok(())
    }

    async fn list_comments(&self, media_id: &str) -> Result<Vec<Comment>, ApiError> {
        let endpoint = format!("media/{}/comments", media_id);
        let request = self.http.get(self.url(&endpoint));

        self.send_for_data(&endpoint, request).await
    }

    async fn delete_comment(&self, media_id: &str, comment_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("media/{}/comments/{}", media_id, comment_id);
        let request = self.http.delete(self.url(&endpoint));

        self.send::<IgnoredAny>(&endpoint, request).await?;
        Ok(())
    }
}
