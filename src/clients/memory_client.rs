//! 内存版 Instagram 客户端
//!
//! 不访问网络，记录每一次调用，并可以按需注入失败。主要用于测试。

use crate::clients::InstagramApi;
use crate::error::ApiError;
use crate::models::{Caption, Comment, Media};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// 一次 API 调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    RecentMedia { since: DateTime<Utc> },
    GetMedia { media_id: String },
    AddComment { media_id: String, text: String },
    ListComments { media_id: String },
    DeleteComment { media_id: String, comment_id: String },
}

#[derive(Default)]
struct State {
    media: Vec<Media>,
    comments: HashMap<String, Vec<Comment>>,
    calls: Vec<ApiCall>,
    next_comment_id: u64,
    failing_posts: HashSet<String>,
    fail_recent_media: bool,
    fail_get_media: bool,
    fail_deletes: bool,
    hide_comments: bool,
    caption_first_comment: bool,
}

/// 内存客户端
#[derive(Default)]
pub struct MemoryClient {
    state: Mutex<State>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 添加一个媒体
    pub fn add_media(&self, media: Media) {
        self.state().media.push(media);
    }

    /// 修改媒体点赞数
    pub fn set_likes(&self, media_id: &str, count: u64) {
        if let Some(media) = self.state().media.iter_mut().find(|m| m.id == media_id) {
            media.likes.count = count;
        }
    }

    /// 正文等于 `text` 的评论发布失败
    pub fn fail_posts_with_text(&self, text: impl Into<String>) {
        self.state().failing_posts.insert(text.into());
    }

    pub fn set_fail_recent_media(&self, fail: bool) {
        self.state().fail_recent_media = fail;
    }

    pub fn set_fail_get_media(&self, fail: bool) {
        self.state().fail_get_media = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.state().fail_deletes = fail;
    }

    /// 发布成功但评论列表里看不到（模拟读写不一致）
    pub fn set_hide_comments(&self, hide: bool) {
        self.state().hide_comments = hide;
    }

    /// 没有标题的媒体上第一条评论变成标题
    pub fn set_caption_first_comment(&self, enabled: bool) {
        self.state().caption_first_comment = enabled;
    }

    /// 所有调用记录（按发生顺序）
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    /// 某个媒体上的发布次数
    pub fn post_count(&self, media_id: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| matches!(call, ApiCall::AddComment { media_id: id, .. } if id == media_id))
            .count()
    }

    /// 某个媒体上当前存在的评论
    pub fn comments(&self, media_id: &str) -> Vec<Comment> {
        self.state()
            .comments
            .get(media_id)
            .cloned()
            .unwrap_or_default()
    }

    /// 某个媒体当前的标题
    pub fn caption(&self, media_id: &str) -> Option<Caption> {
        self.state()
            .media
            .iter()
            .find(|m| m.id == media_id)
            .and_then(|m| m.caption.clone())
    }
}

fn not_found(endpoint: String) -> ApiError {
    ApiError::bad_response(endpoint, 400, Some("APINotFoundError".to_string()))
}

fn injected(endpoint: String) -> ApiError {
    ApiError::bad_response(endpoint, 500, Some("injected failure".to_string()))
}

#[async_trait]
impl InstagramApi for MemoryClient {
    async fn recent_media(&self, since: DateTime<Utc>) -> Result<Vec<Media>, ApiError> {
        let mut state = self.state();
        state.calls.push(ApiCall::RecentMedia { since });

        if state.fail_recent_media {
            return Err(injected("users/self/media/recent".to_string()));
        }

        Ok(state
            .media
            .iter()
            .filter(|m| m.created_time > since)
            .cloned()
            .collect())
    }

    async fn get_media(&self, media_id: &str) -> Result<Media, ApiError> {
        let mut state = self.state();
        state.calls.push(ApiCall::GetMedia {
            media_id: media_id.to_string(),
        });

        let endpoint = format!("media/{}", media_id);
        if state.fail_get_media {
            return Err(injected(endpoint));
        }

        state
            .media
            .iter()
            .find(|m| m.id == media_id)
            .cloned()
            .ok_or_else(|| not_found(endpoint))
    }

    async fn add_comment(&self, media_id: &str, text: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        state.calls.push(ApiCall::AddComment {
            media_id: media_id.to_string(),
            text: text.to_string(),
        });

        let endpoint = format!("media/{}/comments", media_id);
        if state.failing_posts.contains(text) {
            return Err(injected(endpoint));
        }

        state.next_comment_id += 1;
        let comment = Comment::new(format!("c{}", state.next_comment_id), text);

        let caption_first_comment = state.caption_first_comment;
        let already_commented = state.comments.get(media_id).is_some_and(|c| !c.is_empty());
        let media = state
            .media
            .iter_mut()
            .find(|m| m.id == media_id)
            .ok_or_else(|| not_found(endpoint))?;

        if caption_first_comment && media.caption.is_none() && !already_commented {
            media.caption = Some(Caption {
                id: comment.id,
                text: comment.text,
            });
            return Ok(());
        }

        state
            .comments
            .entry(media_id.to_string())
            .or_default()
            .push(comment);
        Ok(())
    }

    async fn list_comments(&self, media_id: &str) -> Result<Vec<Comment>, ApiError> {
        let mut state = self.state();
        state.calls.push(ApiCall::ListComments {
            media_id: media_id.to_string(),
        });

        if state.hide_comments {
            return Ok(Vec::new());
        }
        Ok(state.comments.get(media_id).cloned().unwrap_or_default())
    }

    async fn delete_comment(&self, media_id: &str, comment_id: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        state.calls.push(ApiCall::DeleteComment {
            media_id: media_id.to_string(),
            comment_id: comment_id.to_string(),
        });

        let endpoint = format!("media/{}/comments/{}", media_id, comment_id);
        if state.fail_deletes {
            return Err(injected(endpoint));
        }

        if let Some(comments) = state.comments.get_mut(media_id) {
            if let Some(pos) = comments.iter().position(|c| c.id == comment_id) {
                comments.remove(pos);
                return Ok(());
            }
        }

        let media = state.media.iter_mut().find(|m| m.id == media_id);
        match media {
            Some(media) if media.caption.as_ref().is_some_and(|c| c.id == comment_id) => {
                media.caption = None;
                Ok(())
            }
            _ => Err(not_found(endpoint)),
        }
    }
}
