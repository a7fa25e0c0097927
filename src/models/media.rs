use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 媒体（帖子）
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: String,
    #[serde(deserialize_with = "deserialize_unix_time")]
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub likes: Likes,
    /// 标题，平台有时会把新媒体的第一条评论当作标题返回
    #[serde(default)]
    pub caption: Option<Caption>,
    /// 媒体页面链接，只用于日志
    #[serde(default)]
    pub link: Option<String>,
}

impl Media {
    pub fn new(id: impl Into<String>, created_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_time,
            likes: Likes::default(),
            caption: None,
            link: None,
        }
    }

    pub fn with_caption(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.caption = Some(Caption {
            id: id.into(),
            text: text.into(),
        });
        self
    }

    pub fn with_likes(mut self, count: u64) -> Self {
        self.likes.count = count;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Likes {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Caption {
    pub id: String,
    pub text: String,
}

/// 评论（只保留 ID 和文本）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

impl Comment {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

// 平台返回的 created_time 是字符串形式的 unix 秒，偶尔是整数
fn deserialize_unix_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct UnixTimeVisitor;

    impl<'de> Visitor<'de> for UnixTimeVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer unix timestamp")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let secs: i64 = value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid unix timestamp: {}", value)))?;
            self.visit_i64(secs)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            DateTime::from_timestamp(value, 0)
                .ok_or_else(|| E::custom(format!("unix timestamp out of range: {}", value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let secs = i64::try_from(value)
                .map_err(|_| E::custom(format!("unix timestamp out of range: {}", value)))?;
            self.visit_i64(secs)
        }
    }

    deserializer.deserialize_any(UnixTimeVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_media_with_caption() {
        let json = r#"{
            "id": "22699663_1",
            "created_time": "1296710327",
            "likes": {"count": 15},
            "caption": {"id": "26621408", "text": "Snow!", "created_time": "1296710352"},
            "link": "http://instagr.am/p/BWrVZ/",
            "type": "image"
        }"#;

        let media: Media = serde_json::from_str(json).unwrap();
        assert_eq!(media.id, "22699663_1");
        assert_eq!(media.created_time.timestamp(), 1296710327);
        assert_eq!(media.likes.count, 15);
        assert_eq!(media.link.as_deref(), Some("http://instagr.am/p/BWrVZ/"));
        assert_eq!(
            media.caption,
            Some(Caption {
                id: "26621408".to_string(),
                text: "Snow!".to_string(),
            })
        );
    }

    #[test]
    fn test_deserialize_media_without_caption() {
        let json = r#"{"id": "1", "created_time": 1296710327, "caption": null}"#;

        let media: Media = serde_json::from_str(json).unwrap();
        assert!(media.caption.is_none());
        assert!(media.link.is_none());
        assert_eq!(media.likes.count, 0);
    }

    #[test]
    fn test_deserialize_bad_timestamp() {
        let json = r#"{"id": "1", "created_time": "yesterday"}"#;
        assert!(serde_json::from_str::<Media>(json).is_err());
    }
}
