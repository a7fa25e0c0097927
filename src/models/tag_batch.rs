//! 标签分批
//!
//! 把标签列表切成固定大小的组，每组作为一条评论发布

use std::fmt;

/// 一批标签（非空）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBatch {
    tags: Vec<String>,
}

impl TagBatch {
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// 评论正文：标签用空格连接
    pub fn text(&self) -> String {
        self.tags.join(" ")
    }
}

impl fmt::Display for TagBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.tags.join(" "))
    }
}

/// 将标签按 `batch_size` 分组
///
/// 返回 ceil(N / batch_size) 组，除最后一组外每组恰好 `batch_size` 个。
/// 空输入或 `batch_size == 0` 返回空列表。
pub fn partition<S: AsRef<str>>(tags: &[S], batch_size: usize) -> Vec<TagBatch> {
    if batch_size == 0 {
        return Vec::new();
    }

    tags.chunks(batch_size)
        .map(|chunk| TagBatch {
            tags: chunk.iter().map(|t| t.as_ref().to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_vecs(batches: &[TagBatch]) -> Vec<Vec<&str>> {
        batches
            .iter()
            .map(|b| b.tags().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_partition_seven_by_four() {
        let batches = partition(&["a", "b", "c", "d", "e", "f", "g"], 4);
        assert_eq!(
            as_vecs(&batches),
            vec![vec!["a", "b", "c", "d"], vec!["e", "f", "g"]]
        );
    }

    #[test]
    fn test_partition_empty() {
        let tags: Vec<String> = Vec::new();
        assert!(partition(&tags, 4).is_empty());
    }

    #[test]
    fn test_partition_zero_batch_size() {
        assert!(partition(&["a"], 0).is_empty());
    }

    #[test]
    fn test_partition_properties() {
        let tags: Vec<String> = (0..23).map(|i| format!("#t{}", i)).collect();

        for batch_size in 1..=25 {
            let batches = partition(&tags, batch_size);

            assert_eq!(batches.len(), (tags.len() + batch_size - 1) / batch_size);
            assert!(batches.iter().all(|b| !b.is_empty()));

            let (last, rest) = batches.split_last().unwrap();
            assert!(rest.iter().all(|b| b.len() == batch_size));
            assert!(last.len() <= batch_size);

            let flattened: Vec<String> = batches.iter().flat_map(|b| b.tags().to_vec()).collect();
            assert_eq!(flattened, tags);
        }
    }

    #[test]
    fn test_batch_text() {
        let batches = partition(&["#sun", "#sea", "#sand"], 2);
        assert_eq!(batches[0].text(), "#sun #sea");
        assert_eq!(batches[1].text(), "#sand");
        assert_eq!(batches[1].to_string(), "[#sand]");
    }
}
