//! Post sources. A source hands back clean, validated post records; how it
//! obtained them (API session, export file) is its own business.

use crate::error::SourceError;
use crate::post::Post;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern"));

/// Lowercased hashtags mentioned in the text, without the leading `#`.
pub fn extract_hashtags(text: &str) -> BTreeSet<String> {
    HASHTAG_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_lowercase()))
        .collect()
}

pub trait PostSource {
    /// Latest posts about `topic`, newest first, at most `limit` of them.
    fn search(&self, topic: &str, limit: usize) -> Result<Vec<Post>, SourceError>;
}

/// Serves searches out of a dataset loaded from disk.
///
/// Supported formats: a JSON array or JSON lines (`.json`, `.jsonl`,
/// `.ndjson`) of post records, or CSV with the columns
/// `id,text,author_handle,author_display_name,author_follower_count,created_at,hashtags`
/// where `hashtags` is space separated.
#[derive(Debug, Clone, Default)]
pub struct FilePostSource {
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    text: String,
    author_handle: String,
    #[serde(default)]
    author_display_name: String,
    #[serde(default)]
    author_follower_count: Option<u64>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    hashtags: Option<String>,
}

impl From<CsvRow> for Post {
    fn from(row: CsvRow) -> Self {
        Post {
            id: row.id,
            text: row.text,
            author_handle: row.author_handle,
            author_display_name: row.author_display_name,
            author_follower_count: row.author_follower_count.unwrap_or(0),
            created_at: row.created_at,
            hashtags: row
                .hashtags
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl FilePostSource {
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into_iter().map(normalize).collect(),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let posts = match extension {
            "json" => parse_json(&content)?,
            "jsonl" | "ndjson" => parse_json_lines(&content)?,
            "csv" => parse_csv(&content)?,
            other => return Err(SourceError::UnsupportedFormat(other.to_string())),
        };

        info!(path = %path.display(), posts = posts.len(), "loaded post dataset");
        Ok(Self::from_posts(posts))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl PostSource for FilePostSource {
    fn search(&self, topic: &str, limit: usize) -> Result<Vec<Post>, SourceError> {
        let terms: Vec<String> = topic
            .split_whitespace()
            .map(|t| t.trim_start_matches('#').to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut hits: Vec<&Post> = self
            .posts
            .iter()
            .filter(|post| {
                let text = post.text.to_lowercase();
                !terms.is_empty()
                    && terms
                        .iter()
                        .all(|term| text.contains(term.as_str()) || post.hashtags.contains(term))
            })
            .collect();

        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        hits.truncate(limit);
        debug!(topic, hits = hits.len(), "searched post dataset");

        Ok(hits.into_iter().cloned().collect())
    }
}

fn normalize(mut post: Post) -> Post {
    if post.hashtags.is_empty() {
        post.hashtags = extract_hashtags(&post.text);
    } else {
        post.hashtags = post
            .hashtags
            .iter()
            .map(|h| h.trim().trim_start_matches('#').to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
    }
    post
}

fn parse_json(content: &str) -> Result<Vec<Post>, SourceError> {
    if content.trim_start().starts_with('[') {
        Ok(serde_json::from_str(content)?)
    } else {
        parse_json_lines(content)
    }
}

fn parse_json_lines(content: &str) -> Result<Vec<Post>, SourceError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| SourceError::Record {
                line: i + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn parse_csv(content: &str) -> Result<Vec<Post>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(content.as_bytes());

    let mut posts = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        posts.push(row?.into());
    }
    Ok(posts)
}
