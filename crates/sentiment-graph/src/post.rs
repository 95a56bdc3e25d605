use crate::error::{GraphError, Result};
use crate::sentiment::Sentiment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single social media post as handed over by a post source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub author_handle: String,
    pub author_display_name: String,
    #[serde(default)]
    pub author_follower_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub hashtags: BTreeSet<String>,
}

impl Post {
    /// Checks the fields node identities are derived from.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GraphError::MalformedPostRecord {
                post_id: self.id.clone(),
                field: "id",
            });
        }
        if self.author_handle.trim().is_empty() {
            return Err(GraphError::MalformedPostRecord {
                post_id: self.id.clone(),
                field: "author_handle",
            });
        }
        Ok(())
    }

    /// Display name, falling back to the handle when the source left it blank.
    pub fn author_name(&self) -> &str {
        if self.author_display_name.trim().is_empty() {
            &self.author_handle
        } else {
            &self.author_display_name
        }
    }
}

/// A post together with the bucket it was classified into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub post: Post,
    pub sentiment: Sentiment,
    pub search_topic: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn post(id: &str, text: &str, author: &str, hashtags: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            text: text.to_string(),
            author_handle: author.to_string(),
            author_display_name: format!("{} (display)", author),
            author_follower_count: 42,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            hashtags: hashtags.iter().map(|h| h.to_string()).collect(),
        }
    }
}
