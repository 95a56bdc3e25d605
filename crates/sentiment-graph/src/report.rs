use crate::post::ClassifiedPost;
use crate::sentiment::Sentiment;
use std::fmt;

const RULE_WIDTH: usize = 72;

/// Plain-text summary of a classified batch, one section per sentiment.
pub struct SentimentReport<'a> {
    pub topic: &'a str,
    pub posts: &'a [ClassifiedPost],
}

impl fmt::Display for SentimentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}\nSentiment Analysis for '{}'\n{rule}", self.topic)?;

        for sentiment in Sentiment::ALL {
            let bucket: Vec<&ClassifiedPost> =
                self.posts.iter().filter(|c| c.sentiment == sentiment).collect();
            writeln!(f, "\n{} Posts ({})", sentiment.label(), bucket.len())?;
            writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

            if bucket.is_empty() {
                writeln!(f, "No {} posts found.", sentiment.label().to_lowercase())?;
                continue;
            }
            for c in bucket {
                let text = c.post.text.split_whitespace().collect::<Vec<_>>().join(" ");
                writeln!(f, "{} (@{})\n    {}", c.post.author_name(), c.post.author_handle, text)?;
            }
        }
        Ok(())
    }
}

pub fn sentiment_report(topic: &str, posts: &[ClassifiedPost]) -> String {
    SentimentReport { topic, posts }.to_string()
}
