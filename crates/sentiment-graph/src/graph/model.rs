//! Typed node kinds.
//!
//! Each kind owns exactly the data it renders from; visual attributes are
//! derived, so renderers match on [`Node`] instead of probing for keys.

use crate::sentiment::Sentiment;
use serde::{Deserialize, Serialize};

pub const TOPIC_COLOR: &str = "#FF5733";
pub const AUTHOR_COLOR: &str = "#1DA1F2";
pub const HASHTAG_COLOR: &str = "#794BC4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Star,
    Diamond,
    Square,
    Dot,
    Triangle,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Star => "star",
            Shape::Diamond => "diamond",
            Shape::Square => "square",
            Shape::Dot => "dot",
            Shape::Triangle => "triangle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Topic,
    Sentiment,
    Post,
    Author,
    Hashtag,
}

/// The central node every graph is rooted at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentNode {
    pub sentiment: Sentiment,
}

/// One post. `color` is copied from the sentiment parent when the node is
/// inserted and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostNode {
    pub post_id: String,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorNode {
    pub handle: String,
    pub display_name: String,
    pub follower_count: u64,
}

/// A tag shared by at least two posts. `tag` is already lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagNode {
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Topic(TopicNode),
    Sentiment(SentimentNode),
    Post(PostNode),
    Author(AuthorNode),
    Hashtag(HashtagNode),
}

pub const POST_ID_PREFIX: &str = "post_";
pub const AUTHOR_ID_PREFIX: &str = "user_";
pub const HASHTAG_ID_PREFIX: &str = "hashtag_";

/// Prefixes of every derived node id. The topic id must not start with one.
pub const DERIVED_ID_PREFIXES: [&str; 3] = [POST_ID_PREFIX, AUTHOR_ID_PREFIX, HASHTAG_ID_PREFIX];

pub fn post_node_id(post_id: &str) -> String {
    format!("{}{}", POST_ID_PREFIX, post_id)
}

pub fn author_node_id(handle: &str) -> String {
    format!("{}{}", AUTHOR_ID_PREFIX, handle)
}

pub fn hashtag_node_id(tag: &str) -> String {
    format!("{}{}", HASHTAG_ID_PREFIX, tag)
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Topic(_) => NodeKind::Topic,
            Node::Sentiment(_) => NodeKind::Sentiment,
            Node::Post(_) => NodeKind::Post,
            Node::Author(_) => NodeKind::Author,
            Node::Hashtag(_) => NodeKind::Hashtag,
        }
    }

    /// Graph-unique identifier.
    pub fn id(&self) -> String {
        match self {
            Node::Topic(n) => n.topic.clone(),
            Node::Sentiment(n) => n.sentiment.label().to_string(),
            Node::Post(n) => post_node_id(&n.post_id),
            Node::Author(n) => author_node_id(&n.handle),
            Node::Hashtag(n) => hashtag_node_id(&n.tag),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Node::Topic(n) => n.topic.clone(),
            Node::Sentiment(n) => n.sentiment.label().to_string(),
            Node::Post(_) => "Post".to_string(),
            Node::Author(n) => n.display_name.clone(),
            Node::Hashtag(n) => format!("#{}", n.tag),
        }
    }

    /// Hover text.
    pub fn title(&self) -> String {
        match self {
            Node::Topic(n) => format!("Central Topic: {}", n.topic),
            Node::Sentiment(n) => format!("Sentiment: {}", n.sentiment.label()),
            Node::Post(n) => n.text.clone(),
            Node::Author(n) => format!("@{}\nFollowers: {}", n.handle, n.follower_count),
            Node::Hashtag(n) => format!("Shared Theme: #{}", n.tag),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Topic(_) => Shape::Star,
            Node::Sentiment(_) => Shape::Diamond,
            Node::Post(_) => Shape::Square,
            Node::Author(_) => Shape::Dot,
            Node::Hashtag(_) => Shape::Triangle,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Node::Topic(_) => TOPIC_COLOR,
            Node::Sentiment(n) => n.sentiment.color(),
            Node::Post(n) => &n.color,
            Node::Author(_) => AUTHOR_COLOR,
            Node::Hashtag(_) => HASHTAG_COLOR,
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            Node::Topic(_) => 35,
            Node::Sentiment(_) => 25,
            Node::Author(_) => 20,
            Node::Post(_) => 15,
            Node::Hashtag(_) => 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_are_prefixed_by_kind() {
        let post = Node::Post(PostNode {
            post_id: "17".into(),
            text: "hi".into(),
            color: "#000".into(),
        });
        let author = Node::Author(AuthorNode {
            handle: "alice".into(),
            display_name: "Alice".into(),
            follower_count: 3,
        });
        let tag = Node::Hashtag(HashtagNode { tag: "ai".into() });

        assert_eq!(post.id(), "post_17");
        assert_eq!(author.id(), "user_alice");
        assert_eq!(tag.id(), "hashtag_ai");
    }

    #[test]
    fn test_visual_attributes() {
        let topic = Node::Topic(TopicNode { topic: "AI ethics".into() });
        assert_eq!(topic.id(), "AI ethics");
        assert_eq!(topic.title(), "Central Topic: AI ethics");
        assert_eq!(topic.shape(), Shape::Star);
        assert!(topic.size() > Node::Sentiment(SentimentNode { sentiment: Sentiment::Neutral }).size());

        let author = Node::Author(AuthorNode {
            handle: "alice".into(),
            display_name: "Alice".into(),
            follower_count: 1200,
        });
        assert_eq!(author.label(), "Alice");
        assert_eq!(author.title(), "@alice\nFollowers: 1200");
        assert_eq!(author.color(), AUTHOR_COLOR);

        let tag = Node::Hashtag(HashtagNode { tag: "ai".into() });
        assert_eq!(tag.label(), "#ai");
        assert_eq!(tag.title(), "Shared Theme: #ai");
        assert_eq!(tag.shape().as_str(), "triangle");
    }

    #[test]
    fn test_serde_tags_kind() {
        let node = Node::Sentiment(SentimentNode { sentiment: Sentiment::Negative });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "sentiment");
        assert_eq!(json["sentiment"], "Negative");
    }
}
