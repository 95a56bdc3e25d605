//! Topic sentiment graphs: fetch posts about a topic, sort them into
//! Positive / Negative / Neutral buckets and link them into a graph of
//! topic, sentiment, post, author and shared-hashtag nodes.

pub mod archive;
pub mod config;
pub mod console;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod post;
pub mod render;
pub mod report;
pub mod sentiment;
pub mod source;

pub use error::{GraphError, Result};
pub use graph::{GraphBuilder, GraphExport, KnowledgeGraph};
pub use post::{ClassifiedPost, Post};
pub use sentiment::{FixedClassifier, LexiconClassifier, Sentiment, SentimentClassifier};
