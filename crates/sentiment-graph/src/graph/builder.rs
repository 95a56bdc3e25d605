//! Topic -> Sentiment -> Post -> Author hierarchy, with posts that share a
//! hashtag bridged through a hashtag node.
//!
//! ```text
//!             Topic
//!        /      |      \
//!   Positive Negative Neutral
//!       |       |
//!     post_1  post_2 ---- user_bob
//!       |   \  /
//!  user_alice hashtag_ai
//! ```

use super::export::GraphExport;
use super::model::{
    author_node_id, hashtag_node_id, post_node_id, AuthorNode, HashtagNode, Node, NodeKind,
    PostNode, SentimentNode, TopicNode, DERIVED_ID_PREFIXES,
};
use super::KnowledgeGraph;
use crate::error::{GraphError, Result};
use crate::post::{ClassifiedPost, Post};
use crate::sentiment::{Sentiment, SentimentClassifier};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A hashtag needs this many distinct posts before it gets a node.
pub const MIN_SHARED_POSTS: usize = 2;

/// Node and edge counts of a built graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub topics: usize,
    pub sentiments: usize,
    pub posts: usize,
    pub authors: usize,
    pub hashtags: usize,
    pub edges: usize,
}

impl BuildStats {
    pub fn of(graph: &KnowledgeGraph) -> Self {
        let count = |kind| graph.nodes_of_kind(kind).count();
        Self {
            topics: count(NodeKind::Topic),
            sentiments: count(NodeKind::Sentiment),
            posts: count(NodeKind::Post),
            authors: count(NodeKind::Author),
            hashtags: count(NodeKind::Hashtag),
            edges: graph.edge_count(),
        }
    }
}

/// Owns one graph for one topic and rebuilds it from scratch on every
/// [`build`](GraphBuilder::build).
///
/// A build assembles a fresh graph and only replaces the current one once
/// it succeeded, so a failed build leaves the previous graph untouched.
pub struct GraphBuilder<C> {
    topic: String,
    classifier: C,
    graph: KnowledgeGraph,
}

impl<C: SentimentClassifier> GraphBuilder<C> {
    /// Fails with [`GraphError::InvalidTopic`] when the topic is blank or
    /// would collide with a sentiment, post, author or hashtag identifier.
    pub fn new(topic: impl Into<String>, classifier: C) -> Result<Self> {
        let topic = topic.into().trim().to_string();
        if !is_valid_topic(&topic) {
            return Err(GraphError::InvalidTopic);
        }
        Ok(Self {
            topic,
            classifier,
            graph: KnowledgeGraph::new(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Runs the classifier on a post and checks the label it returned.
    pub fn classify(&self, post: &Post) -> Result<Sentiment> {
        let label = self.classifier.classify(&post.text);
        label
            .parse()
            .map_err(|_| GraphError::UnknownSentimentLabel {
                post_id: post.id.clone(),
                label,
            })
    }

    /// Classifies every post and rebuilds the graph.
    pub fn build(&mut self, posts: &[Post]) -> Result<&KnowledgeGraph> {
        let classified = posts.iter().map(|post| {
            post.validate()?;
            Ok::<_, GraphError>((post, self.classify(post)?))
        });
        let graph = assemble(&self.topic, classified)?;
        Ok(self.replace(graph))
    }

    /// Rebuilds the graph from posts that were classified upstream.
    pub fn build_classified(&mut self, posts: &[ClassifiedPost]) -> Result<&KnowledgeGraph> {
        let classified = posts.iter().map(|c| {
            c.post.validate()?;
            Ok::<_, GraphError>((&c.post, c.sentiment))
        });
        let graph = assemble(&self.topic, classified)?;
        Ok(self.replace(graph))
    }

    /// Snapshot of the current graph for a renderer.
    pub fn export(&self) -> GraphExport {
        GraphExport::from(&self.graph)
    }

    pub fn stats(&self) -> BuildStats {
        BuildStats::of(&self.graph)
    }

    fn replace(&mut self, graph: KnowledgeGraph) -> &KnowledgeGraph {
        self.graph = graph;
        let stats = BuildStats::of(&self.graph);
        debug!(
            topic = %self.topic,
            posts = stats.posts,
            authors = stats.authors,
            hashtags = stats.hashtags,
            edges = stats.edges,
            "graph rebuilt"
        );
        &self.graph
    }
}

/// The topic node id is the topic itself, so it must not shadow any other id.
fn is_valid_topic(topic: &str) -> bool {
    !topic.is_empty()
        && !Sentiment::ALL.iter().any(|s| s.label() == topic)
        && !DERIVED_ID_PREFIXES.iter().any(|prefix| topic.starts_with(prefix))
}

/// Post-node ids per lowercased hashtag, in first-seen order.
#[derive(Default)]
struct HashtagIndex {
    order: Vec<(String, Vec<String>)>,
    slots: HashMap<String, usize>,
}

impl HashtagIndex {
    fn record(&mut self, tag: &str, post_node: &str) {
        let tag = tag.trim().trim_start_matches('#').to_lowercase();
        if tag.is_empty() {
            return;
        }
        let slot = match self.slots.get(&tag) {
            Some(&slot) => slot,
            None => {
                self.order.push((tag.clone(), Vec::new()));
                self.slots.insert(tag, self.order.len() - 1);
                self.order.len() - 1
            }
        };
        let posts = &mut self.order[slot].1;
        if !posts.iter().any(|p| p == post_node) {
            posts.push(post_node.to_string());
        }
    }

    fn shared(self) -> impl Iterator<Item = (String, Vec<String>)> {
        self.order
            .into_iter()
            .filter(|(_, posts)| posts.len() >= MIN_SHARED_POSTS)
    }
}

fn assemble<'p, I>(topic: &str, posts: I) -> Result<KnowledgeGraph>
where
    I: IntoIterator<Item = Result<(&'p Post, Sentiment)>>,
{
    let mut graph = KnowledgeGraph::new();

    graph.add_node(Node::Topic(TopicNode {
        topic: topic.to_string(),
    }));
    for sentiment in Sentiment::ALL {
        graph.add_node(Node::Sentiment(SentimentNode { sentiment }));
        graph.add_edge(topic, sentiment.label());
    }

    let mut hashtags = HashtagIndex::default();

    for entry in posts {
        let (post, sentiment) = entry?;
        let post_id = post_node_id(&post.id);
        let color = graph
            .node(sentiment.label())
            .map_or(sentiment.color(), |parent| parent.color())
            .to_string();

        graph.add_node(Node::Post(PostNode {
            post_id: post.id.clone(),
            text: post.text.clone(),
            color,
        }));
        graph.add_edge(sentiment.label(), &post_id);

        let user_id = author_node_id(&post.author_handle);
        if !graph.contains(&user_id) {
            graph.add_node(Node::Author(AuthorNode {
                handle: post.author_handle.clone(),
                display_name: post.author_name().to_string(),
                follower_count: post.author_follower_count,
            }));
        }
        graph.add_edge(&post_id, &user_id);

        for tag in &post.hashtags {
            hashtags.record(tag, &post_id);
        }
    }

    for (tag, post_ids) in hashtags.shared() {
        let hashtag_id = hashtag_node_id(&tag);
        graph.add_node(Node::Hashtag(HashtagNode { tag }));
        for post_id in &post_ids {
            graph.add_edge(post_id, &hashtag_id);
        }
    }

    Ok(graph)
}
