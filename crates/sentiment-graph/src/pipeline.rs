use crate::archive::PostArchive;
use crate::error::GraphError;
use crate::graph::{BuildStats, GraphBuilder, GraphExport};
use crate::post::ClassifiedPost;
use crate::sentiment::SentimentClassifier;
use crate::source::PostSource;
use anyhow::{Context, Result};
use tracing::info;

/// Everything produced for one topic.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub topic: String,
    pub posts: Vec<ClassifiedPost>,
    pub export: GraphExport,
    pub stats: BuildStats,
}

/// Fetch -> classify -> graph -> archive, for one topic at a time.
pub struct Analyzer<S, C> {
    source: S,
    classifier: C,
    archive: Option<PostArchive>,
}

impl<S: PostSource, C: SentimentClassifier> Analyzer<S, C> {
    pub fn new(source: S, classifier: C) -> Self {
        Self {
            source,
            classifier,
            archive: None,
        }
    }

    /// Archive every classified batch into `archive`.
    pub fn with_archive(mut self, archive: PostArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn archive(&self) -> Option<&PostArchive> {
        self.archive.as_ref()
    }

    /// Nothing is archived unless the graph was built.
    pub fn analyze(&mut self, topic: &str, limit: usize) -> Result<Analysis> {
        let mut builder = GraphBuilder::new(topic, &self.classifier)?;
        let topic = builder.topic().to_string();

        let posts = self
            .source
            .search(&topic, limit)
            .with_context(|| format!("Failed to fetch posts for '{}'", topic))?;

        let classified = posts
            .into_iter()
            .map(|post| {
                let sentiment = builder.classify(&post)?;
                Ok::<_, GraphError>(ClassifiedPost {
                    post,
                    sentiment,
                    search_topic: topic.clone(),
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        builder
            .build_classified(&classified)
            .with_context(|| format!("Failed to build graph for '{}'", topic))?;
        let export = builder.export();
        let stats = builder.stats();

        if let Some(archive) = self.archive.as_mut() {
            let added = archive.insert_all(&classified);
            archive
                .save()
                .with_context(|| format!("Failed to save archive {}", archive.path().display()))?;
            info!(topic = %topic, added, total = archive.len(), "archived posts");
        }

        info!(
            topic = %topic,
            posts = stats.posts,
            authors = stats.authors,
            hashtags = stats.hashtags,
            edges = stats.edges,
            "analysis complete"
        );

        Ok(Analysis {
            topic,
            posts: classified,
            export,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::post::fixtures::post;
    use crate::post::Post;
    use crate::sentiment::{FixedClassifier, Sentiment};
    use crate::source::FilePostSource;

    struct FailingSource;

    impl PostSource for FailingSource {
        fn search(&self, _topic: &str, _limit: usize) -> Result<Vec<Post>, SourceError> {
            Err(SourceError::UnsupportedFormat("offline".into()))
        }
    }

    fn source() -> FilePostSource {
        FilePostSource::from_posts(vec![
            post("1", "I love AI", "alice", &["ai"]),
            post("2", "AI is scary", "bob", &["ai"]),
            post("3", "AI meh", "alice", &[]),
        ])
    }

    #[test]
    fn test_analyze_classifies_and_archives() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PostArchive::open(dir.path().join("a.archive")).unwrap();
        let classifier = FixedClassifier::new()
            .with("I love AI", "positive")
            .with("AI is scary", "negative");

        let mut analyzer = Analyzer::new(source(), classifier).with_archive(archive);
        let analysis = analyzer.analyze("AI", 25).unwrap();

        assert_eq!(analysis.posts.len(), 3);
        assert_eq!(analysis.stats.hashtags, 1);
        let sentiments: Vec<_> = analysis.posts.iter().map(|c| c.sentiment).collect();
        assert!(sentiments.contains(&Sentiment::Positive));
        assert!(sentiments.contains(&Sentiment::Negative));
        assert_eq!(analyzer.archive().unwrap().len(), 3);
        assert_eq!(analyzer.archive().unwrap().by_topic("AI").count(), 3);
    }

    #[test]
    fn test_unknown_label_archives_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PostArchive::open(dir.path().join("a.archive")).unwrap();
        let classifier = FixedClassifier::new().with_default("sarcastic");

        let mut analyzer = Analyzer::new(source(), classifier).with_archive(archive);
        let err = analyzer.analyze("AI", 25).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::UnknownSentimentLabel { .. })
        ));
        assert!(analyzer.archive().unwrap().is_empty());
        assert!(!dir.path().join("a.archive").exists());
    }

    #[test]
    fn test_blank_topic() {
        let mut analyzer = Analyzer::new(source(), FixedClassifier::new());
        let err = analyzer.analyze("  ", 25).unwrap_err();
        assert_eq!(err.downcast_ref::<GraphError>(), Some(&GraphError::InvalidTopic));
    }

    #[test]
    fn test_source_failure_has_context() {
        let mut analyzer = Analyzer::new(FailingSource, FixedClassifier::new());
        let err = analyzer.analyze("AI", 25).unwrap_err();
        assert!(err.to_string().contains("Failed to fetch posts for 'AI'"));
    }
}
