use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_LIMIT: usize = 25;
pub const MIN_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// Runtime settings, read from `SENTIGRAPH_*` environment variables and
/// then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub posts_path: PathBuf,
    pub archive_path: PathBuf,
    pub output_path: PathBuf,
    /// Posts fetched per topic, always within `MIN_LIMIT..=MAX_LIMIT`.
    pub limit: usize,
    /// Run once for this topic instead of prompting.
    pub topic: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_path: PathBuf::from("data/posts.json"),
            archive_path: PathBuf::from("data/posts.archive"),
            output_path: PathBuf::from("graph_output.html"),
            limit: DEFAULT_LIMIT,
            topic: None,
        }
    }
}

fn parse_limit(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    let n: usize = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })?;
    if n == 0 {
        return Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        });
    }
    Ok(n.clamp(MIN_LIMIT, MAX_LIMIT))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = lookup("SENTIGRAPH_POSTS") {
            config.posts_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SENTIGRAPH_ARCHIVE") {
            config.archive_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SENTIGRAPH_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }
        if let Some(limit) = lookup("SENTIGRAPH_LIMIT") {
            config.limit = parse_limit("SENTIGRAPH_LIMIT", &limit)?;
        }
        Ok(config)
    }

    /// Applies `--posts PATH`, `--archive PATH`, `--output PATH`,
    /// `--limit N` and an optional trailing topic. Remaining positional
    /// words are joined into the topic.
    pub fn apply_args<I, S>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut topic_words = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--posts" => {
                    self.posts_path = args.next().ok_or(ConfigError::MissingValue("--posts"))?.into()
                }
                "--archive" => {
                    self.archive_path = args.next().ok_or(ConfigError::MissingValue("--archive"))?.into()
                }
                "--output" => {
                    self.output_path = args.next().ok_or(ConfigError::MissingValue("--output"))?.into()
                }
                "--limit" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--limit"))?;
                    self.limit = parse_limit("--limit", &value)?;
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument(flag.to_string()))
                }
                _ => topic_words.push(arg),
            }
        }

        if !topic_words.is_empty() {
            self.topic = Some(topic_words.join(" "));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limit, 25);
    }

    #[test]
    fn test_env_overrides_and_clamps() {
        let config = Config::from_lookup(lookup(&[
            ("SENTIGRAPH_POSTS", "/tmp/p.csv"),
            ("SENTIGRAPH_LIMIT", "500"),
        ]))
        .unwrap();
        assert_eq!(config.posts_path, PathBuf::from("/tmp/p.csv"));
        assert_eq!(config.limit, MAX_LIMIT);

        let low = Config::from_lookup(lookup(&[("SENTIGRAPH_LIMIT", "3")])).unwrap();
        assert_eq!(low.limit, MIN_LIMIT);
    }

    #[test]
    fn test_invalid_limit() {
        let err = Config::from_lookup(lookup(&[("SENTIGRAPH_LIMIT", "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "SENTIGRAPH_LIMIT",
                value: "lots".into()
            }
        );
        assert!(Config::from_lookup(lookup(&[("SENTIGRAPH_LIMIT", "0")])).is_err());
    }

    #[test]
    fn test_args() {
        let config = Config::default()
            .apply_args(["--limit", "40", "--posts", "x.jsonl", "AI", "ethics"])
            .unwrap();
        assert_eq!(config.limit, 40);
        assert_eq!(config.posts_path, PathBuf::from("x.jsonl"));
        assert_eq!(config.topic.as_deref(), Some("AI ethics"));
    }

    #[test]
    fn test_bad_args() {
        assert_eq!(
            Config::default().apply_args(["--limit"]).unwrap_err(),
            ConfigError::MissingValue("--limit")
        );
        assert_eq!(
            Config::default().apply_args(["--verbose"]).unwrap_err(),
            ConfigError::UnknownArgument("--verbose".into())
        );
    }
}
