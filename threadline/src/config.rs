use crate::moderation::MuteFilter;
use std::env;

#[derive(Debug, Clone, Default)]
pub struct ThreadlineConfig {
    pub moderation: ModerationConfig,
    pub output: OutputConfig,
}

impl ThreadlineConfig {
    pub fn from_env() -> Self {
        Self {
            moderation: ModerationConfig::from_env(),
            output: OutputConfig::from_env(),
        }
    }

    pub fn new(moderation: ModerationConfig, output: OutputConfig) -> Self {
        Self { moderation, output }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModerationConfig {
    pub muted_authors: Vec<String>,
    /// Root cids of conversations the reader has muted.
    pub muted_threads: Vec<String>,
}

impl ModerationConfig {
    pub fn from_env() -> Self {
        Self {
            muted_authors: list_var("THREADLINE_MUTED_AUTHORS"),
            muted_threads: list_var("THREADLINE_MUTED_THREADS"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.muted_authors.is_empty() && self.muted_threads.is_empty()
    }

    pub fn mute_filter(&self) -> MuteFilter {
        MuteFilter::new(
            self.muted_authors.iter().cloned(),
            self.muted_threads.iter().cloned(),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl OutputConfig {
    pub fn from_env() -> Self {
        let pretty = env::var("THREADLINE_PRETTY")
            .ok()
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { pretty }
    }
}

fn list_var(key: &str) -> Vec<String> {
    env::var(key)
        .ok()
        .map(|raw| split_list(&raw))
        .unwrap_or_default()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true")
}
