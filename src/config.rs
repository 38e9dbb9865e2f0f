//! Configuration management

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming the AWS credentials profile
pub const PROFILE_ENV: &str = "AWS_PROFILE";
/// Environment variable naming the AWS region
pub const REGION_ENV: &str = "AWS_REGION";

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Suffix inserted before the extension of the default output file
pub const OUTPUT_SUFFIX: &str = "_searchable";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub aws: AwsConfig,
}

/// Credentials profile and region for the detection service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AwsConfig {
    pub profile: String,
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            aws: AwsConfig {
                profile: DEFAULT_PROFILE.to_string(),
                region: DEFAULT_REGION.to_string(),
            },
        }
    }
}

impl Config {
    /// Read settings from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            aws: AwsConfig {
                profile: non_empty(PROFILE_ENV).unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
                region: non_empty(REGION_ENV).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            },
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, profile: Option<String>, region: Option<String>) -> Self {
        if let Some(profile) = profile {
            self.aws.profile = profile;
        }
        if let Some(region) = region {
            self.aws.region = region;
        }
        self
    }
}

/// Default output path: `<stem>_searchable.<ext>` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}.pdf", stem, OUTPUT_SUFFIX),
    };

    input.with_file_name(name)
}
