// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Scrub configuration.
//!
//! A [`ScrubConfig`] names the channels to filter, the retention policy and
//! whether to level-shift. It can be built in code or loaded from TOML:
//!
//! ```toml
//! channels = ["cb", "cr"]   # or [1, 2]
//! policy = "low-block(6)"
//! level_shift = true
//! ```
//!
//! Missing keys take their defaults. Unknown keys, unknown policies and
//! out-of-range channels are rejected before any pixel is touched.
//!
//! [`ConfigOverrides`] layers explicit settings (command-line flags) over a
//! base configuration: defaults < config file < overrides.

use std::path::Path;

use serde::Deserialize;

use crate::plane::{Channel, ChannelSet};

use super::error::Result;
use super::policy::RetentionPolicy;

/// Parameters of one scrub run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubConfig {
    /// Channels the policy is applied to. Others pass through untouched.
    pub channels: ChannelSet,
    /// Which coefficients survive.
    pub policy: RetentionPolicy,
    /// Subtract 128 before the forward transform and add it back after.
    pub level_shift: bool,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            channels: ChannelSet::default(),
            policy: RetentionPolicy::default(),
            level_shift: true,
        }
    }
}

impl ScrubConfig {
    pub fn new(channels: ChannelSet, policy: RetentionPolicy, level_shift: bool) -> Result<Self> {
        let config = Self { channels, policy, level_shift };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the type system does not enforce.
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        file.into_config()
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Settings that replace the corresponding field of a base configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub channels: Option<ChannelSet>,
    pub policy: Option<RetentionPolicy>,
    pub level_shift: Option<bool>,
}

impl ConfigOverrides {
    /// Apply to `base` and validate the result.
    pub fn apply(self, mut base: ScrubConfig) -> Result<ScrubConfig> {
        if let Some(channels) = self.channels {
            base.channels = channels;
        }
        if let Some(policy) = self.policy {
            base.policy = policy;
        }
        if let Some(level_shift) = self.level_shift {
            base.level_shift = level_shift;
        }
        base.validate()?;
        Ok(base)
    }

    /// Load `path` (or start from defaults) and apply these overrides.
    pub fn resolve(self, path: Option<&Path>) -> Result<ScrubConfig> {
        let base = match path {
            Some(path) => ScrubConfig::from_toml_file(path)?,
            None => ScrubConfig::default(),
        };
        self.apply(base)
    }
}

/// On-disk form. Policy and channels stay textual until validated.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    channels: Option<Vec<ChannelEntry>>,
    policy: Option<String>,
    level_shift: Option<bool>,
}

/// A channel given either by index or by name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChannelEntry {
    Index(usize),
    Name(String),
}

impl ChannelEntry {
    fn to_channel(&self) -> Result<Channel> {
        let channel = match self {
            Self::Index(i) => Channel::from_index(*i)?,
            Self::Name(name) => name.parse::<Channel>()?,
        };
        Ok(channel)
    }
}

impl ConfigFile {
    fn into_config(self) -> Result<ScrubConfig> {
        let defaults = ScrubConfig::default();
        let channels = match self.channels {
            Some(entries) => entries
                .iter()
                .map(ChannelEntry::to_channel)
                .collect::<Result<ChannelSet>>()?,
            None => defaults.channels,
        };
        let policy = match self.policy {
            Some(text) => text.parse::<RetentionPolicy>()?,
            None => defaults.policy,
        };
        ScrubConfig::new(
            channels,
            policy,
            self.level_shift.unwrap_or(defaults.level_shift),
        )
    }
}
