// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Channel identifiers and channel sets.
//!
//! Planes are always ordered Y, Cb, Cr. A [`ChannelSet`] selects which of
//! them a retention policy is applied to; the default is chroma only, since
//! luma carries most of the visible detail.

use std::fmt;
use std::str::FromStr;

use super::error::{PlaneError, Result};

/// One of the three YCbCr channels, in plane order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Luma = 0,
    ChromaBlue = 1,
    ChromaRed = 2,
}

impl Channel {
    /// All channels in plane order.
    pub const ALL: [Channel; 3] = [Channel::Luma, Channel::ChromaBlue, Channel::ChromaRed];

    /// Look up a channel by plane index.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PlaneError::ChannelOutOfRange(index))
    }

    /// Plane index (0 = Y, 1 = Cb, 2 = Cr).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short lowercase name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Luma => "y",
            Self::ChromaBlue => "cb",
            Self::ChromaRed => "cr",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = PlaneError;

    /// Accepts an index (`0`..`2`) or a name (`y`/`luma`, `cb`, `cr`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index);
        }
        match s.to_ascii_lowercase().as_str() {
            "y" | "luma" => Ok(Self::Luma),
            "cb" => Ok(Self::ChromaBlue),
            "cr" => Ok(Self::ChromaRed),
            _ => Err(PlaneError::UnknownChannel(s.to_string())),
        }
    }
}

/// A set of channels, stored as a 3-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSet(u8);

impl ChannelSet {
    pub const EMPTY: ChannelSet = ChannelSet(0);
    pub const CHROMA: ChannelSet = ChannelSet(0b110);
    pub const ALL: ChannelSet = ChannelSet(0b111);

    /// Build a set from plane indices. Fails on any index outside {0, 1, 2}.
    pub fn from_indices(indices: &[usize]) -> Result<Self> {
        let mut set = Self::EMPTY;
        for &i in indices {
            set.insert(Channel::from_index(i)?);
        }
        Ok(set)
    }

    /// Copy of this set with `channel` added.
    pub fn with(self, channel: Channel) -> Self {
        Self(self.0 | (1 << channel.index()))
    }

    pub fn insert(&mut self, channel: Channel) {
        *self = self.with(channel);
    }

    pub fn contains(self, channel: Channel) -> bool {
        self.0 & (1 << channel.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Channels in the set, in plane order.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::CHROMA
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Channel::name).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

impl FromStr for ChannelSet {
    type Err = PlaneError;

    /// Comma-separated list of channel indices or names, e.g. `1,2` or `cb,cr`.
    /// An empty string yields the empty set.
    fn from_str(s: &str) -> Result<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Channel::from_str)
            .collect::<Result<Vec<_>>>()
            .map(|channels| channels.into_iter().collect())
    }
}
