// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Run configuration
//!
//! A [`RunConfig`] describes where a program image is placed, where
//! execution starts and how long it runs. It is read from a TOML file and
//! then overridden field by field from the command line.
//!
//! ```toml
//! load_address = "0x80000000"
//! entry_point = "0x80000400"   # defaults to load_address
//! instructions = 100000
//! trace_path = "trace.log"     # optional
//! trace_limit = 10000
//! ```
//!
//! Addresses may be written as TOML integers or as strings in `0x` hex or
//! decimal notation.

use crate::core::error::Result;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Settings for one run of the interpreter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Address the program image is copied to
    #[serde(deserialize_with = "deserialize_address")]
    pub load_address: u32,

    /// First instruction executed (defaults to `load_address`)
    #[serde(deserialize_with = "deserialize_optional_address")]
    pub entry_point: Option<u32>,

    /// Instruction budget for the run
    pub instructions: u64,

    /// Trace file, if tracing is enabled
    pub trace_path: Option<PathBuf>,

    /// Maximum number of trace lines
    pub trace_limit: u64,
}

impl RunConfig {
    /// Default load address (start of KSEG0)
    pub const DEFAULT_LOAD_ADDRESS: u32 = 0x8000_0000;

    /// Default instruction budget
    pub const DEFAULT_INSTRUCTIONS: u64 = 100_000;

    /// Default trace line limit
    pub const DEFAULT_TRACE_LIMIT: u64 = 10_000;

    /// Load a configuration file
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Config` if it is not
    /// valid TOML or contains an unknown field or malformed address.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded run config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse a configuration from TOML text
    ///
    /// # Example
    /// ```
    /// use vr4300::core::config::RunConfig;
    ///
    /// let config = RunConfig::from_toml("load_address = \"0x80001000\"").unwrap();
    /// assert_eq!(config.load_address, 0x8000_1000);
    /// assert_eq!(config.entry_point(), 0x8000_1000);
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Address of the first instruction to execute
    pub fn entry_point(&self) -> u32 {
        self.entry_point.unwrap_or(self.load_address)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            load_address: Self::DEFAULT_LOAD_ADDRESS,
            entry_point: None,
            instructions: Self::DEFAULT_INSTRUCTIONS,
            trace_path: None,
            trace_limit: Self::DEFAULT_TRACE_LIMIT,
        }
    }
}

/// Parse an address in `0x` hex or decimal notation
///
/// # Example
/// ```
/// use vr4300::core::config::parse_address;
///
/// assert_eq!(parse_address("0x80000000"), Ok(0x8000_0000));
/// assert_eq!(parse_address("4096"), Ok(4096));
/// assert!(parse_address("0xZZ").is_err());
/// ```
pub fn parse_address(text: &str) -> std::result::Result<u32, String> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => text.replace('_', "").parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", text, e))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AddressRepr {
    Number(u32),
    Text(String),
}

impl AddressRepr {
    fn resolve<E: serde::de::Error>(self) -> std::result::Result<u32, E> {
        match self {
            AddressRepr::Number(value) => Ok(value),
            AddressRepr::Text(text) => parse_address(&text).map_err(E::custom),
        }
    }
}

fn deserialize_address<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    AddressRepr::deserialize(deserializer)?.resolve()
}

fn deserialize_optional_address<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<AddressRepr>::deserialize(deserializer)?
        .map(AddressRepr::resolve)
        .transpose()
}
