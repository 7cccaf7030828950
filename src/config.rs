//! `kannada.toml` project configuration
//!
//! Every section is optional; a missing file means defaults everywhere.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{KannadaError, KannadaResult};
use crate::toolchain::Toolchain;

pub const CONFIG_FILE: &str = "kannada.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toolchain: Toolchain,
    pub lexer: LexerConfig,
    pub emit: EmitConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Fail on characters that match no token instead of dropping them
    pub strict: bool,
}

/// Which intermediate artifacts the CLI prints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub tokens: bool,
    pub ast: bool,
    pub c: bool,
    pub tac: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self { tokens: true, ast: true, c: true, tac: true }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> KannadaResult<Self> {
        toml::from_str(text).map_err(|e| KannadaError::config(format!("invalid {}: {}", CONFIG_FILE, e)))
    }

    pub fn load(path: &Path) -> KannadaResult<Self> {
        let text = fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml(&text)
    }

    /// Use `explicit` when given, else `kannada.toml` in the working directory if present.
    pub fn discover(explicit: Option<&Path>) -> KannadaResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Self::load(&local)
        } else {
            Ok(Self::default())
        }
    }
}
