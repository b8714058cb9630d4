#![forbid(unsafe_code)]

//! Cell content and horizontal alignment.
//!
//! Content is stored verbatim; sanitizing and rendering it is the host's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Keyword form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsupported alignment keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentError {
    pub keyword: String,
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid alignment \"{}\" (expected left, center, or right)",
            self.keyword
        )
    }
}

impl std::error::Error for AlignmentError {}

impl FromStr for Alignment {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(AlignmentError {
                keyword: other.to_string(),
            }),
        }
    }
}

/// One cell of a row or header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub content: String,
    pub align: Alignment,
}

impl Cell {
    #[must_use]
    pub fn new(content: impl Into<String>, align: Alignment) -> Self {
        Self {
            content: content.into(),
            align,
        }
    }
}
