//! Tile URL templates with `{z}`, `{x}` and `{y}` placeholders

use super::{FetcherError, FetcherResult};
use crate::TileId;
use std::fmt;
use std::str::FromStr;

const PLACEHOLDERS: [&str; 3] = ["{z}", "{x}", "{y}"];

/// A validated tile URL template, e.g. `https://tile.example.com/{z}/{x}/{y}.png`.
///
/// Placeholders are substituted literally with decimal integers. The rest of the
/// template is used verbatim and never URL-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    /// Validate that `template` contains all of `{z}`, `{x}` and `{y}`
    pub fn parse(template: &str) -> FetcherResult<Self> {
        let missing: Vec<&str> = PLACEHOLDERS
            .iter()
            .copied()
            .filter(|token| !template.contains(token))
            .collect();

        if !missing.is_empty() {
            return Err(FetcherError::InvalidTemplate(format!(
                "'{template}' is missing {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Build the request URL for `tile`
    pub fn render(&self, tile: TileId) -> String {
        self.template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl FromStr for UrlTemplate {
    type Err = FetcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
