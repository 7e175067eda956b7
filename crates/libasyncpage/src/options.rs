//! Caller-supplied rendering options.

use tracing::warn;

use crate::error::{AsyncPageError, Result};

/// Default text size limit handed to the client-side diagram engine.
pub const DEFAULT_MAX_TEXT_SIZE: u32 = 50_000;

/// Name of the generator parameter carrying the diagram text size limit.
pub const MAX_TEXT_SIZE_PARAM: &str = "maxTextSize";

/// Options that influence the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Upper bound for the diagram engine's internal text buffer. Passed through to the page
    /// unmodified.
    pub max_text_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_text_size: DEFAULT_MAX_TEXT_SIZE,
        }
    }
}

impl RenderOptions {
    /// Set the diagram text size limit.
    pub fn with_max_text_size(mut self, max_text_size: u32) -> Self {
        self.max_text_size = max_text_size;
        self
    }

    /// Build options from generator-style `name=value` parameters, starting from the defaults.
    ///
    /// Unknown parameters are ignored with a warning.
    pub fn from_params<I, K, V>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (name, value) in params {
            let (name, value) = (name.as_ref(), value.as_ref());
            match name {
                MAX_TEXT_SIZE_PARAM => {
                    options.max_text_size = value.trim().parse().map_err(|_| {
                        AsyncPageError::InvalidParameter {
                            name: name.to_string(),
                            value: value.to_string(),
                        }
                    })?;
                }
                _ => warn!(parameter = name, "ignoring unknown parameter"),
            }
        }
        Ok(options)
    }
}

/// Split a `name=value` parameter string.
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(AsyncPageError::InvalidParameter {
            name: raw.to_string(),
            value: String::new(),
        }),
    }
}
