use std::fmt::Write;

use crate::options::{MAX_TEXT_SIZE_PARAM, RenderOptions};

/// Configuration describing the optional comment block rendered ahead of the page markup.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterConfig {
    /// Whether the frontmatter should be rendered.
    pub enabled: bool,
    /// Source document the page was generated from.
    pub source: Option<String>,
}

impl FrontmatterConfig {
    /// Create a configuration with frontmatter enabled for the provided source document.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            enabled: true,
            source: Some(source.into()),
        }
    }

    /// Enabled frontmatter without a source reference, used for documents built in memory.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            source: None,
        }
    }

    /// Disable frontmatter rendering entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Render the configured frontmatter when enabled, returning the formatted comment block.
    pub fn render(&self, options: &RenderOptions, channel_count: usize) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let mut output = String::new();
        output.push_str("<!-- asyncpage: static AsyncAPI documentation page -->\n");

        let mut settings = Vec::new();
        if let Some(source) = &self.source {
            settings.push(format!("source={}", comment_safe(source)));
        }
        settings.push(format!("{MAX_TEXT_SIZE_PARAM}={}", options.max_text_size));
        settings.push(format!("channels={channel_count}"));

        writeln!(output, "<!-- settings: {} -->", settings.join(", "))
            .expect("write frontmatter settings");

        Some(output)
    }
}

/// Break up sequences that would end or invalidate an HTML comment.
fn comment_safe(value: &str) -> String {
    let mut safe = value.replace("--", "- -");
    while safe.contains("--") {
        safe = safe.replace("--", "- -");
    }
    safe.replace('>', "&gt;")
}
