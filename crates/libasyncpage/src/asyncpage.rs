use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    document::Document,
    error::{AsyncPageError, Result},
    frontmatter::FrontmatterConfig,
    options::RenderOptions,
    page::{Projection, Renderer},
};

/// File name of the stylesheet written next to the page.
pub const STYLESHEET_NAME: &str = "style.css";

/// Stylesheet referenced by the page as `style.css`.
const STYLESHEET: &str = include_str!("../assets/style.css");

/// AsyncPage turns an AsyncAPI document on disk into a single static HTML page.
///
/// The page lists the channels an application exposes, embeds a sequence diagram of the channel
/// graph rendered client-side by Mermaid, and links to the document's feedback and external
/// documentation targets. Documents without channels produce no page.
#[derive(Debug, Clone)]
pub struct AsyncPage {
    /// Options passed through to the rendered page.
    options: RenderOptions,

    /// Whether to emit a frontmatter comment with the rendered page.
    frontmatter: bool,

    /// Whether `generate` writes the bundled stylesheet next to the page.
    stylesheet: bool,
}

impl Default for AsyncPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncPage {
    /// Creates a new AsyncPage instance with default configuration.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            frontmatter: true,
            stylesheet: true,
        }
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables frontmatter emission on rendered output.
    pub fn with_frontmatter(mut self, frontmatter: bool) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// Enables or disables writing the bundled stylesheet alongside the page.
    pub fn with_stylesheet(mut self, stylesheet: bool) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// The render options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Returns the parsed representation of the document at `path`.
    pub fn inspect(&self, path: impl AsRef<Path>) -> Result<Document> {
        Document::from_path(path)
    }

    /// Render the document at `path`.
    pub fn render(&self, path: impl AsRef<Path>) -> Result<Projection> {
        let path = path.as_ref();
        let document = self.inspect(path)?;
        Ok(self.renderer(Some(path)).project(&document))
    }

    /// Render an in-memory document.
    pub fn render_document(&self, document: &Document) -> Projection {
        self.renderer(None).project(document)
    }

    /// Returns a pretty-printed JSON dump of the normalized document model.
    pub fn raw_json(&self, path: impl AsRef<Path>) -> Result<String> {
        self.inspect(path)?.to_json_pretty()
    }

    /// Render the document at `path` and write the page into `out_dir`.
    ///
    /// Returns the path of the written page, or `None` when the document has no channels and
    /// nothing was written.
    pub fn generate(
        &self,
        path: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
    ) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        let out_dir = out_dir.as_ref();

        let Some(artifact) = self.render(path)?.into_artifact() else {
            info!(document = %path.display(), "document has no channels, nothing to generate");
            return Ok(None);
        };

        fs::create_dir_all(out_dir)?;
        let page_path = out_dir.join(artifact.name());
        write_atomic(&page_path, artifact.contents())?;
        info!(path = %page_path.display(), "wrote page");

        if self.stylesheet {
            let stylesheet_path = out_dir.join(STYLESHEET_NAME);
            write_atomic(&stylesheet_path, STYLESHEET)?;
        }

        Ok(Some(page_path))
    }

    /// Build a renderer for one projection.
    fn renderer(&self, source: Option<&Path>) -> Renderer {
        let frontmatter = match (self.frontmatter, source) {
            (false, _) => FrontmatterConfig::disabled(),
            (true, Some(source)) => FrontmatterConfig::for_source(source.display().to_string()),
            (true, None) => FrontmatterConfig::enabled(),
        };
        Renderer::new()
            .with_options(self.options)
            .with_frontmatter(frontmatter)
    }
}

/// Write `contents` to a temporary file in the destination directory, then move it into place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.persist(path).map_err(|e| AsyncPageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = "asyncapi: 2.6.0\n\
                       info:\n  title: Generated\n\
                       channels:\n  c:\n    publish:\n      operationId: p\n";

    #[test]
    fn test_generate_writes_page_and_stylesheet() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let doc_path = temp_dir.path().join("asyncapi.yaml");
        fs::write(&doc_path, DOC)?;
        let out_dir = temp_dir.path().join("out/nested");

        let written = AsyncPage::new().generate(&doc_path, &out_dir)?;
        assert_eq!(written, Some(out_dir.join("index.html")));

        let html = fs::read_to_string(out_dir.join("index.html"))?;
        assert!(html.contains("<h1>Generated</h1>"));
        assert!(html.contains(&format!("source={}", doc_path.display())));
        assert!(out_dir.join(STYLESHEET_NAME).exists());
        Ok(())
    }

    #[test]
    fn test_generate_skips_without_channels() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let doc_path = temp_dir.path().join("asyncapi.yaml");
        fs::write(&doc_path, "asyncapi: 2.6.0\ninfo:\n  title: Nothing\n")?;
        let out_dir = temp_dir.path().join("out");

        assert_eq!(AsyncPage::new().generate(&doc_path, &out_dir)?, None);
        assert!(!out_dir.exists());
        Ok(())
    }

    #[test]
    fn test_generate_without_stylesheet_or_frontmatter() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let doc_path = temp_dir.path().join("asyncapi.yaml");
        fs::write(&doc_path, DOC)?;

        let page = AsyncPage::new()
            .with_stylesheet(false)
            .with_frontmatter(false)
            .with_options(RenderOptions::default().with_max_text_size(5000));
        page.generate(&doc_path, temp_dir.path())?;

        let html = fs::read_to_string(temp_dir.path().join("index.html"))?;
        assert!(html.starts_with("<!DOCTYPE html>\n<html"));
        assert!(html.contains("maxTextSize: 5000,"));
        assert!(!temp_dir.path().join(STYLESHEET_NAME).exists());
        Ok(())
    }

    #[test]
    fn test_raw_json() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let doc_path = temp_dir.path().join("asyncapi.yaml");
        fs::write(&doc_path, DOC)?;
        let raw = AsyncPage::new().raw_json(&doc_path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(value["info"]["title"], "Generated");
        assert_eq!(value["channels"]["c"]["publish"][0]["operationId"], "p");
        Ok(())
    }
}
