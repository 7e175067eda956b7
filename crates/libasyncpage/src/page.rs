//! Projects a document onto a single HTML page.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use tracing::debug;

use crate::{
    document::Document,
    frontmatter::FrontmatterConfig,
    options::RenderOptions,
    sections::{SectionKind, Sections, build_sections},
};

/// File name of the generated page.
pub const ARTIFACT_NAME: &str = "index.html";

/// Stylesheets linked from the page head, in order.
pub const STYLESHEETS: [&str; 2] = [
    "https://unpkg.com/tailwindcss@^1.0/dist/tailwind.min.css",
    "style.css",
];

/// Classes applied to the container wrapping the content sections.
const CONTAINER_CLASS: &str = "container mx-auto px-4";

/// A rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, relative to the output directory.
    name: &'static str,
    /// Complete file contents.
    contents: String,
    /// Sections that made it onto the page.
    sections: Sections,
}

impl Artifact {
    /// File name, relative to the output directory.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Complete file contents.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Consume the artifact, returning its contents.
    pub fn into_contents(self) -> String {
        self.contents
    }

    /// Sections present on the page.
    pub fn sections(&self) -> Sections {
        self.sections
    }
}

/// Outcome of projecting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The document produced a page.
    Artifact(Artifact),
    /// The document has nothing to render; no file should be written.
    Skip,
}

impl Projection {
    /// The artifact, if one was produced.
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Artifact(artifact) => Some(artifact),
            Self::Skip => None,
        }
    }

    /// Consume the projection, returning the artifact if one was produced.
    pub fn into_artifact(self) -> Option<Artifact> {
        match self {
            Self::Artifact(artifact) => Some(artifact),
            Self::Skip => None,
        }
    }

    /// Whether projection was skipped.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

/// Renders documents into pages.
///
/// The renderer holds no state between calls; one renderer can project any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    /// Options passed through to the page.
    options: RenderOptions,
    /// Comment block emitted after the doctype.
    frontmatter: FrontmatterConfig,
}

impl Renderer {
    /// Create a renderer with default options and no frontmatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the diagram text size limit.
    pub fn with_max_text_size(mut self, max_text_size: u32) -> Self {
        self.options.max_text_size = max_text_size;
        self
    }

    /// Configure the frontmatter comment block.
    pub fn with_frontmatter(mut self, frontmatter: FrontmatterConfig) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// The render options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Project `document` onto a page, or skip it when it declares no channels.
    pub fn project(&self, document: &Document) -> Projection {
        if !document.has_channels() {
            debug!(title = document.info().title(), "document has no channels, skipping page");
            return Projection::Skip;
        }

        let sections = build_sections(document, &self.options);
        let present = sections
            .iter()
            .fold(Sections::empty(), |acc, (kind, _)| acc | kind.flag());
        debug!(
            channels = document.channels().len(),
            sections = ?present,
            "projecting document"
        );

        let frontmatter = self
            .frontmatter
            .render(&self.options, document.channels().len());
        let contents = html! {
            (DOCTYPE) "\n"
            @if let Some(frontmatter) = frontmatter {
                (PreEscaped(frontmatter))
            }
            (page(document.info().title(), sections)) "\n"
        }
        .into_string();

        Projection::Artifact(Artifact {
            name: ARTIFACT_NAME,
            contents,
            sections: present,
        })
    }
}

/// Project `document` with the given options and no frontmatter.
pub fn project(document: &Document, options: &RenderOptions) -> Projection {
    Renderer::new().with_options(*options).project(document)
}

/// Assemble the page shell around the built sections.
fn page(page_title: &str, sections: Vec<(SectionKind, Markup)>) -> Markup {
    let (content, trailer): (Vec<_>, Vec<_>) = sections
        .into_iter()
        .partition(|(kind, _)| kind.in_container());

    html! {
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) }
                @for href in STYLESHEETS {
                    link rel="stylesheet" href=(href);
                }
            }
            body {
                div class=(CONTAINER_CLASS) {
                    @for (_, section) in &content {
                        (section)
                    }
                }
                @for (_, section) in &trailer {
                    (section)
                }
            }
        }
    }
}
