//! AsyncPage renders AsyncAPI 2.x documents into a single static HTML page.
//!
//! The page carries the API title, one list of the channels consumers can subscribe to and one
//! of the channels they can publish to, a Mermaid sequence diagram of the channel graph, and
//! optional feedback and external documentation lines. Sections always appear in that order;
//! only their presence depends on the document. A document without channels produces no page.
//!
//! ```
//! use libasyncpage::{Channel, Document, Operation, RenderOptions, project};
//!
//! let doc = Document::new("Streetlights API")
//!     .with_channel(
//!         "light/measured",
//!         Channel::new().with_subscribe(Operation::new("receiveLightMeasurement")),
//!     )
//!     .with_extension("x-twitter", "asyncapi");
//!
//! let projection = project(&doc, &RenderOptions::default().with_max_text_size(5000));
//! let page = projection.artifact().expect("document has channels");
//! assert_eq!(page.name(), "index.html");
//! assert!(page.contents().contains("https://twitter.com/asyncapi"));
//! ```

/// Facade that loads documents from disk and writes pages.
mod asyncpage;
/// Mermaid sequence diagram builder.
mod diagram;
/// Read-only document model and loaders.
mod document;
/// Error types shared across the crate.
mod error;
/// Comment block emitted ahead of the page markup.
mod frontmatter;
/// Terminal syntax highlighting.
mod highlight;
/// Render options and generator parameters.
mod options;
/// The page projector.
mod page;
/// Ordered page sections.
mod sections;

pub use maud::Markup;

pub use crate::asyncpage::{AsyncPage, STYLESHEET_NAME};
pub use crate::diagram::{build_diagram, sanitize_label};
pub use crate::document::{
    Channel, Channels, DEFAULT_ASYNCAPI_VERSION, Document, ExternalDocs, Info, Operation,
    OperationKind, check_version,
};
pub use crate::error::{AsyncPageError, Result};
pub use crate::frontmatter::FrontmatterConfig;
pub use crate::highlight::highlight_html;
pub use crate::options::{DEFAULT_MAX_TEXT_SIZE, MAX_TEXT_SIZE_PARAM, RenderOptions, parse_param};
pub use crate::page::{ARTIFACT_NAME, Artifact, Projection, Renderer, STYLESHEETS, project};
pub use crate::sections::{
    MERMAID_SCRIPT_URL, SectionKind, Sections, TWITTER_BASE_URL, TWITTER_EXTENSION,
    build_sections,
};
