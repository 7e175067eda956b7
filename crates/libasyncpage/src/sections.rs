//! Page sections, in the fixed order they appear on the page.
//!
//! Each section is built independently from the document and options and either yields a
//! fragment or nothing. Presence varies with the document; order never does.
#![allow(clippy::missing_docs_in_private_items)]

use bitflags::bitflags;
use maud::{Markup, PreEscaped, html};

use crate::{
    diagram::build_diagram,
    document::{Document, ExternalDocs, Operation, OperationKind},
    options::RenderOptions,
};

/// Info extension holding the Twitter handle used for the feedback line.
pub const TWITTER_EXTENSION: &str = "x-twitter";

/// Base URL the Twitter handle is appended to.
pub const TWITTER_BASE_URL: &str = "https://twitter.com/";

/// Client-side diagram engine.
pub const MERMAID_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js";

bitflags! {
    /// Set of sections present on a rendered page.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sections: u8 {
        /// Document title heading.
        const TITLE = 1 << 0;
        /// Channels with subscribe operations.
        const SUBSCRIBE = 1 << 1;
        /// Channels with publish operations.
        const PUBLISH = 1 << 2;
        /// Channel sequence diagram.
        const DIAGRAM = 1 << 3;
        /// Twitter feedback line.
        const FEEDBACK = 1 << 4;
        /// External documentation line.
        const EXTERNAL_DOCS = 1 << 5;
        /// Diagram engine scripts.
        const SCRIPTS = 1 << 6;
    }
}

/// A single page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Document title heading.
    Title,
    /// Channels with subscribe operations.
    SubscribeList,
    /// Channels with publish operations.
    PublishList,
    /// Channel sequence diagram.
    Diagram,
    /// Twitter feedback line.
    Feedback,
    /// External documentation line.
    ExternalDocs,
    /// Diagram engine scripts.
    Scripts,
}

impl SectionKind {
    /// Page order of all sections.
    pub const ORDER: [Self; 7] = [
        Self::Title,
        Self::SubscribeList,
        Self::PublishList,
        Self::Diagram,
        Self::Feedback,
        Self::ExternalDocs,
        Self::Scripts,
    ];

    /// Flag representing this section in a [`Sections`] set.
    pub fn flag(self) -> Sections {
        match self {
            Self::Title => Sections::TITLE,
            Self::SubscribeList => Sections::SUBSCRIBE,
            Self::PublishList => Sections::PUBLISH,
            Self::Diagram => Sections::DIAGRAM,
            Self::Feedback => Sections::FEEDBACK,
            Self::ExternalDocs => Sections::EXTERNAL_DOCS,
            Self::Scripts => Sections::SCRIPTS,
        }
    }

    /// Short name, used in logs and as the element id where one is set.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::SubscribeList => "subscribe-channels",
            Self::PublishList => "publish-channels",
            Self::Diagram => "diagram",
            Self::Feedback => "feedback",
            Self::ExternalDocs => "external-docs",
            Self::Scripts => "scripts",
        }
    }

    /// Whether the section sits inside the content container rather than after it.
    pub fn in_container(self) -> bool {
        self != Self::Scripts
    }

    /// Build the section, or `None` when the document gives it nothing to show.
    pub fn build(self, document: &Document, options: &RenderOptions) -> Option<Markup> {
        match self {
            Self::Title => Some(title(document)),
            Self::SubscribeList => Some(channel_list(document, OperationKind::Subscribe, self)),
            Self::PublishList => Some(channel_list(document, OperationKind::Publish, self)),
            Self::Diagram => Some(diagram(document)),
            Self::Feedback => feedback(document),
            Self::ExternalDocs => external_docs(document),
            Self::Scripts => Some(scripts(options)),
        }
    }
}

/// Build every present section in page order.
pub fn build_sections(document: &Document, options: &RenderOptions) -> Vec<(SectionKind, Markup)> {
    SectionKind::ORDER
        .into_iter()
        .filter_map(|kind| kind.build(document, options).map(|markup| (kind, markup)))
        .collect()
}

fn title(document: &Document) -> Markup {
    html! { h1 { (document.info().title()) } }
}

fn channel_list(document: &Document, kind: OperationKind, section: SectionKind) -> Markup {
    html! {
        div id=(section.name()) {
            h3 { "Channels that you can " (kind.as_str()) " to" }
            ul {
                @for (name, channel) in document.channels().iter() {
                    @for operation in channel.operations(kind) {
                        (channel_entry(name, operation))
                    }
                }
            }
        }
    }
}

fn channel_entry(name: &str, operation: &Operation) -> Markup {
    let description = operation
        .description()
        .filter(|description| !description.is_empty());
    html! {
        li {
            strong { "Channel name:" } " " (name)
            @if let Some(description) = description {
                " "
                span.description {
                    strong { "Operation description:" } " " (description)
                }
            }
        }
    }
}

fn diagram(document: &Document) -> Markup {
    html! {
        div class="mermaid" id=(SectionKind::Diagram.name()) {
            (build_diagram(document))
        }
    }
}

fn feedback(document: &Document) -> Option<Markup> {
    // Any non-empty string is accepted as a handle.
    let handle = document
        .info()
        .ext(TWITTER_EXTENSION)?
        .as_str()
        .filter(|handle| !handle.is_empty())?;
    let href = format!("{TWITTER_BASE_URL}{handle}");

    Some(html! {
        p id=(SectionKind::Feedback.name()) {
            "Share your feedback with us on " a href=(href) { "Twitter" } "."
        }
    })
}

fn external_docs(document: &Document) -> Option<Markup> {
    let url = document
        .external_docs()
        .map(ExternalDocs::url)
        .filter(|url| !url.is_empty())?;

    Some(html! {
        p id=(SectionKind::ExternalDocs.name()) {
            "Don't forget to visit our website " a href=(url) { (url) } "."
        }
    })
}

fn scripts(options: &RenderOptions) -> Markup {
    let init = format!(
        "\n  mermaid.initialize({{\n    startOnLoad: true,\n    maxTextSize: {},\n  }});\n",
        options.max_text_size
    );
    html! {
        script src=(MERMAID_SCRIPT_URL) {}
        script { (PreEscaped(init)) }
    }
}
