//! Builds a Mermaid sequence diagram describing the channel graph.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, Operation, OperationKind};

/// Participant identifier used for the application itself.
const APP_PARTICIPANT: &str = "app";

/// Alias shown for the application when the document title is blank.
const DEFAULT_APP_ALIAS: &str = "Application";

/// Characters that end or escape a Mermaid statement.
static UNSAFE_LABEL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n;#]+").expect("label sanitizer pattern must compile"));

/// Make a string safe to use as a participant alias or message label.
pub fn sanitize_label(raw: &str) -> String {
    UNSAFE_LABEL_CHARS.replace_all(raw, " ").trim().to_string()
}

/// Label for a message arrow: the operation name, then its summary, then the kind keyword.
fn operation_label(operation: &Operation, kind: OperationKind) -> String {
    let label = operation
        .name()
        .or_else(|| operation.summary())
        .map(sanitize_label)
        .unwrap_or_default();
    if label.is_empty() {
        kind.as_str().to_string()
    } else {
        label
    }
}

/// Serialize the channels of `document` as a `sequenceDiagram`.
///
/// Every channel becomes a participant. Subscribe operations are drawn as messages from the
/// application to the channel, publish operations as messages from the channel to the
/// application.
pub fn build_diagram(document: &Document) -> String {
    let mut diagram = String::from("sequenceDiagram\n");

    let app_alias = sanitize_label(document.info().title());
    let app_alias = if app_alias.is_empty() {
        DEFAULT_APP_ALIAS
    } else {
        app_alias.as_str()
    };
    writeln!(diagram, "    participant {APP_PARTICIPANT} as {app_alias}")
        .expect("write diagram participant");

    for (index, (name, _)) in document.channels().iter().enumerate() {
        writeln!(
            diagram,
            "    participant channel{index} as {}",
            sanitize_label(name)
        )
        .expect("write diagram participant");
    }

    for (index, (_, channel)) in document.channels().iter().enumerate() {
        for kind in [OperationKind::Subscribe, OperationKind::Publish] {
            for operation in channel.operations(kind) {
                let label = operation_label(operation, kind);
                let participant = format!("channel{index}");
                let (from, to) = match kind {
                    OperationKind::Subscribe => (APP_PARTICIPANT, participant.as_str()),
                    OperationKind::Publish => (participant.as_str(), APP_PARTICIPANT),
                };
                writeln!(diagram, "    {from}->>{to}: {label}").expect("write diagram message");
            }
        }
    }

    diagram
}
