mod utils;
use libasyncpage::{AsyncPage, AsyncPageError, Document, build_diagram};
use pretty_assertions::assert_eq;
use utils::*;

#[test]
fn test_streetlights_model() {
    let doc = load_fixture("streetlights.yaml");
    assert_eq!(doc.info().title(), "Streetlights API");
    assert_eq!(doc.channels().len(), 4);
    let (first, channel) = doc.channels().iter().next().unwrap();
    assert_eq!(
        first,
        "smartylighting/streetlights/1/0/event/{streetlightId}/lighting/measured"
    );
    assert_eq!(channel.subscribe()[0].name(), Some("receiveLightMeasurement"));
    assert_eq!(
        doc.info().extensions().keys().collect::<Vec<_>>(),
        ["x-twitter"]
    );
}

#[test]
fn test_streetlights_page() {
    let html = render_document(&load_fixture("streetlights.yaml"));
    assert_eq!(count(&html, "<li>"), 4);
    assert!(html.contains(
        "<strong>Channel name:</strong> smartylighting/streetlights/1/0/action/{streetlightId}/turn/off <span class=\"description\"><strong>Operation description:</strong> Turn the streetlight off.</span>"
    ));
    assert!(html.contains("https://twitter.com/asyncapi"));
    assert!(html.contains("<a href=\"https://example.com\">https://example.com</a>"));
    assert_in_order(
        &html,
        &[
            "Channels that you can subscribe to",
            "lighting/measured <span",
            "Channels that you can publish to",
            "turn/on</li>",
            "turn/off <span",
            "dim</li>",
        ],
    );
}

#[test]
fn test_streetlights_diagram() {
    let diagram = build_diagram(&load_fixture("streetlights.yaml"));
    assert!(diagram.starts_with("sequenceDiagram\n    participant app as Streetlights API\n"));
    assert_in_order(
        &diagram,
        &[
            "app->>channel0: receiveLightMeasurement",
            "channel1->>app: turnOn",
            "channel2->>app: turnOff",
            "channel3->>app: dimLight",
        ],
    );
    assert!(!diagram.contains(';'));
}

#[test]
fn test_no_channels_fixture_skips() {
    let projection = AsyncPage::new()
        .render(fixture_path("no-channels.yaml"))
        .unwrap();
    assert!(projection.is_skip());
}

#[test]
fn test_json_fixture() {
    let page = AsyncPage::new()
        .with_frontmatter(false)
        .render(fixture_path("account-service.json"))
        .unwrap()
        .into_artifact()
        .unwrap();
    let html = page.contents();
    assert!(html.contains("<h1>Account Service</h1>"));
    assert!(html.contains("<li><strong>Channel name:</strong> user/signedup</li>"));
    assert!(!html.contains("id=\"feedback\""));
    assert!(!html.contains("id=\"external-docs\""));
}

#[test]
fn test_next_major_is_rejected() {
    let err = Document::from_path(fixture_path("next-major.yaml")).unwrap_err();
    assert!(matches!(err, AsyncPageError::UnsupportedVersion(ref v) if v == "3.0.0"));
    assert_eq!(
        err.to_string(),
        "Unsupported AsyncAPI version 3.0.0: only 2.x documents are supported"
    );
}
