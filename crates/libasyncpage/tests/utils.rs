// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use libasyncpage::{Artifact, Document, RenderOptions, project};
use std::path::PathBuf;

/// Path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> Document {
    Document::from_path(fixture_path(name)).unwrap()
}

/// Project a YAML document, returning the page contents if one was produced.
pub fn render_yaml(source: &str, options: RenderOptions) -> Option<String> {
    let document = Document::from_yaml(source).unwrap();
    project(&document, &options)
        .into_artifact()
        .map(Artifact::into_contents)
}

/// Project a YAML document with default options, expecting a page.
pub fn render(source: &str) -> String {
    render_yaml(source, RenderOptions::default()).expect("expected a page to be rendered")
}

pub fn render_document(document: &Document) -> String {
    project(document, &RenderOptions::default())
        .into_artifact()
        .expect("expected a page to be rendered")
        .into_contents()
}

/// Assert that every marker occurs in `html`, in the given order.
pub fn assert_in_order(html: &str, markers: &[&str]) {
    let mut last = 0;
    let mut last_marker = "<start>";
    for marker in markers {
        let position = html
            .find(marker)
            .unwrap_or_else(|| panic!("marker {marker:?} missing from:\n{html}"));
        assert!(
            position >= last,
            "marker {marker:?} at {position} precedes {last_marker:?} at {last}:\n{html}"
        );
        last = position;
        last_marker = marker;
    }
}

pub fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

#[macro_export]
macro_rules! gen_tests {
    ($prefix:ident, {
        $(renders {
            $name:ident: {
                input: $input:expr,
                present: [$($present:expr),* $(,)?],
                absent: [$($absent:expr),* $(,)?]
            }
        })*
        $(skips {
            $skip_name:ident: $skip_input:expr
        })*
    }) => {
        mod $prefix {
            use super::*;

            $(
                #[test]
                fn $name() {
                    let html = render($input);
                    $(
                        assert!(html.contains($present), "expected {:?} in:\n{}", $present, html);
                    )*
                    $(
                        assert!(!html.contains($absent), "unexpected {:?} in:\n{}", $absent, html);
                    )*
                }
            )*

            $(
                #[test]
                fn $skip_name() {
                    ::pretty_assertions::assert_eq!(render_yaml($skip_input, RenderOptions::default()), None);
                }
            )*
        }
    };
}
