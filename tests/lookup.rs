//! End-to-end lookup tests against a scripted transport.

use gscellvalue::{
    Attributes, Error, GsCellValue, Result, SheetRegistry, Transport, WikitextRenderer,
};
use std::collections::HashMap;

/// A transport that replays canned bodies keyed by URL.
struct FakeEndpoint(HashMap<String, String>);

impl Transport for FakeEndpoint {
    fn fetch(&self, url: &str) -> Result<String> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Transport(format!("no canned reply for {url}").into()))
    }
}

/// Wraps a table envelope in the JSONP reply shape.
fn reply(table: &str) -> String {
    format!(
        r#"/*O_o*/
google.visualization.Query.setResponse({{"version":"0.6","status":"ok","sig":"1","table":{table}}});"#
    )
}

const KEY: &str = "0TestKeyTestKeyTestKey";

/// A three-column sheet whose first row holds the column names.
fn packages_sheet() -> GsCellValue<FakeEndpoint> {
    let mut replies = HashMap::new();
    replies.insert(
        format!("https://spreadsheets.google.com/tq?key={KEY}&tq=limit%201"),
        reply(r#"{"cols":[],"rows":[{"c":[{"v":"Name"},{"v":"Label"},{"v":"ShortName"}]}]}"#),
    );
    replies.insert(
        format!(
            "https://spreadsheets.google.com/tq?key={KEY}\
             &tq=select%20C%20where%20A%20%3D%20%27sbml-comp%27"
        ),
        reply(r#"{"cols":[{"id":"C","label":"","type":"string","pattern":""}],"rows":[{"c":[{"v":"comp"}]}]}"#),
    );
    replies.insert(
        format!(
            "https://spreadsheets.google.com/tq?key={KEY}\
             &tq=select%20B%20where%20A%20%3D%20%27sbml-comp%27"
        ),
        reply(r#"{"cols":[],"rows":[{"c":[{"v":null}]}]}"#),
    );
    replies.insert(
        format!(
            "https://spreadsheets.google.com/tq?key={KEY}\
             &tq=select%20C%20where%20A%20%3D%20%27no-such-row%27"
        ),
        reply(r#"{"cols":[],"rows":[]}"#),
    );

    let mut registry = SheetRegistry::new();
    registry.register("Packages", KEY);
    GsCellValue::with_transport(registry, FakeEndpoint(replies))
}

fn attributes<'a>(find: &'a str, return_column: &'a str) -> Attributes<'a> {
    Attributes {
        sheet: Some("Packages"),
        find: Some(find),
        return_column: Some(return_column),
        ..Attributes::default()
    }
}

#[test]
fn finds_a_cell_by_row_and_column() {
    let tag = packages_sheet();
    assert_eq!(
        tag.lookup(&attributes("sbml-comp", "ShortName")).unwrap(),
        "comp"
    );
}

#[test]
fn empty_cell_falls_back_to_default() {
    let tag = packages_sheet();
    assert_eq!(
        tag.lookup(&attributes("sbml-comp", "Label")).unwrap(),
        "empty",
        "an empty cell with no default should produce the literal 'empty'"
    );

    let mut with_default = attributes("sbml-comp", "Label");
    with_default.default = Some("n/a");
    assert_eq!(tag.lookup(&with_default).unwrap(), "n/a");
}

#[test]
fn unmatched_row_falls_back_to_default() {
    let tag = packages_sheet();
    let mut attributes = attributes("no-such-row", "ShortName");
    attributes.default = Some("-");
    assert_eq!(tag.lookup(&attributes).unwrap(), "-");
}

#[test]
fn unknown_column_is_an_error() {
    let tag = packages_sheet();
    assert_eq!(
        tag.render(&attributes("sbml-comp", "Nope"), None),
        "ERROR: could not find a column named 'Nope'"
    );
}

#[test]
fn missing_attributes_render_in_order() {
    let tag = packages_sheet();

    let empty = Attributes::default();
    assert_eq!(
        tag.render(&empty, None),
        "ERROR: &lt;gscellvalue&gt; is missing 'sheet' attribute."
    );

    // An unknown sheet is reported before any missing attribute after it.
    let unknown = Attributes {
        sheet: Some("Mystery"),
        ..Attributes::default()
    };
    assert_eq!(tag.render(&unknown, None), "ERROR: unknown sheet name 'Mystery'");

    let no_find = Attributes {
        sheet: Some("Packages"),
        ..Attributes::default()
    };
    assert_eq!(
        tag.render(&no_find, None),
        "ERROR: &lt;gscellvalue&gt; is missing 'find' attribute."
    );

    let no_return = Attributes {
        sheet: Some("Packages"),
        find: Some("sbml-comp"),
        ..Attributes::default()
    };
    assert_eq!(
        tag.render(&no_return, None),
        "ERROR: &lt;gscellvalue&gt; is missing 'return' attribute."
    );
}

#[test]
fn wikitext_attribute_uses_the_host_renderer() {
    struct Bold;
    impl WikitextRenderer for Bold {
        fn render(&self, text: &str) -> String {
            format!("<b>{text}</b>")
        }
    }

    let tag = packages_sheet();
    let mut attributes = attributes("sbml-comp", "ShortName");
    assert_eq!(
        tag.render(&attributes, Some(&Bold)),
        "comp",
        "the renderer should not run without the wikitext attribute"
    );

    attributes.wikitext = true;
    assert_eq!(tag.render(&attributes, Some(&Bold)), "<b>comp</b>");
    assert_eq!(
        tag.render(&attributes, None),
        "comp",
        "a host without a renderer should get the raw value"
    );
}
