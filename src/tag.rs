//! The `<gscellvalue>` extension tag surface.
//!
//! The host's parser hands tag attributes over as name/value pairs; nothing
//! about the hook lifecycle or attribute grammar is reproduced here. Errors
//! never escape [`GsCellValue::render`]: like the original extension, it
//! degrades to an HTML-escaped `ERROR: …` string in the page output.

use crate::{
    Error, Result, SheetRegistry,
    query,
    response::{self, Cell},
    transport::{Transport, UreqTransport},
};

/// The attributes of a `<gscellvalue>` invocation.
///
/// `sheet`, `find`, and `return` are required, but requiredness is enforced
/// during the lookup rather than during parsing so that the error for each
/// missing attribute is reported in the original extension's order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Attributes<'a> {
    /// The registered name of the spreadsheet.
    pub sheet: Option<&'a str>,
    /// The exact string that identifies the target row by its first column.
    pub find: Option<&'a str>,
    /// The name of the column whose value is returned.
    pub return_column: Option<&'a str>,
    /// The value to substitute when the matched cell is empty.
    pub default: Option<&'a str>,
    /// If true, the host should re-parse the result as wiki markup.
    pub wikitext: bool,
}

impl<'a> Attributes<'a> {
    /// Collects attributes from name/value pairs. Later duplicates win, and
    /// `wikitext` is a presence flag whose value is ignored, both matching
    /// how MediaWiki hands attributes to a tag hook.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut attributes = Self::default();
        for (name, value) in pairs {
            match name {
                "sheet" => attributes.sheet = Some(value),
                "find" => attributes.find = Some(value),
                "return" => attributes.return_column = Some(value),
                "default" => attributes.default = Some(value),
                "wikitext" => attributes.wikitext = true,
                _ => log::debug!("ignoring unknown attribute '{name}'"),
            }
        }
        attributes
    }
}

/// A host-provided renderer for the `wikitext` attribute.
pub trait WikitextRenderer {
    /// Renders wiki markup to HTML.
    fn render(&self, text: &str) -> String;
}

/// The `<gscellvalue>` tag function.
pub struct GsCellValue<T = UreqTransport> {
    /// The deployment's sheet name table.
    registry: SheetRegistry,
    /// The HTTP boundary.
    transport: T,
}

impl GsCellValue {
    /// Creates a tag function that fetches over HTTP.
    #[must_use]
    pub fn new(registry: SheetRegistry) -> Self {
        Self::with_transport(registry, UreqTransport)
    }
}

impl<T: Transport> GsCellValue<T> {
    /// Creates a tag function with a custom transport.
    pub fn with_transport(registry: SheetRegistry, transport: T) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Looks up the requested cell value.
    ///
    /// An empty result—no matching row, or a matched cell with no value—is
    /// replaced by the `default` attribute, or by the literal string `empty`
    /// when no default was given.
    pub fn lookup(&self, attributes: &Attributes<'_>) -> Result<String> {
        let sheet = attributes.sheet.ok_or(Error::MissingAttribute("sheet"))?;
        let key = self
            .registry
            .resolve(sheet)
            .ok_or_else(|| Error::UnknownSheet(sheet.to_string()))?;
        let find = attributes.find.ok_or(Error::MissingAttribute("find"))?;
        let column = attributes
            .return_column
            .ok_or(Error::MissingAttribute("return"))?;

        // Step 1: find the index of the named column from the header row,
        // then convert it to the column ID the query language wants.
        let body = self.transport.fetch(&query::header_probe_url(key))?;
        let rows = response::parse(&body)?.into_rows()?;
        let header = rows
            .first()
            .and_then(|row| row.c.as_ref())
            .ok_or(Error::MissingCells)?;
        let index = header
            .iter()
            .position(|cell| {
                cell.as_ref()
                    .and_then(Cell::text)
                    .is_some_and(|text| text == column)
            })
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))?;

        // Step 2: get the value requested.
        let url = query::cell_url(key, &query::column_id(index), find);
        let body = self.transport.fetch(&url)?;
        let rows = response::parse(&body)?.into_rows()?;
        let value = rows
            .first()
            .and_then(|row| row.c.as_ref())
            .and_then(|cells| cells.first())
            .and_then(|cell| cell.as_ref())
            .and_then(Cell::text);

        Ok(match value {
            Some(value) if !value.is_empty() => value.into_owned(),
            _ => attributes.default.unwrap_or("empty").to_string(),
        })
    }

    /// Renders the tag to page output. Lookup failures become HTML-escaped
    /// `ERROR: …` strings; a successful result is passed through `renderer`
    /// when the `wikitext` attribute was set and the host supplied one.
    pub fn render(
        &self,
        attributes: &Attributes<'_>,
        renderer: Option<&dyn WikitextRenderer>,
    ) -> String {
        match self.lookup(attributes) {
            Ok(value) => {
                if attributes.wikitext
                    && let Some(renderer) = renderer
                {
                    renderer.render(&value)
                } else {
                    value
                }
            }
            Err(err) => {
                log::warn!("<gscellvalue> lookup failed: {err}");
                format!("ERROR: {}", html_escape::encode_text(&err.to_string()))
            }
        }
    }
}
