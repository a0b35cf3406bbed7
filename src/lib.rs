//! Spreadsheet-backed cell lookups for the `<gscellvalue>` wiki extension tag.
//!
//! The tag looks like this in wiki source:
//!
//! ```text
//! <gscellvalue sheet="Packages" find="sbml-comp" return="Label" />
//! ```
//!
//! `sheet` names a published Google Spreadsheet. The name is resolved to an
//! actual spreadsheet key through a per-deployment [`SheetRegistry`]; this
//! indirection exists for security reasons, so that wiki authors cannot pull
//! content from arbitrary spreadsheets that they control.
//!
//! The lookup itself runs against the spreadsheet's public query endpoint in
//! two steps. First a `limit 1` probe reads the first row of the table, which
//! is assumed to hold the column names, to find the numeric index of the
//! `return` column. That index is converted to a spreadsheet column ID (`A`,
//! `B`, …, `Z`, `AA`, `AB`, …) and a second query selects that column from the
//! row whose first column exactly matches `find`. An empty result is replaced
//! by the `default` attribute when one was given.
//!
//! Both replies arrive wrapped in
//! `google.visualization.Query.setResponse(…)`; the wrapper is stripped and
//! the rest is decoded as ordinary JSON. The query language itself is
//! documented at
//! <https://developers.google.com/chart/interactive/docs/querylanguage>.
//!
//! Hosts that want the result re-parsed as wiki markup (the `wikitext`
//! attribute) plug their renderer in through the [`WikitextRenderer`] seam;
//! this crate never interprets markup itself.

mod query;
mod registry;
mod response;
mod tag;
mod transport;

pub use registry::SheetRegistry;
pub use tag::{Attributes, GsCellValue, WikitextRenderer};
pub use transport::{Transport, UreqTransport};

/// A cell lookup error.
///
/// Messages are written so that, prefixed with `ERROR: ` and HTML-escaped,
/// they read the same as the errors the original MediaWiki extension emitted
/// into rendered pages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required tag attribute was not provided.
    #[error("<gscellvalue> is missing '{0}' attribute.")]
    MissingAttribute(&'static str),

    /// The first table row has no cell list.
    #[error("table returned from Google Spreadsheets lacks 'c' part.")]
    MissingCells,

    /// The returned table has no row list.
    #[error("table returned from Google Spreadsheets lacks rows.")]
    MissingRows,

    /// The reply envelope has no status field.
    #[error("reply from Google Spreadsheets is not in expected form")]
    MissingStatus,

    /// The reply envelope has no table.
    #[error("reply from Google Spreadsheets lacks a table.")]
    MissingTable,

    /// A sheet registry file could not be decoded.
    #[error("invalid sheet registry: {0}")]
    Registry(#[source] serde_json::Error),

    /// The query endpoint reported an error with a reason.
    #[error("{0}")]
    Remote(String),

    /// The HTTP fetch failed.
    #[error("fetch error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The header row has no column with the requested name.
    #[error("could not find a column named '{0}'")]
    UnknownColumn(String),

    /// The query endpoint reported an error with no usable reason.
    #[error("unknown error returned by Google Spreadsheets")]
    UnknownRemote,

    /// The sheet name is not in the registry.
    #[error("unknown sheet name '{0}'")]
    UnknownSheet(String),

    /// The reply could not be decoded as a `setResponse` envelope.
    #[error("unable to parse reply from Google Spreadsheets")]
    Unparsable(#[source] Option<serde_json::Error>),
}

/// The standard result type used by all fallible lookup functions.
pub type Result<T = (), E = Error> = core::result::Result<T, E>;
