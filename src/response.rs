//! Decoding of query endpoint replies.
//!
//! Replies are JSONP: a JSON envelope wrapped in a
//! `google.visualization.Query.setResponse(…)` call, sometimes preceded by a
//! `/*O_o*/` comment and followed by a `;`. The wrapper is located by text
//! search rather than by fixed offsets, then the envelope is decoded with
//! serde.
//!
//! An example reply:
//!
//! ```text
//! google.visualization.Query.setResponse({"version":"0.6","status":"ok",
//! "sig":"999999999","table":{"cols":[{"id":"D","label":"","type":"string",
//! "pattern":""}],"rows":[{"c":[{"v":"sbml-comp"}]}]}});
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::borrow::Cow;

/// The call wrapping every reply from the query endpoint.
const WRAPPER: &str = "google.visualization.Query.setResponse(";

/// Strips the JSONP wrapper from a reply and decodes the envelope.
pub(crate) fn parse(raw: &str) -> Result<QueryResponse> {
    let start = raw
        .find(WRAPPER)
        .map(|index| index + WRAPPER.len())
        .ok_or(Error::Unparsable(None))?;
    let end = raw
        .rfind(')')
        .filter(|&end| end > start)
        .ok_or(Error::Unparsable(None))?;
    serde_json::from_str(&raw[start..end]).map_err(|err| Error::Unparsable(Some(err)))
}

/// The reply envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    /// `"ok"`, `"warning"`, or `"error"`.
    pub status: Option<String>,
    /// Error descriptions, present when the status is `"error"`.
    #[serde(default)]
    pub errors: Vec<RemoteError>,
    /// The selected table data.
    pub table: Option<Table>,
}

impl QueryResponse {
    /// Validates the envelope and returns the table rows.
    pub fn into_rows(self) -> Result<Vec<Row>> {
        match self.status.as_deref() {
            None => return Err(Error::MissingStatus),
            Some("error") => {
                let reason = self.errors.into_iter().find_map(|err| err.reason);
                return Err(reason.map_or(Error::UnknownRemote, Error::Remote));
            }
            Some(_) => {}
        }

        let table = self.table.ok_or(Error::MissingTable)?;
        table.rows.ok_or(Error::MissingRows)
    }
}

/// One error description from an `"error"` reply.
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteError {
    /// A short machine-readable reason, e.g. `invalid_query`.
    pub reason: Option<String>,
}

/// The tabular part of the envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Table {
    /// The selected rows.
    pub rows: Option<Vec<Row>>,
}

/// One table row. A cell is doubly optional: the row may lack a cell list
/// entirely, and cells for empty grid positions come through as `null`.
#[derive(Debug, Deserialize)]
pub(crate) struct Row {
    pub c: Option<Vec<Option<Cell>>>,
}

/// One table cell.
#[derive(Debug, Deserialize)]
pub(crate) struct Cell {
    /// The raw cell value: a string, number, or boolean, or `null` for an
    /// empty cell.
    pub v: Option<serde_json::Value>,
}

impl Cell {
    /// Returns the cell value as text.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self.v.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(Cow::Borrowed(text)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}
