//! Query URL construction for the spreadsheet query endpoint.
//!
//! The endpoint takes the spreadsheet key and a query-language expression in
//! the `tq` parameter. The query language is described at
//! <https://developers.google.com/chart/interactive/docs/querylanguage>.

/// The public query endpoint for published spreadsheets.
const ENDPOINT: &str = "https://spreadsheets.google.com/tq";

/// The alphabet of characters to percent-encode in a `tq` expression.
///
/// Everything outside the RFC 3986 unreserved set is encoded.
const ALPHABET: percent_encoding::AsciiSet = percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a query expression.
#[inline]
fn url_encode(input: &str) -> percent_encoding::PercentEncode<'_> {
    percent_encoding::utf8_percent_encode(input, &ALPHABET)
}

/// Builds the URL of the header probe, which fetches only the first table
/// row. When no header row is declared on the sheet, that row holds the
/// column names.
pub(crate) fn header_probe_url(key: &str) -> String {
    format!("{ENDPOINT}?key={key}&tq={}", url_encode("limit 1"))
}

/// Builds the URL of the value query: the cell in `column` of the row whose
/// first column exactly matches `find`.
pub(crate) fn cell_url(key: &str, column: &str, find: &str) -> String {
    let tq = format!("select {column} where A = {}", quote_literal(find));
    format!("{ENDPOINT}?key={key}&tq={}", url_encode(&tq))
}

/// Converts a zero-based column index into a spreadsheet column ID: `A`, `B`,
/// …, `Z`, `AA`, `AB`, and so on.
pub(crate) fn column_id(index: usize) -> String {
    let mut id = [0u8; 16];
    let mut len = 0;
    let mut n = index;
    loop {
        id[len] = b'A' + (n % 26) as u8;
        len += 1;
        n /= 26;
        if n == 0 {
            break;
        }
        // Bijective numeration: `Z` carries into `AA`, not `A0`.
        n -= 1;
    }
    id[..len].iter().rev().map(|&b| b as char).collect()
}

/// Quotes a string as a query-language string literal.
fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + "''".len());
    out.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id() {
        assert_eq!(column_id(0), "A");
        assert_eq!(column_id(25), "Z");
        assert_eq!(column_id(26), "AA");
        assert_eq!(column_id(51), "AZ");
        assert_eq!(column_id(52), "BA");
        assert_eq!(column_id(701), "ZZ");
        assert_eq!(column_id(702), "AAA", "should carry past two letters");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("sbml-comp"), "'sbml-comp'");
        assert_eq!(
            quote_literal(r"it's a \ trap"),
            r"'it\'s a \\ trap'",
            "quotes and backslashes should not terminate the literal"
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            header_probe_url("k123"),
            "https://spreadsheets.google.com/tq?key=k123&tq=limit%201"
        );
        assert_eq!(
            cell_url("k123", "AB", "sbml-comp"),
            "https://spreadsheets.google.com/tq?key=k123\
             &tq=select%20AB%20where%20A%20%3D%20%27sbml-comp%27"
        );
    }
}
