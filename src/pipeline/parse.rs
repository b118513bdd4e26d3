//! Record parser
//!
//! Turns comma-delimited text into records. The first line is the header row;
//! every later non-blank line becomes one record. Parsing never fails:
//! short rows pad with empty values, extra values are ignored and an
//! unterminated quote runs to the end of the line.

use std::mem::take;

use crate::core::model::Record;

/// Encodes a thousands separator inside a value without clashing with the
/// field delimiter.
const ESCAPED_COMMA: char = '$';

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Header row plus the records that followed it
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Parse delimited text into its header row and records
pub fn parse_table(text: &str) -> Table {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut lines = text.trim().split('\n');

    // The header row is split on bare commas.
    let headers: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|h| trim_field(h).to_string())
        .collect();

    let records = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| build_record(&headers, &split_line(line)))
        .collect();

    Table { headers, records }
}

fn build_record(headers: &[String], values: &[String]) -> Record {
    Record::from_pairs(headers.iter().enumerate().map(|(i, name)| {
        let value = values.get(i).map(|v| clean_value(v)).unwrap_or_default();
        (name.clone(), value)
    }))
}

/// Trim a raw value and decode escaped commas
pub fn clean_value(raw: &str) -> String {
    trim_field(raw).replace(ESCAPED_COMMA, ",")
}

// Spreadsheet exports may carry a byte order mark, which `str::trim` keeps.
fn trim_field(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Split one line into raw values, honoring double-quoted fields.
///
/// Inside quotes a doubled quote is a literal `"` and commas do not separate.
pub fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && matches!(chars.peek(), Some('"')) => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(take(&mut current)),
            _ => current.push(ch),
        }
    }

    values.push(current);
    values
}

fn needs_quotes(value: &str) -> bool {
    value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
}

/// Format values as one delimited line (no trailing newline)
pub fn write_line<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| {
            let v = v.as_ref();
            if needs_quotes(v) {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a header row and records as delimited text
pub fn write_table<'a>(headers: &[String], records: impl IntoIterator<Item = &'a Record>) -> String {
    let mut out = write_line(headers);
    out.push('\n');
    for record in records {
        let values: Vec<&str> = headers.iter().map(|h| record.get(h)).collect();
        out.push_str(&write_line(&values));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_quoted_fields() {
        let values = split_line(r#""Title, with comma","Author""Q""",Pub"#);
        assert_eq!(values, vec!["Title, with comma", "Author\"Q\"", "Pub"]);
    }

    #[test]
    fn test_split_line_unterminated_quote() {
        let values = split_line(r#"a,"b,c"#);
        assert_eq!(values, vec!["a", "b,c"]);
    }

    #[test]
    fn test_split_line_trailing_comma() {
        assert_eq!(split_line("a,b,"), vec!["a", "b", ""]);
    }

    fn parse(text: &str) -> Vec<Record> {
        parse_table(text).records
    }

    #[test]
    fn test_parse_basic() {
        let text = "title,author,price\nDune,Herbert,12.50\nEmma,Austen,9\n";
        let records = parse(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "Dune");
        assert_eq!(records[1].author(), "Austen");
        assert_eq!(records[1].price(), "9");
    }

    #[test]
    fn test_parse_trims_headers_and_values() {
        let records = parse(" title , author \r\n  Dune ,  Herbert \r\n");
        assert_eq!(records[0].title(), "Dune");
        assert_eq!(records[0].author(), "Herbert");
    }

    #[test]
    fn test_parse_dollar_becomes_comma() {
        let records = parse("title,price\nWar$ Peace,1$234.00\n");
        assert_eq!(records[0].title(), "War, Peace");
        assert_eq!(records[0].price(), "1,234.00");
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let table = parse_table("\u{FEFF}title,ISBN,author\nDune,1,Herbert\nEmma,2,\u{FEFF}Austen\n");
        assert_eq!(table.headers, vec!["title", "ISBN", "author"]);
        assert_eq!(table.records[0].title(), "Dune");
        assert_eq!(table.records[0].isbn(), "1");
        assert_eq!(table.records[1].author(), "Austen");
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let records = parse("title\nA\n\n   \nB\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_short_and_long_rows() {
        let records = parse("title,author,category\nOnly\nA,B,C,D,E\n");
        assert_eq!(records[0].title(), "Only");
        assert_eq!(records[0].author(), "");
        assert_eq!(records[0].category(), "");
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[1].category(), "C");
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn test_parse_empty_input() {
        let table = parse_table("");
        assert!(table.records.is_empty());
        assert_eq!(table.headers, vec![String::new()]);

        assert!(parse("title,author").is_empty());
    }

    #[test]
    fn test_write_line_quotes_when_needed() {
        assert_eq!(write_line(&["a", "b c", "d,e", "say \"hi\""]), r#"a,b c,"d,e","say ""hi""""#);
    }

    #[test]
    fn test_write_then_parse_preserves_record() {
        let text = "title,author,publisher\nDune,Frank Herbert,Chilton\n";
        let table = parse_table(text);
        let written = write_table(&table.headers, &table.records);
        let reparsed = parse(&written);
        assert_eq!(reparsed, table.records);
    }

    #[test]
    fn test_write_then_parse_with_embedded_delimiters() {
        let original = Record::from_pairs([("title", "A, B"), ("author", "\"Q\"")]);
        let headers = vec!["title".to_string(), "author".to_string()];
        let written = write_table(&headers, [&original]);
        let reparsed = parse(&written);
        assert_eq!(reparsed, vec![original]);
    }
}
