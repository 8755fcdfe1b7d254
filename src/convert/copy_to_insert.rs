//! Convert PostgreSQL COPY FROM stdin blocks to batched INSERT statements.
//!
//! Handles:
//! - Tab-separated row parsing
//! - NULL handling (\N → NULL)
//! - Boolean literals (t/f → true/false)
//! - Re-escaping values as SQL string literals
//! - Batched INSERT generation for readability and transaction size

use memchr::memchr_iter;
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};

use super::report::ConversionReport;

/// Maximum rows per INSERT statement
const MAX_ROWS_PER_INSERT: usize = 100;

/// Characters of a skipped line shown in the mismatch warning
const LINE_PREVIEW_LEN: usize = 100;

// Matches one COPY block: table name, raw column list, and the data section
// up to the first line holding only the \. terminator. The data capture is
// non-greedy so consecutive blocks match independently.
static RE_COPY_BLOCK: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"COPY\s+([\w.]+)\s*\((.*?)\)\s+FROM\s+stdin;(.*?)^\\\.$")
        .dot_matches_new_line(true)
        .multi_line(true)
        .build()
        .unwrap()
});

/// One COPY block captured from the dump document
#[derive(Debug, Clone)]
pub struct CopyBlock<'a> {
    /// Dotted table name (e.g., "public.users")
    pub table: &'a str,
    /// Column list exactly as written in the dump, comma-joined
    pub columns_raw: &'a str,
    /// Raw row text between the header and the \. terminator
    pub data: &'a str,
}

impl<'a> CopyBlock<'a> {
    /// Column names parsed from the raw list
    pub fn columns(&self) -> Vec<&'a str> {
        self.columns_raw.split(',').map(str::trim).collect()
    }
}

/// Convert every COPY block in `input` to INSERT statements.
///
/// Text outside COPY blocks passes through unchanged; a document with no
/// blocks comes back identical. With `strict` set, rows whose field count
/// disagrees with the declared column count are dropped and recorded in the
/// report; without it every row is encoded regardless of arity.
pub fn convert_document(input: &str, strict: bool) -> (String, ConversionReport) {
    let mut report = ConversionReport::default();

    let output = RE_COPY_BLOCK.replace_all(input, |caps: &Captures| {
        let block = CopyBlock {
            table: caps.get(1).map_or("", |m| m.as_str()),
            columns_raw: caps.get(2).map_or("", |m| m.as_str()),
            data: caps.get(3).map_or("", |m| m.as_str()),
        };
        convert_block(&block, strict, &mut report)
    });

    (output.into_owned(), report)
}

/// Render the replacement text for one COPY block
fn convert_block(block: &CopyBlock, strict: bool, report: &mut ConversionReport) -> String {
    report.total_tables += 1;

    let columns = block.columns();
    let data = block.data.trim();

    if data.is_empty() {
        report.skipped_tables += 1;
        return format!("-- No data for table {}\n", block.table);
    }

    let mut values: Vec<String> = Vec::new();
    let mut line_num = 0;

    for line in data.split('\n').filter(|l| !l.trim().is_empty()) {
        line_num += 1;

        let fields = split_row(line);

        if strict && fields.len() != columns.len() {
            let msg = format!(
                "Table {}, line {}: Expected {} columns, got {}",
                block.table,
                line_num,
                columns.len(),
                fields.len()
            );
            eprintln!("WARNING: {msg}");
            eprintln!("    Line content: {}...", line_preview(line));
            report.errors.push(msg);
            continue;
        }

        let encoded: Vec<String> = fields.iter().map(|f| encode_value(f)).collect();
        values.push(format!("({})", encoded.join(", ")));
        report.total_rows += 1;
    }

    if values.is_empty() {
        report.skipped_tables += 1;
        return format!(
            "-- No valid data for table {} (all rows had errors)\n",
            block.table
        );
    }

    render_inserts(block.table, block.columns_raw, &values)
}

/// Split one data line on tab characters into raw field strings
fn split_row(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;

    for tab in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[start..tab]);
        start = tab + 1;
    }
    fields.push(&line[start..]);

    fields
}

/// Encode a raw COPY text-format field as a SQL literal.
///
/// Priority order: the \N marker becomes NULL, bare t/f become boolean
/// literals, everything else is re-quoted as a string with backslashes
/// doubled before quote doubling. No type awareness; numeric fields come out
/// as quoted strings.
pub fn encode_value(field: &str) -> String {
    match field {
        "\\N" => "NULL".to_string(),
        "t" => "true".to_string(),
        "f" => "false".to_string(),
        _ => {
            let escaped = field.replace('\\', "\\\\").replace('\'', "''");
            format!("'{escaped}'")
        }
    }
}

/// Render batched INSERT statements with the pg_dump-style data header
fn render_inserts(table: &str, columns_raw: &str, values: &[String]) -> String {
    let mut out = String::new();

    out.push_str("--\n");
    out.push_str(&format!(
        "-- Data for Name: {table}; Type: TABLE DATA; Schema: public; Owner: platform\n"
    ));
    out.push_str("--\n\n");

    let batches: Vec<String> = values
        .chunks(MAX_ROWS_PER_INSERT)
        .map(|chunk| {
            format!(
                "INSERT INTO {table} ({columns_raw}) VALUES\n{};\n",
                chunk.join(",\n")
            )
        })
        .collect();

    out.push_str(&batches.join("\n"));
    out
}

fn line_preview(line: &str) -> String {
    line.chars().take(LINE_PREVIEW_LEN).collect()
}
