//! Minimal CSV tokenizer for spreadsheet exports.
//!
//! Handles what a sheet export actually produces: comma separators, fields
//! wrapped in double quotes when they contain commas or line breaks, and `""`
//! as an escaped quote inside such a field. No other dialect is supported.

/// Splits CSV text into records.
///
/// Each line is a record, except that a line ending inside a quoted field is
/// joined with the following lines until that field closes. A quote that
/// never closes cleanly (followed by a comma or the end of a line) does not
/// join anything, so one malformed row cannot swallow the rows after it.
/// `\r\n` endings are accepted. Blank records are dropped.
#[must_use]
pub fn split_records(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let spans = line_spans(text);
    let mut records = Vec::new();
    let mut first = 0;

    while first < spans.len() {
        let (start, end) = spans[first];
        let mut state = Scan::FieldStart.feed(&text[start..end]);
        let mut last = first;
        while state == Scan::Quoted && last + 1 < spans.len() {
            last += 1;
            let (line_start, line_end) = spans[last];
            state = state.step('\n').feed(&text[line_start..line_end]);
        }
        if matches!(state, Scan::Quoted | Scan::Malformed) {
            last = first;
        }
        records.push(&text[start..spans[last].1]);
        first = last + 1;
    }

    records
        .into_iter()
        .map(|r| r.strip_suffix('\r').unwrap_or(r))
        .filter(|r| !r.trim().is_empty())
        .collect()
}

fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, _) in text.match_indices('\n') {
        spans.push((start, i));
        start = i + 1;
    }
    spans.push((start, text.len()));
    spans
}

/// Where a scan over one record stands after the characters seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
    AfterQuoted,
    Malformed,
}

impl Scan {
    fn feed(self, text: &str) -> Self {
        text.chars().fold(self, Scan::step)
    }

    fn step(self, c: char) -> Self {
        match self {
            Scan::Malformed => Scan::Malformed,
            Scan::FieldStart => match c {
                ',' => Scan::FieldStart,
                '"' => Scan::Quoted,
                c if c.is_whitespace() => Scan::FieldStart,
                _ => Scan::Unquoted,
            },
            Scan::Unquoted => match c {
                ',' => Scan::FieldStart,
                '"' => Scan::Malformed,
                _ => Scan::Unquoted,
            },
            Scan::Quoted => {
                if c == '"' {
                    Scan::QuoteInQuoted
                } else {
                    Scan::Quoted
                }
            }
            Scan::QuoteInQuoted => match c {
                '"' => Scan::Quoted,
                ',' => Scan::FieldStart,
                c if c.is_whitespace() => Scan::AfterQuoted,
                _ => Scan::Malformed,
            },
            Scan::AfterQuoted => match c {
                ',' => Scan::FieldStart,
                c if c.is_whitespace() => Scan::AfterQuoted,
                _ => Scan::Malformed,
            },
        }
    }
}

/// Splits one record into trimmed fields.
///
/// A double quote toggles quoted state; commas inside quotes do not split.
/// Surrounding quotes are stripped from each field afterwards.
///
/// ```
/// use sheetstore_importer::tokenize_line;
///
/// assert_eq!(tokenize_line(r#"Mug,"Big, blue",12"#), vec!["Mug", "Big, blue", "12"]);
/// ```
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                fields.push(finish_field(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(finish_field(&current));
    fields
}

fn finish_field(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\"").trim().to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "tokenize_test.rs"]
mod tests;
