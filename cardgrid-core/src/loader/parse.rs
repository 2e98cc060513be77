//! Header-driven delimited text parsing.

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::catalog::record::{fields, Record};
use crate::error::LoadError;

/// The field delimiter of catalog datasets.
pub const DEFAULT_DELIMITER: u8 = b';';

/// How to split a dataset into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: u8,
    pub quote: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: b'"',
        }
    }
}

impl ParseOptions {
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Parse `text` into records, first row as header.
///
/// Only truly blank lines are skipped; a row of bare delimiters is a record
/// with empty fields. Short rows leave their trailing fields empty; cells past
/// the header are dropped.
pub fn parse_records(text: &str, options: &ParseOptions) -> Result<Vec<Record>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        debug!("dataset has no header row");
        return Ok(Vec::new());
    }
    warn_missing_columns(&headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if is_blank_line(&row) {
            continue;
        }
        records.push(Record::from_fields(headers.iter().zip(row.iter())));
    }
    Ok(records)
}

fn is_blank_line(row: &StringRecord) -> bool {
    row.len() == 1 && row.get(0).is_some_and(str::is_empty)
}

fn warn_missing_columns(headers: &StringRecord) {
    for expected in fields::EXPECTED {
        if !headers.iter().any(|column| column == expected) {
            warn!(column = expected, "dataset header is missing a column, values read as empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name;type;color;faction;image_url";

    #[test]
    fn parses_semicolon_rows_in_order() {
        let text = format!(
            "{HEADER}\nFire Drake;Creature;Red;Wild;img/drake.png\nWater Sprite;Creature;Blue;Tide;img/sprite.png\n"
        );
        let records = parse_records(&text, &ParseOptions::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record::new("Fire Drake", "Creature", "Red", "Wild", "img/drake.png")
        );
        assert_eq!(records[1].name, "Water Sprite");
    }

    #[test]
    fn commas_are_part_of_values() {
        let text = format!("{HEADER}\nDrake, Elder;Creature;Red;Wild;a.png\n");
        let records = parse_records(&text, &ParseOptions::default()).unwrap();
        assert_eq!(records[0].name, "Drake, Elder");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("{HEADER}\n\nA;Spell;Red;Wild;a.png\n\n\nB;Spell;Blue;Tide;b.png\n\n");
        let records = parse_records(&text, &ParseOptions::default()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn delimiter_only_row_is_a_record() {
        let text = format!("{HEADER}\n;;;;\nA;Spell;Red;Wild;a.png\n");
        let records = parse_records(&text, &ParseOptions::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new("", "", "", "", ""));
        assert_eq!(records[1].name, "A");
    }

    #[test]
    fn whitespace_row_is_kept() {
        let text = format!("{HEADER}\n   \nA;Spell;Red;Wild;a.png\n");
        let records = parse_records(&text, &ParseOptions::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "   ");
        assert_eq!(records[0].kind, "");
    }

    #[test]
    fn short_rows_leave_fields_empty() {
        let text = format!("{HEADER}\nLonely;Spell\n");
        let records = parse_records(&text, &ParseOptions::default()).unwrap();
        assert_eq!(records[0].kind, "Spell");
        assert_eq!(records[0].color, "");
        assert_eq!(records[0].image_url, "");
    }

    #[test]
    fn extra_columns_are_kept_in_header_order() {
        let text = "name;rarity;type;cost\nA;Rare;Spell;3\n";
        let records = parse_records(text, &ParseOptions::default()).unwrap();
        let extras: Vec<_> = records[0].extra.keys().map(String::as_str).collect();
        assert_eq!(extras, ["rarity", "cost"]);
        assert_eq!(records[0].kind, "Spell");
    }

    #[test]
    fn quoted_values_may_contain_the_delimiter() {
        let text = format!("{HEADER}\n\"Storm; Reborn\";Spell;Red;Wild;s.png\n");
        let records = parse_records(&text, &ParseOptions::default()).unwrap();
        assert_eq!(records[0].name, "Storm; Reborn");
    }

    #[test]
    fn custom_delimiter() {
        let text = "name\ttype\nA\tSpell\n";
        let options = ParseOptions::default().delimiter(b'\t');
        let records = parse_records(text, &options).unwrap();
        assert_eq!(records[0].kind, "Spell");
    }

    #[test]
    fn empty_text_has_no_records() {
        assert!(parse_records("", &ParseOptions::default()).unwrap().is_empty());
        assert!(parse_records(HEADER, &ParseOptions::default()).unwrap().is_empty());
    }
}
