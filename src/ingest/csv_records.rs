//! CSV passthrough
//!
//! Serves small reference CSV files (daily ocean readings, historical
//! migration records) as a JSON array of row objects keyed by the header.
//! Numeric cells become JSON numbers and empty or "null" cells become `null`.

use serde_json::{Map, Number, Value};
use std::path::Path;

pub type Record = Map<String, Value>;

/// Split one line on commas outside double quotes. Quotes are removed and
/// a doubled quote inside a quoted cell stands for one literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn parse_cell(raw: &str) -> Value {
    let cell = raw.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("null") || cell.eq_ignore_ascii_case("nan") {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = cell.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_string())
}

/// Parse CSV text. The first non-empty line is the header.
pub fn parse_records(csv: &str) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());

    let header: Vec<String> = split_fields(
        lines
            .next()
            .ok_or("CSV has no header row")?
            .trim_start_matches('\u{feff}'),
    )
    .into_iter()
    .map(|h| h.trim().to_string())
    .collect();

    let mut records = Vec::new();
    for (i, line) in lines.enumerate() {
        let fields = split_fields(line);
        if fields.len() > header.len() {
            return Err(format!(
                "row {} has {} fields, header has {}",
                i + 2,
                fields.len(),
                header.len()
            )
            .into());
        }

        let mut record = Map::with_capacity(header.len());
        for (col, name) in header.iter().enumerate() {
            let value = fields.get(col).map(|f| parse_cell(f)).unwrap_or(Value::Null);
            record.insert(name.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Read and parse a CSV file.
pub fn load_records(path: &Path) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    parse_records(&text)
}
