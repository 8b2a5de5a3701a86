use crate::config::ColumnMap;
use crate::error::{QuizError, Result};
use crate::models::{Dataset, Plant};
use ::csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext == "csv"
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

pub fn load_csv(
    path: &Path,
    name: &str,
    columns: &ColumnMap,
    require_extras: bool,
) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    tracing::info!(source = name, path = %path.display(), "loading plant list");
    parse_plants(&content, name, columns, require_extras)
}

struct Table {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl Table {
    /// A semicolon file read with the comma delimiter collapses into one column.
    fn looks_semicolon_separated(&self) -> bool {
        self.headers.len() == 1 && self.headers.get(0).is_some_and(|h| h.contains(';'))
    }

    /// Short rows are padded later; a row longer than the header means the
    /// delimiter is wrong.
    fn has_overlong_records(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.len() > self.headers.len())
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

fn read_table(content: &str, delimiter: u8) -> std::result::Result<Table, ::csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Table { headers, records })
}

fn read_with_fallback(content: &str, name: &str) -> Result<Table> {
    let table = read_table(content, b',')?;
    if table.looks_semicolon_separated() {
        tracing::info!(source = name, "single comma column, retrying with ';'");
        Ok(read_table(content, b';')?)
    } else if table.has_overlong_records() {
        tracing::info!(source = name, "rows wider than the header, retrying with ';'");
        Ok(read_table(content, b';')?)
    } else {
        Ok(table)
    }
}

/// Accepts integers and integral decimals such as `"12.0"`.
pub fn coerce_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(number) = raw.parse::<i64>() {
        return Some(number);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn optional_field(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn parse_plants(
    content: &str,
    name: &str,
    columns: &ColumnMap,
    require_extras: bool,
) -> Result<Dataset> {
    let content = content.trim_start_matches('\u{feff}');
    let table = read_with_fallback(content, name)?;

    let mut required = vec![
        columns.number.clone(),
        columns.common_name.clone(),
        columns.scientific_name.clone(),
    ];
    if require_extras {
        required.push(columns.note.clone());
        required.push(columns.image.clone());
    }
    let missing: Vec<String> = required
        .iter()
        .filter(|column| table.column(column).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        tracing::warn!(source = name, ?missing, "plant list is missing columns");
        return Err(QuizError::Schema { required, missing });
    }

    let (Some(number_idx), Some(common_idx), Some(scientific_idx)) = (
        table.column(&columns.number),
        table.column(&columns.common_name),
        table.column(&columns.scientific_name),
    ) else {
        return Err(QuizError::Schema {
            required,
            missing: Vec::new(),
        });
    };
    let note_idx = table.column(&columns.note);
    let image_idx = table.column(&columns.image);

    let mut plants = Vec::with_capacity(table.records.len());
    let mut dropped = 0;

    for record in &table.records {
        let number = record.get(number_idx).and_then(coerce_number);
        let common_name = optional_field(record, Some(common_idx));
        let scientific_name = optional_field(record, Some(scientific_idx));

        match (number, common_name, scientific_name) {
            (Some(number), Some(common_name), Some(scientific_name)) => plants.push(Plant {
                number,
                common_name,
                scientific_name,
                note: optional_field(record, note_idx),
                image: optional_field(record, image_idx),
            }),
            _ => dropped += 1,
        }
    }

    tracing::info!(
        source = name,
        rows = plants.len(),
        dropped,
        "parsed plant list"
    );

    Dataset::new(name, plants)
}
