//! CSV ingestion of movie records
//!
//! Reads the IMDB "movie_metadata" export (or any CSV with a compatible
//! [`ColumnLayout`]) into a [`CatalogBuilder`]:
//!
//! 1. The header line is skipped.
//! 2. Each line is split into fields; double-quoted fields may contain
//!    commas, and `""` inside quotes is a literal quote.
//! 3. Title, actor and genre values are normalised; rows whose title
//!    normalises to an empty string are skipped.
//! 4. Loading stops after `max_records` records.
//!
//! Bytes that are not valid UTF-8 are replaced rather than rejected; the
//! normaliser strips them afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogBuilder};
use crate::config::{CatalogConfig, ColumnLayout};
use crate::error::CatalogResult;
use crate::record::NewRecord;
use crate::text::{normalize, parse_int, parse_real};

/// Separator between genres inside the genre column.
pub const GENRE_SEPARATOR: char = '|';

/// Split one CSV line into its fields.
///
/// A trailing comma yields a trailing empty field; an empty line yields a
/// single empty field.
///
/// ```
/// use nexus_catalog::ingest::split_csv_line;
///
/// let fields = split_csv_line(r#"Color,"Heat, the movie","say ""hi""",,"#);
/// assert_eq!(fields, ["Color", "Heat, the movie", "say \"hi\"", "", ""]);
/// ```
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        let mut field = String::new();
        let mut in_quotes = chars.next_if_eq(&'"').is_some();
        let mut more = false;

        while let Some(c) = chars.next() {
            if in_quotes && c == '"' {
                if chars.next_if_eq(&'"').is_some() {
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else if !in_quotes && c == ',' {
                more = true;
                break;
            } else {
                field.push(c);
            }
        }

        fields.push(field);
        if !more {
            return fields;
        }
    }
}

/// Build a record from split fields. Missing columns read as empty.
///
/// Returns `None` when the title normalises to an empty string.
pub fn record_from_fields(fields: &[String], layout: &ColumnLayout) -> Option<NewRecord> {
    let field = |column: usize| fields.get(column).map(String::as_str).unwrap_or("");

    let title = normalize(field(layout.title));
    if title.is_empty() {
        return None;
    }

    let mut record = NewRecord::new(
        title,
        parse_int(field(layout.year)),
        parse_real(field(layout.rating)),
    );

    for &column in &layout.actors {
        let actor = normalize(field(column));
        if !actor.is_empty() {
            record.actors.push(actor);
        }
    }

    record.genres = field(layout.genres)
        .split(GENRE_SEPARATOR)
        .map(normalize)
        .filter(|genre| !genre.is_empty())
        .collect();

    Some(record)
}

/// Read records from a CSV stream into a fresh builder.
pub fn load_reader<R: BufRead>(mut reader: R, config: &CatalogConfig) -> CatalogResult<CatalogBuilder> {
    config.validate()?;

    let mut builder = CatalogBuilder::new(config.clone());
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut skipped = 0usize;
    let mut short_rows = 0usize;
    let width = config.columns.last_column() + 1;

    while builder.len() < config.max_records {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if line_no == 1 {
            continue;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let fields = split_csv_line(line);
        if fields.len() < width {
            short_rows += 1;
            debug!(line = line_no, fields = fields.len(), width, "short row; missing columns read as empty");
        }

        match record_from_fields(&fields, &config.columns) {
            Some(record) => {
                builder.index_record(record);
            }
            None => {
                skipped += 1;
                debug!(line = line_no, "skipping row without a title");
            }
        }
    }

    info!(records = builder.len(), skipped, short_rows, "catalog records loaded");
    Ok(builder)
}

/// Read records from a CSV file into a fresh builder.
pub fn load_path(path: &Path, config: &CatalogConfig) -> CatalogResult<CatalogBuilder> {
    info!(path = %path.display(), "loading catalog");
    let file = File::open(path)?;
    load_reader(BufReader::new(file), config)
}

/// Load a CSV file and build the similarity graph.
pub fn load_catalog(path: &Path, config: &CatalogConfig) -> CatalogResult<Catalog> {
    Ok(load_path(path, config)?.finish())
}
