use crate::error::Error;
use crate::naming;
use calamine::{open_workbook_auto, Reader};
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// One student from the roster. A blank cell leaves the field `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
}

impl RosterEntry {
    pub fn new(student_id: &str, student_name: &str) -> Self {
        Self {
            student_id: Some(student_id.to_string()),
            student_name: Some(student_name.to_string()),
        }
    }

    /// `"{id} ({name})"`, or `None` when either field is absent.
    pub fn folder_name(&self) -> Option<String> {
        match (&self.student_id, &self.student_name) {
            (Some(id), Some(name)) => Some(naming::expected_folder_name(id, name)),
            _ => None,
        }
    }
}

/// Spreadsheet exports render numeric ids as `1001.0`; fold those back to `1001`.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some((whole, fraction)) = trimmed.split_once('.') {
        if !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && !fraction.is_empty()
            && fraction.chars().all(|c| c == '0')
        {
            return whole.to_string();
        }
    }
    trimmed.to_string()
}

/// Load the roster from a spreadsheet (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) or a
/// CSV file, both with a header row.
///
/// Rows keep file order. Fully blank rows are dropped and repeated ids are
/// skipped (first row wins); rows missing only one field are kept so the
/// consolidator can reject them.
pub fn load_roster(
    path: &Path,
    id_column: &str,
    name_column: &str,
) -> Result<Vec<RosterEntry>, Error> {
    if !path.is_file() {
        return Err(Error::RosterNotFound(path.to_path_buf()));
    }

    let table = if is_spreadsheet(path) {
        read_spreadsheet(path)?
    } else {
        read_csv(path)?
    };

    let id_idx = column_index(&table.headers, id_column).ok_or_else(|| Error::MissingColumn {
        path: path.to_path_buf(),
        column: id_column.to_string(),
    })?;
    let name_idx =
        column_index(&table.headers, name_column).ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: name_column.to_string(),
        })?;

    let mut entries = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (i, row) in table.rows.iter().enumerate() {
        let line = table.first_line + 1 + i;

        let student_id = row
            .get(id_idx)
            .map(|s| normalize_id(s))
            .filter(|s| !s.is_empty());
        let student_name = row
            .get(name_idx)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if student_id.is_none() && student_name.is_none() {
            debug!("Skipping blank roster line {}", line);
            continue;
        }

        if let Some(id) = &student_id {
            if !seen_ids.insert(id.clone()) {
                warn!("Duplicate student id '{}' on roster line {}, skipping", id, line);
                continue;
            }
        }

        entries.push(RosterEntry {
            student_id,
            student_name,
        });
    }

    info!("Loaded {} students from {}", entries.len(), path.display());
    Ok(entries)
}

/// Header plus data rows as text, whatever the source format.
struct RosterTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// 1-based line of the header row.
    first_line: usize,
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn read_csv(path: &Path) -> Result<RosterTable, Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;

    Ok(RosterTable {
        headers,
        rows,
        first_line: 1,
    })
}

/// First worksheet; the first row of its used range is the header.
fn read_spreadsheet(path: &Path) -> Result<RosterTable, Error> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptySpreadsheet(path.to_path_buf()))??;

    // Numeric ids display as `1001`; `normalize_id` handles any `1001.0` left.
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or_else(|| Error::EmptySpreadsheet(path.to_path_buf()))?;
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    Ok(RosterTable {
        headers,
        rows: rows.collect(),
        first_line,
    })
}

fn column_index(headers: &[String], column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
}
