// Primitives shared by the CSV readers.

use std::collections::HashMap;

use crate::dash::*;

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// The position of each named column in a CSV header.
#[derive(Debug, Clone)]
pub struct Columns {
    path: String,
    indexes: HashMap<String, usize>,
    names: Vec<String>,
}

impl Columns {
    pub fn from_header(path: &Path, header: &csv::StringRecord) -> Columns {
        let names: Vec<String> = header
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let mut indexes: HashMap<String, usize> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            // First one wins on duplicated names
            indexes.entry(name.clone()).or_insert(idx);
        }
        debug!("Columns::from_header: {}: {:?}", path.display(), names);
        Columns {
            path: path.display().to_string(),
            indexes,
            names,
        }
    }

    pub fn index(&self, column: &str) -> DashResult<usize> {
        self.optional(column).context(MissingColumnSnafu {
            path: self.path.clone(),
            column,
        })
    }

    pub fn optional(&self, column: &str) -> Option<usize> {
        self.indexes.get(column).cloned()
    }

    /// The first of several accepted names for the same column.
    pub fn index_of_any(&self, columns: &[&str]) -> DashResult<usize> {
        match columns.iter().find_map(|c| self.optional(c)) {
            Some(idx) => Ok(idx),
            None => MissingColumnSnafu {
                path: self.path.clone(),
                column: columns.join(" or "),
            }
            .fail(),
        }
    }

    /// The columns starting with `prefix`, as (name without the prefix, index).
    pub fn with_prefix(&self, prefix: &str) -> Vec<(String, usize)> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| name.strip_prefix(prefix).map(|n| (n.to_string(), idx)))
            .collect()
    }
}

/// Reads a vote indicator. The exports contain either booleans (`True`,
/// `False`) or numbers between 0 and 1 (`1.0`, `0`). An empty cell counts as
/// zero.
pub fn parse_flag(s: &str) -> Option<f64> {
    let t = s.trim();
    match t.to_lowercase().as_str() {
        "" => Some(0.0),
        "true" => Some(1.0),
        "false" => Some(0.0),
        _ => t
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite() && (0.0..=1.0).contains(x)),
    }
}

/// Reads a non-negative count, also accepted in the float form (`101.0`).
pub fn parse_count(s: &str) -> Option<u64> {
    let t = s.trim();
    if let Ok(x) = t.parse::<u64>() {
        return Some(x);
    }
    match t.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f.is_finite() => Some(f as u64),
        _ => None,
    }
}

/// Reads a `YYYY-MM-DD` date. Anything after the day (a time) is ignored.
/// Invalid calendar dates are rejected.
pub fn parse_vote_date(s: &str) -> Option<VoteDate> {
    let day_part = s.trim().get(0..10)?;
    let mut elts = day_part.split('-');
    let year = elts.next()?.parse::<i32>().ok()?;
    let month = elts.next()?.parse::<u32>().ok()?;
    let day = elts.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some(VoteDate { year, month, day })
}
