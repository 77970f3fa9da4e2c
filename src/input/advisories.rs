use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::model::CompromiseRecord;

/// Accepted header names for the version-range column, checked in order.
const RANGE_HEADERS: [&str; 4] = ["version_range", "versions", "range", "version"];

/// Reads a compromised-package advisory list from a CSV file.
///
/// The first row is a header; lookup is case-insensitive. A `package`
/// column is required, the range column may use any name from
/// `RANGE_HEADERS`, and a `notes` column is optional. Record order
/// follows row order.
pub fn load_advisories(path: &Path) -> Result<Vec<CompromiseRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read advisory list: {}", path.display()))?;
    parse_advisories(&content)
        .with_context(|| format!("failed to parse advisory list: {}", path.display()))
}

fn parse_advisories(content: &str) -> Result<Vec<CompromiseRecord>> {
    let mut lines = content.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break parse_row(line),
            None => bail!("advisory list is empty"),
        }
    };

    let columns: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    let package_col = columns
        .iter()
        .position(|c| c == "package")
        .context("advisory list has no 'package' column")?;
    let range_col = RANGE_HEADERS
        .iter()
        .find_map(|name| columns.iter().position(|c| c == name));
    let notes_col = columns.iter().position(|c| c == "notes");

    let mut records = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_row(line);

        let field = |col: Option<usize>| {
            col.and_then(|i| fields.get(i))
                .map(|f| f.trim().to_string())
                .unwrap_or_default()
        };

        let package = field(Some(package_col));
        if package.is_empty() {
            warn!(line = line_no + 1, "advisory row without package name");
        }

        let notes = Some(field(notes_col)).filter(|n| !n.is_empty());

        records.push(CompromiseRecord {
            package,
            version_range: field(range_col),
            notes,
        });
    }

    Ok(records)
}

/// Splits one CSV row. Fields may be quoted; quoted fields may contain
/// commas and doubled quotes.
fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
