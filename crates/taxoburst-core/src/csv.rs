//! Line/column splitter for the taxonomy CSV export.
//!
//! The format is deliberately simple: line 1 is ignorable, line 2 is the header, and each data
//! row is `[unused], L1, L2, L3, example, <one column per framework>`. A `"` toggles quoted state
//! so commas inside quotes stay in the field, but embedded quotes are not escaped (`""` is not
//! special); fields keep any inner quote characters verbatim.

use crate::model::{Framework, FrameworkSet};

const COL_CATEGORY: usize = 1;
const COL_SUBCATEGORY: usize = 2;
const COL_ITEM: usize = 3;
const COL_EXAMPLE: usize = 4;
const COL_FIRST_FRAMEWORK: usize = 5;

const CHECKMARKS: [&str; 3] = ["✓", "✔", "✅"];

/// One data row before validation. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item: Option<String>,
    pub example: Option<String>,
    pub frameworks: FrameworkSet,
}

pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                cur.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(clean_field(&cur));
                cur.clear();
            }
            _ => cur.push(ch),
        }
    }
    fields.push(clean_field(&cur));
    fields
}

fn clean_field(raw: &str) -> String {
    let t = raw.trim();
    let t = t.strip_prefix('"').unwrap_or(t);
    let t = t.strip_suffix('"').unwrap_or(t);
    t.trim().to_string()
}

pub fn is_checkmark(cell: &str) -> bool {
    let t = cell.trim();
    CHECKMARKS.contains(&t)
}

fn non_empty(fields: &[String], idx: usize) -> Option<String> {
    fields
        .get(idx)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn record_from_fields(fields: &[String]) -> RawRecord {
    let mut frameworks = FrameworkSet::empty();
    for (offset, framework) in Framework::ALL.into_iter().enumerate() {
        if fields
            .get(COL_FIRST_FRAMEWORK + offset)
            .is_some_and(|cell| is_checkmark(cell))
        {
            frameworks.insert(framework);
        }
    }

    RawRecord {
        category: non_empty(fields, COL_CATEGORY),
        subcategory: non_empty(fields, COL_SUBCATEGORY),
        item: non_empty(fields, COL_ITEM),
        example: non_empty(fields, COL_EXAMPLE),
        frameworks,
    }
}

/// Splits the whole file into raw records. No validation happens here; rows with missing names
/// are dropped later by the tree builder.
pub fn parse_records(text: &str) -> Vec<RawRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut out = Vec::new();
    for line in text.lines().skip(2) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        out.push(record_from_fields(&split_csv_line(line)));
    }
    tracing::debug!(rows = out.len(), "split taxonomy CSV");
    out
}
