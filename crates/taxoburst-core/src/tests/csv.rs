use super::SAMPLE_CSV;
use crate::csv::{is_checkmark, parse_records, split_csv_line};
use crate::model::Framework;

#[test]
fn split_keeps_commas_inside_quotes() {
    let fields = split_csv_line(r#"1,Misuse,"Bio, chem",Item,"a, b""#);
    assert_eq!(fields, vec!["1", "Misuse", "Bio, chem", "Item", "a, b"]);
}

#[test]
fn split_does_not_unescape_doubled_quotes() {
    // `""` is not an escape sequence in this format; the inner quotes survive verbatim.
    let fields = split_csv_line(r#"x,"say ""hi""",y"#);
    assert_eq!(fields, vec!["x", r#"say ""hi"""#, "y"]);
}

#[test]
fn split_trims_whitespace_and_keeps_trailing_empty_field() {
    let fields = split_csv_line(" a , b ,");
    assert_eq!(fields, vec!["a", "b", ""]);
}

#[test]
fn checkmark_sentinels() {
    assert!(is_checkmark("✓"));
    assert!(is_checkmark(" ✔ "));
    assert!(is_checkmark("✅"));
    assert!(!is_checkmark(""));
    assert!(!is_checkmark("yes"));
}

#[test]
fn parse_records_skips_preamble_and_header() {
    let records = parse_records(SAMPLE_CSV);
    assert_eq!(records.len(), 5);

    let first = &records[0];
    assert_eq!(first.category.as_deref(), Some("Misuse"));
    assert_eq!(first.subcategory.as_deref(), Some("Cyber"));
    assert_eq!(first.item.as_deref(), Some("Malware generation"));
    assert_eq!(first.example.as_deref(), Some("Writes ransomware on request"));
    assert!(first.frameworks.contains(Framework::EuAiAct));
    assert!(!first.frameworks.contains(Framework::NistAiRmf));
    assert!(first.frameworks.contains(Framework::Iso42001));
    assert!(first.frameworks.contains(Framework::MitreAtlas));

    assert_eq!(records[1].example, None);
    assert_eq!(records[2].subcategory.as_deref(), Some("Bio, chem"));
    assert_eq!(records[4].category, None);
}

#[test]
fn parse_records_tolerates_short_rows_and_blank_lines() {
    let text = "\nL0,L1,L2,L3\n\n9,Cat,Sub,Item\r\n";
    let records = parse_records(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].item.as_deref(), Some("Item"));
    assert_eq!(records[0].example, None);
    assert!(records[0].frameworks.is_empty());
}
