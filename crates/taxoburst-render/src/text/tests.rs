use super::*;

fn len(s: &str) -> usize {
    s.chars().count()
}

#[test]
fn deterministic_measurer_scales_with_font_size() {
    let measurer = DeterministicTextMeasurer::default();
    let m = measurer.measure("abcd", &TextStyle::sized(10.0));
    assert_eq!(m.width, 24.0);
    assert_eq!(m.height, 12.0);
    assert_eq!(m.line_count, 1);

    let m = measurer.measure("ab\nabcdef", &TextStyle::sized(10.0));
    assert_eq!(m.width, 36.0);
    assert_eq!(m.line_count, 2);
    assert_eq!(measurer.char_width(&TextStyle::sized(10.0)), 6.0);
}

#[test]
fn truncate_label_cuts_long_names() {
    assert_eq!(truncate_label("short", 30, 27), "short");
    let name = "a".repeat(31);
    let out = truncate_label(&name, 30, 27);
    assert_eq!(out, format!("{}...", "a".repeat(27)));
    assert_eq!(truncate_label(&"b".repeat(30), 30, 27), "b".repeat(30));
}

#[test]
fn balanced_wrap_splits_near_half() {
    // 28 chars, half = 14: "Harmful content" (15) would overflow.
    assert_eq!(
        balanced_two_line_wrap("Harmful content generation X"),
        vec!["Harmful", "content generation X"]
    );
    assert_eq!(
        balanced_two_line_wrap("Loss of human oversight and control"),
        vec!["Loss of human", "oversight and control"]
    );
}

#[test]
fn balanced_wrap_keeps_first_word_on_line_one() {
    let lines = balanced_two_line_wrap("Extraordinarilylongword a b");
    assert_eq!(lines, vec!["Extraordinarilylongword", "a b"]);
    assert_eq!(balanced_two_line_wrap("single"), vec!["single"]);
}

#[test]
fn wrap_to_budget_respects_budget_and_line_cap() {
    let lines = wrap_to_budget("Model weight exfiltration via side channels", 12, 3);
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(len(line) <= 12, "{line:?} exceeds budget");
    }
    assert!(lines[2].ends_with('…'));

    assert_eq!(
        wrap_to_budget("Prompt injection", 20, 3),
        vec!["Prompt injection"]
    );
}

#[test]
fn wrap_to_budget_truncates_oversized_words_alone() {
    let lines = wrap_to_budget("a Supercalifragilistic b", 8, 3);
    assert_eq!(lines, vec!["a", "Superca…", "b"]);
}

#[test]
fn wrap_is_deterministic() {
    let text = "Autonomous replication and resource acquisition";
    for budget in 1..30 {
        let a = wrap_to_budget(text, budget, 3);
        let b = wrap_to_budget(text, budget, 3);
        assert_eq!(a, b);
        assert!(a.len() <= 3);
        for line in &a {
            assert!(len(line) <= budget.max(1));
        }
    }
}
