//! Character-budget wrapping for sunburst labels.
//!
//! All functions count Unicode scalar values, not bytes, and are deterministic.

const ELLIPSIS: char = '…';

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Names longer than `max_chars` are cut to `keep` characters plus `...`.
pub fn truncate_label(text: &str, max_chars: usize, keep: usize) -> String {
    if char_len(text) <= max_chars {
        return text.to_string();
    }
    let mut out = text.chars().take(keep).collect::<String>();
    out.push_str("...");
    out
}

/// Cuts `word` to at most `budget` characters, the last one being `…`.
pub fn truncate_word(word: &str, budget: usize) -> String {
    if char_len(word) <= budget {
        return word.to_string();
    }
    let keep = budget.saturating_sub(1);
    let mut out = word.chars().take(keep).collect::<String>();
    out.push(ELLIPSIS);
    out
}

/// Two-line split for category names.
///
/// Line 1 takes words while its length stays within half of the total character count (the first
/// word always goes on line 1); line 2 gets the rest. If line 2 would be empty the split falls back
/// to the midpoint word index.
pub fn balanced_two_line_wrap(text: &str) -> Vec<String> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    if words.len() < 2 {
        return vec![words.first().copied().unwrap_or_default().to_string()];
    }

    let half = char_len(text) / 2;
    let mut split = 1usize;
    let mut line_len = char_len(words[0]);
    while split < words.len() {
        let next = line_len + 1 + char_len(words[split]);
        if next > half {
            break;
        }
        line_len = next;
        split += 1;
    }
    if split >= words.len() {
        split = words.len() / 2;
    }

    vec![words[..split].join(" "), words[split..].join(" ")]
}

/// Greedy word wrap into at most `max_lines` lines of at most `budget` characters.
///
/// A word longer than the budget gets a line of its own, truncated with `…`. When the text needs
/// more than `max_lines` lines the last kept line ends in `…`.
pub fn wrap_to_budget(text: &str, budget: usize, max_lines: usize) -> Vec<String> {
    let budget = budget.max(1);
    let max_lines = max_lines.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = char_len(word);
        if word_len > budget {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(truncate_word(word, budget));
            continue;
        }
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = if char_len(last) < budget {
                format!("{last}{ELLIPSIS}")
            } else {
                let keep = budget.saturating_sub(1);
                let mut cut = last.chars().take(keep).collect::<String>();
                cut.push(ELLIPSIS);
                cut
            };
        }
    }
    lines
}
