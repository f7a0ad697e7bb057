use regex::Regex;
use std::sync::OnceLock;

/// Sentence ends: Latin punctuation or the Devanagari danda, followed by whitespace
fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?।॥]+\s+").expect("sentence pattern is valid"))
}

/// Split text into batches of at most `max_chars` characters, preferring
/// sentence boundaries. Text without boundaries is cut on character
/// boundaries, never inside a UTF-8 sequence.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current = String::new();
    let mut last_end = 0;

    let push_piece = |piece: &str, current: &mut String, batches: &mut Vec<String>| {
        if !current.is_empty() && current.chars().count() + piece.chars().count() > max_chars {
            batches.push(current.trim().to_string());
            current.clear();
        }
        if piece.chars().count() > max_chars {
            let chars: Vec<char> = piece.chars().collect();
            for chunk in chars.chunks(max_chars) {
                batches.push(chunk.iter().collect());
            }
        } else {
            current.push_str(piece);
        }
    };

    for mat in sentence_pattern().find_iter(text) {
        push_piece(&text[last_end..mat.end()], &mut current, &mut batches);
        last_end = mat.end();
    }
    if last_end < text.len() {
        push_piece(&text[last_end..], &mut current, &mut batches);
    }
    if !current.trim().is_empty() {
        batches.push(current.trim().to_string());
    }

    batches.retain(|b| !b.trim().is_empty());
    batches
}
