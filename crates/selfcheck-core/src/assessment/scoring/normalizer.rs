fn is_kept(ch: char) -> bool {
    ch.is_ascii_lowercase()
        || ch.is_ascii_digit()
        || ('а'..='я').contains(&ch)
        || matches!(ch, '%' | '₽')
}

/// Canonical form used on both rubric keywords and answer text before matching.
pub fn normalize_text(value: &str) -> String {
    let lowered = value.to_lowercase().replace('ё', "е");
    let cleaned: String = lowered
        .chars()
        .map(|ch| if is_kept(ch) { ch } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
