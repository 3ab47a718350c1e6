//! Text helpers shared by the renderers.

/// Word-form bucket for a count: 0 singular, 1 few, 2 many.
///
/// Counts ending in 11..=19 take the many form, otherwise the last digit
/// decides: 1 singular, 2..=4 few, everything else many.
pub fn plural_bucket(n: i64) -> usize {
    const CASES: [usize; 6] = [2, 0, 1, 1, 1, 2];
    let n = n.unsigned_abs();
    if (5..20).contains(&(n % 100)) {
        2
    } else {
        CASES[(n % 10).min(5) as usize]
    }
}

/// `"<n> <word>"` with the word form picked by [`plural_bucket`].
pub fn count_with_word(n: i64, forms: &[String; 3]) -> String {
    format!("{} {}", n, forms[plural_bucket(n)])
}

/// Badge text for an item count: `None` when the badge should be hidden,
/// `"<cap>+"` above the cap.
pub fn badge_text(count: i64, cap: i64) -> Option<String> {
    if count <= 0 {
        None
    } else if count > cap {
        Some(format!("{}+", cap))
    } else {
        Some(count.to_string())
    }
}

/// Escape text for HTML content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
