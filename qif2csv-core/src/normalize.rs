//! Field cleanup applied before values land in comma-delimited output.

/// Remove every comma. Output rows are never quoted, so commas cannot survive.
pub fn strip_commas(s: &str) -> String {
    s.replace(',', "")
}

/// Trim surrounding whitespace and strip commas.
pub fn prepare_field(s: &str) -> String {
    strip_commas(s.trim())
}

/// Build a `YYYY-MM-DD` date from QIF's `M/D'YY` components.
///
/// The year is always placed in the 2000s. Month and day are padded with a
/// single `0` and cut to their last two characters.
pub fn normalize_date(month: &str, day: &str, year: &str) -> String {
    format!(
        "20{}-{}-{}",
        year.trim(),
        last_two(month.trim()),
        last_two(day.trim())
    )
}

fn last_two(component: &str) -> String {
    let padded = format!("0{component}");
    let start = padded
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    padded[start..].to_string()
}
