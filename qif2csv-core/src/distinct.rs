/// Sort ascending by byte order, drop duplicates and blank entries.
pub fn dedupe_sorted<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = values.into_iter().map(Into::into).collect();
    out.sort();
    out.dedup();
    out.retain(|v| !v.trim().is_empty());
    out
}
