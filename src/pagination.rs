/// Parse a raw `page` query value. Absent or non-numeric input means page 1.
pub fn page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(1)
}

/// Return the 1-indexed `page` of `items`, `page_size` items at a time.
///
/// Pages past the end (and page numbers below 1) are empty; this never fails.
pub fn paginate<T>(page: i64, page_size: usize, items: &[T]) -> &[T] {
    if page < 1 || page_size == 0 {
        return &[];
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size))
        .unwrap_or(usize::MAX);

    if start >= items.len() {
        return &[];
    }

    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
