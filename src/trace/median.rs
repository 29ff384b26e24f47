/// Median of `values`, averaging the two middle elements for even lengths.
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Representative row of one column of candidate rows.
///
/// Candidates with a row index below the column median are discarded and the
/// median of the survivors is returned. Columns where the curve overlaps
/// itself vertically (near-vertical segments) are only approximated.
pub(crate) fn column_row(rows: &[usize]) -> Option<f64> {
    let rows: Vec<f64> = rows.iter().map(|&r| r as f64).collect();
    let centre = median(&rows)?;
    let kept: Vec<f64> = rows.into_iter().filter(|&r| r >= centre).collect();
    median(&kept)
}
