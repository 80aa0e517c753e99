//! Text bar charts for per-method metrics

/// Width of a full bar in characters
pub const DEFAULT_BAR_WIDTH: usize = 40;

const FULL: char = '█';

/// One row of a horizontal bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    /// Method label
    pub label: String,
    /// Raw value
    pub value: f64,
    /// Bar length in characters
    pub length: usize,
    /// Whether this row is the metric's champion
    pub champion: bool,
}

impl BarRow {
    /// The bar itself
    pub fn bar(&self) -> String {
        FULL.to_string().repeat(self.length)
    }
}

/// Scale `entries` against the largest value, marking row `champion`.
///
/// The champion comes from [`Champions`](crate::scoring::Champions) so the
/// chart and the report never disagree. Any non-zero value gets at least one
/// character so it stays visible next to a much larger one.
///
/// ```
/// use iris_cli::report::chart::bar_rows;
///
/// let rows = bar_rows(&[("ML", 50.0), ("O2", 100.0)], Some(0), 10);
/// assert_eq!(rows[0].length, 5);
/// assert_eq!(rows[1].length, 10);
/// assert!(rows[0].champion);
/// ```
pub fn bar_rows(entries: &[(&str, f64)], champion: Option<usize>, width: usize) -> Vec<BarRow> {
    let max = entries
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);

    entries
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let length = if max <= 0.0 || *value <= 0.0 {
                0
            } else {
                ((value / max) * width as f64).round().max(1.0) as usize
            };
            BarRow {
                label: (*label).to_string(),
                value: *value,
                length,
                champion: champion == Some(index),
            }
        })
        .collect()
}
