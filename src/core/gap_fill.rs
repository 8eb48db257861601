use super::round2;
use crate::models::DailySeries;

/// Zero runs up to this length are treated as missed logging days.
pub const MAX_GAP_DAYS: usize = 2;

/// Interpolate short runs of zero days between their non-zero neighbours.
///
/// For a zero run starting at `i` and ending before the next non-zero point
/// `j`, each `k` in `i..j` becomes `prev + (next - prev) * t` with
/// `t = (k - (i - 1)) / (j - (i - 1))`. A run at the very start of the series
/// takes `next` as its left neighbour. Longer runs, and runs with no non-zero
/// point after them, are kept as real zero-sales days.
///
/// This cannot tell a closed shop from a day nobody logged; it only papers
/// over isolated misses.
///
/// Returns the number of days filled.
pub fn fill_short_gaps(series: &mut DailySeries) -> usize {
    let n = series.len();
    let mut filled = 0;
    let mut i = 0;

    while i < n {
        if series[i].value != 0.0 {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < n && series[j].value == 0.0 {
            j += 1;
        }

        let run = j - i;
        if j < n && run <= MAX_GAP_DAYS {
            let next = series[j].value;
            let prev = if i > 0 { series[i - 1].value } else { next };
            let anchor = i as f64 - 1.0;
            let gap = j as f64 - anchor;

            for k in i..j {
                let t = (k as f64 - anchor) / gap;
                series.set_value(k, round2(prev + (next - prev) * t));
            }
            filled += run;
        }

        i = j;
    }

    filled
}
