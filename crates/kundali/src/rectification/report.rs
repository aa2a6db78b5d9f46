use std::fmt::Write;

use crate::rectification::engine::RectificationCandidate;

/// Plain-text table of the first `limit` candidates.
pub fn render_table(candidates: &[RectificationCandidate], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<8}  {:>5}  {:<11}  {:<11}  {:<11}  {}",
        "#", "Time", "Score", "D9 Asc", "D10 Asc", "D24 Asc", "D60 Deity"
    );
    for (rank, candidate) in candidates.iter().take(limit).enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<8}  {:>5}  {:<11}  {:<11}  {:<11}  {}",
            rank + 1,
            candidate.clock_time(),
            candidate.score,
            candidate.d9_ascendant,
            candidate.d10_ascendant,
            candidate.d24_ascendant,
            candidate.d60_deity
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn renders_header_and_limited_rows() {
        let candidate = RectificationCandidate {
            time: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap().and_hms_opt(5, 0, 30).unwrap(),
            julian_day: 2_448_028.479,
            score: 42,
            d9_ascendant: "Leo".to_string(),
            d10_ascendant: "Aries".to_string(),
            d24_ascendant: "Cancer".to_string(),
            d60_deity: "Amrita".to_string(),
        };
        let table = render_table(&[candidate.clone(), candidate], 1);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("D60 Deity"));
        assert!(lines[1].contains("05:00:30"));
        assert!(lines[1].contains("42"));
        assert!(lines[1].ends_with("Amrita"));
    }
}
