//! Mode-based consistency evaluation over one attempt's buffer.
//!
//! The buffer's values are already rounded to a tenth, so "exact value"
//! grouping compares the integer tenths key. Scan order is first-appearance
//! order, which keeps tie-breaking deterministic.

use crate::sample::Sample;

/// The value judged to be the scale's true reading for an attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub value: f64,
    pub unit: String,
}

struct Group<'a> {
    key: i32,
    value: f64,
    unit: &'a str,
    count: usize,
}

/// Pick the dominant value of the buffer, if any.
///
/// - Exactly one value with the maximal occurrence count: that value wins
///   unconditionally; the caller decides whether it deserves a warning.
/// - Several values tied at the maximum: the first tied value (in
///   first-appearance order) that passes [`distribution_valid`] wins.
/// - None of the tied values pass: no peak; the supervisor may extend.
///
/// The unit reported is the one from the value's first occurrence.
pub fn peak_sample(samples: &[Sample], tolerance: f64, sample_size: usize) -> Option<Peak> {
    let mut groups: Vec<Group> = Vec::new();
    for s in samples {
        let key = s.key();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(g) => g.count += 1,
            None => groups.push(Group {
                key,
                value: s.value,
                unit: &s.unit,
                count: 1,
            }),
        }
    }

    let max_count = groups.iter().map(|g| g.count).max()?;
    let tied: Vec<&Group> = groups.iter().filter(|g| g.count == max_count).collect();

    if tied.len() == 1 {
        let g = tied[0];
        return Some(Peak {
            value: g.value,
            unit: g.unit.to_string(),
        });
    }
    for g in tied {
        if distribution_valid(samples, g.value, tolerance, sample_size) {
            return Some(Peak {
                value: g.value,
                unit: g.unit.to_string(),
            });
        }
    }
    None
}

/// Samples within `tolerance` of `candidate`.
#[inline]
pub fn agreement_count(samples: &[Sample], candidate: f64, tolerance: f64) -> usize {
    samples
        .iter()
        .filter(|s| (s.value - candidate).abs() <= tolerance)
        .count()
}

/// The acceptance gate: enough of the buffer agrees with `candidate`.
#[inline]
pub fn distribution_valid(
    samples: &[Sample],
    candidate: f64,
    tolerance: f64,
    sample_size: usize,
) -> bool {
    agreement_count(samples, candidate, tolerance) >= sample_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .map(|&value| Sample {
                value,
                unit: "kg".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_buffer_has_no_peak() {
        assert_eq!(peak_sample(&[], 0.2, 5), None);
    }

    #[test]
    fn single_mode_wins_even_when_agreement_is_low() {
        // 12.0 appears three times, everything else once; agreement with
        // 12.0 within 0.2 is only 3 < 5, yet the single mode is the peak.
        let samples = buf(&[12.0, 12.0, 25.4, 30.1, 12.0]);
        let peak = peak_sample(&samples, 0.2, 5).expect("peak");
        assert_eq!(peak.value, 12.0);
        assert_eq!(agreement_count(&samples, peak.value, 0.2), 3);
        assert!(!distribution_valid(&samples, peak.value, 0.2, 5));
    }

    #[test]
    fn consistent_buffer_passes_the_gate() {
        let samples = buf(&[12.0, 12.1, 12.0, 12.0, 25.4, 12.0]);
        let peak = peak_sample(&samples, 0.2, 5).expect("peak");
        assert_eq!(peak.value, 12.0);
        assert_eq!(agreement_count(&samples, 12.0, 0.2), 5);
        assert!(distribution_valid(&samples, 12.0, 0.2, 5));
    }

    #[test]
    fn tie_with_no_tolerance_support_yields_nothing() {
        let samples = buf(&[10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
        assert_eq!(peak_sample(&samples, 0.2, 5), None);
    }

    #[test]
    fn tie_break_validates_candidates_in_first_appearance_order() {
        // Both 10.0 and 10.3 occur twice. With tolerance 0.4 each candidate
        // gathers all four samples, so the earlier value must win.
        let samples = buf(&[10.3, 10.0, 10.3, 10.0]);
        let peak = peak_sample(&samples, 0.4, 4).expect("peak");
        assert_eq!(peak.value, 10.3);
    }

    #[test]
    fn tie_break_skips_candidates_that_fail_the_gate() {
        // 1.0 and 9.0 are tied at two occurrences. Tolerance 0.5 around 1.0
        // collects only the two 1.0 samples; around 9.0 it also collects
        // 9.4, reaching the required three. The first tied candidate is
        // passed over, the second wins.
        let samples = buf(&[1.0, 9.0, 1.0, 9.0, 9.4]);
        let peak = peak_sample(&samples, 0.5, 3).expect("peak");
        assert_eq!(peak.value, 9.0);
    }

    #[test]
    fn unit_comes_from_the_first_occurrence() {
        let samples = vec![
            Sample {
                value: 12.0,
                unit: "kg".to_string(),
            },
            Sample {
                value: 12.0,
                unit: "g".to_string(),
            },
        ];
        let peak = peak_sample(&samples, 0.2, 1).expect("peak");
        assert_eq!(peak.unit, "kg");
    }

    #[test]
    fn agreement_is_inclusive_at_the_tolerance_boundary() {
        let samples = buf(&[12.0, 12.2]);
        assert_eq!(agreement_count(&samples, 12.0, 0.2), 2);
        assert_eq!(agreement_count(&samples, 12.0, 0.1), 1);
    }
}
