use nalgebra::Vector3;
use precip_common::{filter::Filter, Result};

use crate::{Label, Vote};

/// Counts of one labeling run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    pub total: usize,
    pub valid: usize,
    pub precipitation: usize,
    /// Points rejected by statistical outlier removal.
    pub removed_by_sor: usize,
    /// Points beyond the maximum distance.
    pub gated: usize,
}

impl LabelSummary {
    pub fn from_labels(labels: &[Label]) -> Self {
        let valid = labels.iter().filter(|&&label| label == Label::Valid).count();
        LabelSummary {
            total: labels.len(),
            valid,
            precipitation: labels.len() - valid,
            ..Default::default()
        }
    }
}

/// Scatters the resolved votes of the surviving points back onto `len`
/// rows. Rows that did not survive stay precipitation.
pub fn reassemble(len: usize, survivors: &[usize], votes: &[Vote]) -> Vec<Label> {
    debug_assert_eq!(survivors.len(), votes.len());
    let mut labels = vec![Label::Precipitation; len];
    for (&index, &vote) in survivors.iter().zip(votes) {
        labels[index] = Label::from(vote);
    }
    labels
}

/// Forces every point farther than `th_d` from the origin to precipitation
/// and returns how many points that concerned.
pub fn apply_distance_gate(
    labels: &mut [Label],
    points: &[Vector3<f64>],
    th_d: f64,
) -> Result<usize> {
    let mut within = |point: &Vector3<f64>| point.norm() <= th_d;
    let (_, far) = within.filter_all_indices(points)?;
    for &index in &far {
        labels[index] = Label::Precipitation;
    }
    Ok(far.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reassemble() {
        let votes = [Vote::Valid, Vote::Precip, Vote::Valid, Vote::Valid];
        let labels = reassemble(6, &[0, 2, 3, 5], &votes);
        assert_eq!(
            labels,
            vec![
                Label::Valid,
                Label::Precipitation,
                Label::Precipitation,
                Label::Valid,
                Label::Precipitation,
                Label::Valid,
            ]
        );

        let summary = LabelSummary::from_labels(&labels);
        assert_eq!((summary.total, summary.valid, summary.precipitation), (6, 3, 3));
    }

    #[test]
    fn test_distance_gate() {
        let mut labels = vec![Label::Valid; 4];
        let points = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 300.0, 0.0),
            Vector3::new(0.0, 0.0, 250.0),
            Vector3::new(200.0, 200.0, 0.0),
        ];
        let gated = apply_distance_gate(&mut labels, &points, 250.0).unwrap();
        assert_eq!(gated, 2);
        assert_eq!(
            labels,
            vec![
                Label::Valid,
                Label::Precipitation,
                Label::Valid,
                Label::Precipitation
            ]
        );
    }
}
