use nalgebra::Vector3;
use precip_common::{
    feature::Feature, filter::Filter, point_cloud::PointTable, search::NeighborIndex, Error,
    Result,
};
use precip_features::NeighborhoodFeatures;
use precip_filters::StatOutlierRemoval;
use precip_kdtree::KdTree;

use crate::{
    discriminant::{combine, norm_m1p1},
    propagate::propagate,
    reassemble::{apply_distance_gate, reassemble, LabelSummary},
    vote::{seed_labels, Vote},
    Label, LabelerConfig,
};

/// Tables with at most this many rows are labeled valid without running the
/// pipeline.
pub const MIN_ROWS: usize = 3;

fn check_inputs(points: &[Vector3<f64>], intensities: &[f64], a: f64) -> Result<()> {
    if points.len() != intensities.len() {
        return Err(Error::InvalidShape {
            len: intensities.len(),
            width: points.len(),
        });
    }
    for (index, (point, &intensity)) in points.iter().zip(intensities).enumerate() {
        if !point.iter().all(|x| x.is_finite()) || !intensity.is_finite() {
            return Err(Error::NonFinite { index });
        }
        if !(intensity + a > 0.0) {
            return Err(Error::IntensityOutOfRange { index, intensity });
        }
    }
    Ok(())
}

/// Labels every point as precipitation or valid, using a k-d tree for the
/// neighbor queries.
///
/// `intensities` is aligned with `points`; the result is too.
pub fn label_precipitation(
    points: &[Vector3<f64>],
    intensities: &[f64],
    config: &LabelerConfig,
) -> Result<Vec<Label>> {
    label_precipitation_with::<KdTree<f64>>(points, intensities, config).map(|(labels, _)| labels)
}

/// Like [`label_precipitation`], also reporting how the labels came about.
pub fn label_precipitation_with_summary(
    points: &[Vector3<f64>],
    intensities: &[f64],
    config: &LabelerConfig,
) -> Result<(Vec<Label>, LabelSummary)> {
    label_precipitation_with::<KdTree<f64>>(points, intensities, config)
}

/// Runs the labeling pipeline with `S` answering the neighbor queries.
///
/// 1. Statistical outlier removal; rejected points are precipitation.
/// 2. Local shape of every survivor over its `k` nearest survivors.
/// 3. Discriminant from intensity and shape, normalized onto `[-1, 1]`.
/// 4. Seed labels from the two thresholds.
/// 5. Undecided seeds resolved by a vote over their neighborhoods.
/// 6. Labels scattered back, then the optional distance gate.
pub fn label_precipitation_with<S>(
    points: &[Vector3<f64>],
    intensities: &[f64],
    config: &LabelerConfig,
) -> Result<(Vec<Label>, LabelSummary)>
where
    S: NeighborIndex<f64> + Sync,
{
    config.validate()?;
    check_inputs(points, intensities, config.a)?;
    if points.is_empty() {
        return Ok((Vec::new(), LabelSummary::default()));
    }

    let all = S::from_points(points.to_vec());
    let (survivors, removed) =
        StatOutlierRemoval::new(config.sor_k, config.sor_ratio).filter_all_indices(&all)?;
    drop(all);
    log::debug!(
        "outlier removal kept {} of {} points",
        survivors.len(),
        points.len()
    );

    let surviving = S::from_points(survivors.iter().map(|&index| points[index]).collect());
    let features = NeighborhoodFeatures::new(config.distance_mode, config.min_range)
        .with_progress(config.print_progress)
        .compute(surviving.points(), &surviving, config.k)
        .map_err(|e| e.remap_index(|i| survivors.get(i).copied().unwrap_or(i)))?;

    let intensities_filt = { survivors.iter() }
        .map(|&index| intensities[index])
        .collect::<Vec<_>>();
    let normalized = norm_m1p1(&combine(&features.shapes, &intensities_filt, config));

    let seeds = seed_labels(&normalized, config.th_ns, config.th_s);
    let count = |vote: Vote| seeds.iter().filter(|&&seed| seed == vote).count();
    log::debug!(
        "seeded {} precipitation, {} valid, {} undecided",
        count(Vote::Precip),
        count(Vote::Valid),
        count(Vote::Undecided)
    );

    let votes = propagate(&seeds, &features.neighborhoods);
    let resolved = |vote: Vote| {
        { seeds.iter().zip(&votes) }
            .filter(|&(&seed, &outcome)| seed == Vote::Undecided && outcome == vote)
            .count()
    };
    log::debug!(
        "propagation resolved {} undecided points to valid, {} to precipitation",
        resolved(Vote::Valid),
        resolved(Vote::Precip)
    );
    let mut labels = reassemble(points.len(), &survivors, &votes);

    let gated = match config.th_d {
        Some(th_d) => apply_distance_gate(&mut labels, points, th_d)?,
        None => 0,
    };

    let summary = LabelSummary {
        removed_by_sor: removed.len(),
        gated,
        ..LabelSummary::from_labels(&labels)
    };
    log::info!(
        "labeled {} points: {} valid, {} precipitation ({} removed as outliers, {} beyond max distance)",
        summary.total,
        summary.valid,
        summary.precipitation,
        summary.removed_by_sor,
        summary.gated
    );

    Ok((labels, summary))
}

/// Appends a 0/1 precipitation label as the last column of `table`, whose
/// rows are `[timestamp, x, y, z, intensity, ...]`.
///
/// An empty table comes back unchanged, without the extra column. Tables of
/// at most [`MIN_ROWS`] rows are labeled valid throughout, since their
/// neighborhoods carry no shape; `config` is only checked for larger tables.
pub fn add_precip_label(table: &PointTable, config: &LabelerConfig) -> Result<PointTable> {
    add_precip_label_with_summary(table, config).map(|(table, _)| table)
}

pub fn add_precip_label_with_summary(
    table: &PointTable,
    config: &LabelerConfig,
) -> Result<(PointTable, LabelSummary)> {
    let rows = table.height();
    if rows == 0 {
        return Ok((table.clone(), LabelSummary::default()));
    }

    let (labels, summary) = if rows <= MIN_ROWS {
        let labels = vec![Label::Valid; rows];
        let summary = LabelSummary::from_labels(&labels);
        (labels, summary)
    } else {
        config.validate()?;
        table.check_columns()?;
        label_precipitation_with_summary(&table.coords(), &table.intensities(), config)?
    };

    let values = labels.iter().map(|label| label.as_f64()).collect::<Vec<_>>();
    Ok((table.append_column(&values)?, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_inputs() {
        let points = [Vector3::new(1.0, 2.0, 3.0); 3];
        assert!(check_inputs(&points, &[0.5, -0.2, 0.0], 1.0).is_ok());
        assert!(check_inputs(&points, &[-3.0, -2.5, -2.9], 4.0).is_ok());

        assert_eq!(
            check_inputs(&points, &[0.5, -1.0, 0.0], 1.0),
            Err(Error::IntensityOutOfRange {
                index: 1,
                intensity: -1.0
            })
        );
        assert_eq!(
            check_inputs(&points, &[0.5, 0.0, -2.0], 1.0),
            Err(Error::IntensityOutOfRange {
                index: 2,
                intensity: -2.0
            })
        );
        assert_eq!(
            check_inputs(&points, &[0.5, f64::INFINITY, 0.0], 1.0),
            Err(Error::NonFinite { index: 1 })
        );
    }
}
