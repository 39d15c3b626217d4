use precip_features::LocalShape;

use crate::LabelerConfig;

/// Precipitation score of one point: dim, sparse and non-planar returns
/// score high.
///
/// The mean neighbor distance is clipped at `th_md` first so a few very
/// sparse neighborhoods cannot dominate the normalization.
#[inline]
pub fn discriminant(shape: &LocalShape<f64>, intensity: f64, config: &LabelerConfig) -> f64 {
    let mean_distance = shape.mean_distance.min(config.th_md);
    (1.0 / (intensity + config.a))
        * (mean_distance + config.b)
        * (shape.variance_ratio() + config.c)
}

/// Discriminant of every point, aligned with `shapes` and `intensities`.
pub fn combine(shapes: &[LocalShape<f64>], intensities: &[f64], config: &LabelerConfig) -> Vec<f64> {
    debug_assert_eq!(shapes.len(), intensities.len());
    { shapes.iter().zip(intensities) }
        .map(|(shape, &intensity)| discriminant(shape, intensity, config))
        .collect()
}

/// Min-max normalization onto `[-1, 1]`.
///
/// A constant input carries no information and maps to all zeros.
pub fn norm_m1p1(values: &[f64]) -> Vec<f64> {
    let (min, max) = { values.iter() }.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &x| {
        (min.min(x), max.max(x))
    });

    if values.is_empty() || max == min {
        return vec![0.0; values.len()];
    }

    let span = max - min;
    values.iter().map(|&x| -1.0 + 2.0 * (x - min) / span).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    fn shape(mean_distance: f64, eigenvalues: [f64; 3]) -> LocalShape<f64> {
        LocalShape {
            eigenvalues: Vector3::from(eigenvalues),
            mean_distance,
        }
    }

    #[test]
    fn test_discriminant() {
        let config = LabelerConfig::default();
        // variance ratio 1 / 4
        let s = shape(0.1, [2.0, 1.0, 1.0]);
        assert_relative_eq!(discriminant(&s, 1.0, &config), 0.5 * 10.1 * 1.25);

        // clipped at th_md
        let sparse = shape(3.0, [2.0, 1.0, 1.0]);
        assert_relative_eq!(discriminant(&sparse, 1.0, &config), 0.5 * 10.5 * 1.25);
    }

    #[test]
    fn test_dim_points_score_higher() {
        let config = LabelerConfig::default();
        let s = shape(0.2, [3.0, 2.0, 0.5]);
        let dim = discriminant(&s, 0.0, &config);
        let bright = discriminant(&s, 1.0, &config);
        assert!(dim > bright);
        assert_relative_eq!(dim, 2.0 * bright);

        let planar = shape(0.2, [3.0, 2.0, 0.0]);
        assert!(discriminant(&planar, 0.5, &config) < discriminant(&s, 0.5, &config));
    }

    #[test]
    fn test_norm_m1p1() {
        let normalized = norm_m1p1(&[3.0, 1.0, 2.0, 5.0]);
        assert_relative_eq!(normalized[0], 0.0);
        assert_relative_eq!(normalized[1], -1.0);
        assert_relative_eq!(normalized[2], -0.5);
        assert_relative_eq!(normalized[3], 1.0);

        let values = [0.3, -7.0, 12.5, 4.0, 4.0];
        let normalized = norm_m1p1(&values);
        let min = normalized.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = normalized.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((min, max), (-1.0, 1.0));
        assert_eq!(normalized[1], -1.0);
        assert_eq!(normalized[2], 1.0);
    }

    #[test]
    fn test_norm_m1p1_degenerate() {
        assert_eq!(norm_m1p1(&[4.2; 6]), vec![0.0; 6]);
        assert_eq!(norm_m1p1(&[1.0]), vec![0.0]);
        assert!(norm_m1p1(&[]).is_empty());
    }
}
