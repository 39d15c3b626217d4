use nalgebra::{Matrix3, RealField, Vector3};

/// Centroid of `coords`, or `None` when the iterator is empty.
pub fn centroid<'a, T, I>(coords: I) -> Option<Vector3<T>>
where
    T: RealField + Copy,
    I: IntoIterator<Item = &'a Vector3<T>>,
{
    let (acc, num) = { coords.into_iter() }
        .fold((Vector3::zeros(), 0usize), |(acc, num), v| (acc + v, num + 1));
    (num > 0).then(|| acc / T::from_usize(num).unwrap())
}

/// Unbiased sample covariance of `coords`, treating each coordinate as one
/// observation of a 3D random variable.
///
/// Returns the matrix together with the number of samples, or `None` when
/// fewer than two samples are given.
pub fn cov_matrix<'a, T, I>(coords: I) -> Option<(Matrix3<T>, usize)>
where
    T: RealField + Copy,
    I: IntoIterator<Item = &'a Vector3<T>> + Clone,
{
    let centroid = centroid(coords.clone())?;

    let accum = |mut acc: Matrix3<T>, v: &Vector3<T>| {
        let d = v - centroid;

        acc.m22 += d.y * d.y;
        acc.m23 += d.y * d.z;
        acc.m33 += d.z * d.z;
        let d = d * d.x;
        acc.m11 += d.x;
        acc.m12 += d.y;
        acc.m13 += d.z;

        acc
    };

    let (mut acc, num) = { coords.into_iter() }
        .fold((Matrix3::zeros(), 0usize), |(acc, num), v| (accum(acc, v), num + 1));
    if num < 2 {
        return None;
    }

    acc.m21 = acc.m12;
    acc.m31 = acc.m13;
    acc.m32 = acc.m23;
    Some((acc / T::from_usize(num - 1).unwrap(), num))
}

/// Eigenvalues of a symmetric matrix, largest first.
pub fn sorted_eigenvalues<T: RealField + Copy>(matrix: Matrix3<T>) -> Vector3<T> {
    let eigenvalues = matrix.symmetric_eigenvalues();
    let mut sorted = [eigenvalues.x, eigenvalues.y, eigenvalues.z];
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    Vector3::from(sorted)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_cov_matrix() {
        let coords = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 4.0, 0.0),
            Vector3::new(2.0, 4.0, 0.0),
        ];
        let (cov, num) = cov_matrix(&coords).unwrap();
        assert_eq!(num, 4);
        // var(x) = 4/3, var(y) = 16/3 with the n - 1 denominator.
        assert_relative_eq!(cov.m11, 4.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov.m22, 16.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov.m33, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cov.m12, 0.0, epsilon = 1e-12);
        assert_eq!(cov, cov.transpose());

        assert!(cov_matrix(&coords[..1]).is_none());
    }

    #[test]
    fn test_sorted_eigenvalues() {
        let matrix = Matrix3::from_diagonal(&Vector3::new(1.0, 9.0, 4.0));
        let eigenvalues = sorted_eigenvalues(matrix);
        assert_relative_eq!(eigenvalues, Vector3::new(9.0, 4.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_centroid() {
        let coords = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(3.0, 2.0, 1.0)];
        assert_eq!(centroid(&coords), Some(Vector3::new(2.0, 2.0, 2.0)));
        assert_eq!(centroid::<f64, _>(&[]), None);
    }
}
