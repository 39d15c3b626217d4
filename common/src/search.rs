use nalgebra::{RealField, Scalar, Vector3};
use serde::{Deserialize, Serialize};

/// A spatial index answering k-nearest-neighbor queries over the points it
/// was built from.
///
/// Implementations must report neighbors closest first, with ties broken by
/// the smaller index, so results never depend on the index structure.
pub trait NeighborIndex<T: Scalar>: Sized {
    fn from_points(points: Vec<Vector3<T>>) -> Self;

    fn points(&self) -> &[Vector3<T>];

    /// Clears `result` and fills it with up to `k` pairs of `(index,
    /// euclidean distance)`. A point of the index queried with its own
    /// coordinates finds itself at distance zero.
    fn knn_search(&self, pivot: &Vector3<T>, k: usize, result: &mut Vec<(usize, T)>);

    #[inline]
    fn len(&self) -> usize {
        self.points().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }
}

/// How neighbor distances enter the mean-distance statistic and the
/// propagation weights.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    #[default]
    Euclidean,
    /// Squared euclidean distance, as reported by some kNN services.
    Squared,
}

impl DistanceMode {
    #[inline]
    pub fn apply<T: RealField + Copy>(self, distance: T) -> T {
        match self {
            DistanceMode::Euclidean => distance,
            DistanceMode::Squared => distance * distance,
        }
    }
}
