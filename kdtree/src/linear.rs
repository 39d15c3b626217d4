use nalgebra::{RealField, Vector3};
use precip_common::search::NeighborIndex;

use crate::{KnnResultSet, ResultSet};

/// Exhaustive neighbor search. Linear per query, useful for small inputs and
/// as a reference for the tree.
#[derive(Debug, Clone)]
pub struct LinearIndex<T> {
    coords: Vec<Vector3<T>>,
}

impl<T: RealField + Copy> LinearIndex<T> {
    pub fn new(coords: Vec<Vector3<T>>) -> Self {
        LinearIndex { coords }
    }
}

impl<T: RealField + Copy> NeighborIndex<T> for LinearIndex<T> {
    fn from_points(points: Vec<Vector3<T>>) -> Self {
        LinearIndex::new(points)
    }

    fn points(&self) -> &[Vector3<T>] {
        &self.coords
    }

    fn knn_search(&self, pivot: &Vector3<T>, k: usize, result: &mut Vec<(usize, T)>) {
        result.clear();
        let mut rs = KnnResultSet::new(k);
        for (index, coord) in self.coords.iter().enumerate() {
            rs.push((coord - pivot).norm(), index);
        }
        result.extend(rs.into_sorted_vec().into_iter().map(|(d, v)| (v, d)));
    }
}
