mod linear;
mod node;
mod result;

use nalgebra::{RealField, Vector3};
use node::Node;
use precip_common::search::NeighborIndex;

pub use self::{linear::LinearIndex, result::*};

/// A k-d tree owning the coordinates it indexes.
///
/// Nodes live in one arena; leaves hold a single point index each.
#[derive(Debug, Clone)]
pub struct KdTree<T> {
    coords: Vec<Vector3<T>>,
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T: RealField + Copy> KdTree<T> {
    pub fn new(coords: Vec<Vector3<T>>) -> Self {
        if coords.is_empty() {
            return KdTree {
                coords,
                nodes: Vec::new(),
                root: None,
            };
        }

        let mut indices = (0..coords.len()).collect::<Vec<_>>();
        let mut nodes = Vec::with_capacity(coords.len() * 2);
        let root = Node::build(&mut nodes, &coords, &mut indices, None);
        KdTree {
            coords,
            nodes,
            root: Some(root),
        }
    }

    pub fn search(&self, pivot: &Vector3<T>, result: &mut impl ResultSet<Key = T, Value = usize>) {
        if let Some(root) = self.root {
            Node::search_exact(&self.nodes, root, &self.coords, pivot, result)
        }
    }
}

impl<T: RealField + Copy> NeighborIndex<T> for KdTree<T> {
    fn from_points(points: Vec<Vector3<T>>) -> Self {
        KdTree::new(points)
    }

    fn points(&self) -> &[Vector3<T>] {
        &self.coords
    }

    fn knn_search(&self, pivot: &Vector3<T>, k: usize, result: &mut Vec<(usize, T)>) {
        result.clear();
        let mut rs = KnnResultSet::new(k);
        self.search(pivot, &mut rs);
        result.extend(rs.into_sorted_vec().into_iter().map(|(d, v)| (v, d)));
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_coords(num: usize, seed: u64) -> Vec<Vector3<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..num)
            .map(|_| {
                Vector3::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-1.0..1.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_matches_linear_scan() {
        let coords = random_coords(500, 7);
        let tree = KdTree::new(coords.clone());
        let linear = LinearIndex::new(coords.clone());

        let (mut a, mut b) = (Vec::new(), Vec::new());
        for pivot in coords.iter().take(50).chain(&random_coords(20, 8)) {
            tree.knn_search(pivot, 12, &mut a);
            linear.knn_search(pivot, 12, &mut b);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_self_is_first() {
        let coords = random_coords(64, 3);
        let tree = KdTree::new(coords.clone());
        let mut result = Vec::new();
        for (index, pivot) in coords.iter().enumerate() {
            tree.knn_search(pivot, 4, &mut result);
            assert_eq!(result[0], (index, 0.0));
            assert!(result.windows(2).all(|w| w[0].1 <= w[1].1));
        }
    }

    #[test]
    fn test_duplicates_and_small_sets() {
        let coords = vec![Vector3::new(1.0, 1.0, 1.0); 5];
        let tree = KdTree::new(coords);
        let mut result = Vec::new();
        tree.knn_search(&Vector3::new(1.0, 1.0, 1.0), 3, &mut result);
        assert_eq!(result, vec![(0, 0.0), (1, 0.0), (2, 0.0)]);

        // Asking for more neighbors than points returns every point.
        tree.knn_search(&Vector3::zeros(), 10, &mut result);
        assert_eq!(result.len(), 5);

        let empty = KdTree::<f64>::new(Vec::new());
        empty.knn_search(&Vector3::zeros(), 3, &mut result);
        assert!(result.is_empty());
        assert!(empty.is_empty());
    }
}
