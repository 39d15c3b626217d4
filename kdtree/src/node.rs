use nalgebra::{RealField, Vector3};

use crate::ResultSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Node<T> {
    Leaf {
        index: usize,
    },
    Branch {
        children: [usize; 2],
        dim: usize,
        value: T,
    },
}

fn cut_split<T: RealField + Copy>(
    coords: &[Vector3<T>],
    indices: &mut [usize],
    dim: usize,
    value: T,
) -> (usize, usize) {
    // Partition into `< value`, `== value`, `> value`.
    let mut left = 0;
    for i in 0..indices.len() {
        if coords[indices[i]][dim] < value {
            indices.swap(i, left);
            left += 1;
        }
    }

    let limit_left = left;
    for i in left..indices.len() {
        if coords[indices[i]][dim] <= value {
            indices.swap(i, left);
            left += 1;
        }
    }

    (limit_left, left)
}

/// Picks the split dimension of largest spread and cuts at its mean.
fn cut<T: RealField + Copy>(
    coords: &[Vector3<T>],
    indices: &mut [usize],
    last: Option<usize>,
) -> (usize, usize, T) {
    let num = T::from_usize(indices.len()).unwrap();
    let sum = { indices.iter() }.fold(Vector3::zeros(), |acc, &i| acc + coords[i]);
    let mean = sum / num;
    let var = { indices.iter() }.fold(Vector3::zeros(), |acc, &i| {
        let diff = coords[i] - mean;
        acc + diff.component_mul(&diff)
    });

    // Avoid cutting the same dimension twice in a row.
    let dim = {
        let dim = var.imax();
        if Some(dim) == last {
            let (a, b) = ((dim + 1) % 3, (dim + 2) % 3);
            if var[b] > var[a] {
                b
            } else {
                a
            }
        } else {
            dim
        }
    };

    let mut value = mean[dim];
    let (limit_left, limit_right) = cut_split(coords, indices, dim, value);

    let mid = indices.len() / 2;
    let mut split = if limit_left > mid {
        limit_left
    } else if limit_right < mid {
        limit_right
    } else {
        mid
    };

    // Rounding can put the mean outside the coordinate range, leaving one
    // side empty. Fall back to a median cut.
    if split == 0 || split == indices.len() {
        indices.select_nth_unstable_by(mid, |&a, &b| {
            { coords[a][dim].partial_cmp(&coords[b][dim]) }
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        value = coords[indices[mid]][dim];
        split = mid;
    }

    (split, dim, value)
}

impl<T: RealField + Copy> Node<T> {
    /// Appends the subtree over `indices` to `nodes` and returns its root.
    pub(crate) fn build(
        nodes: &mut Vec<Node<T>>,
        coords: &[Vector3<T>],
        indices: &mut [usize],
        last_dim: Option<usize>,
    ) -> usize {
        if indices.len() == 1 {
            nodes.push(Node::Leaf { index: indices[0] });
            return nodes.len() - 1;
        }

        let (split, dim, value) = cut(coords, indices, last_dim);
        let (left, right) = indices.split_at_mut(split);

        let left = Node::build(nodes, coords, left, Some(dim));
        let right = Node::build(nodes, coords, right, Some(dim));

        nodes.push(Node::Branch {
            children: [left, right],
            dim,
            value,
        });
        nodes.len() - 1
    }

    pub(crate) fn search_exact(
        nodes: &[Node<T>],
        node: usize,
        coords: &[Vector3<T>],
        pivot: &Vector3<T>,
        result: &mut impl ResultSet<Key = T, Value = usize>,
    ) {
        match nodes[node] {
            Node::Leaf { index } => {
                let distance = (coords[index] - pivot).norm();
                result.push(distance, index);
            }
            Node::Branch {
                children: [left, right],
                dim,
                value,
            } => {
                let (next, other) = if pivot[dim] < value {
                    (left, right)
                } else {
                    (right, left)
                };

                Node::search_exact(nodes, next, coords, pivot, result);

                // `<=` keeps equidistant points reachable for the index
                // tie-break.
                let min_distance = (pivot[dim] - value).abs();
                let visit = match result.max_key() {
                    Some(max) => !result.is_full() || min_distance <= *max,
                    None => true,
                };
                if visit {
                    Node::search_exact(nodes, other, coords, pivot, result)
                }
            }
        }
    }
}
