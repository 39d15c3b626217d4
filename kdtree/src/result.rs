use std::collections::BinaryHeap;

#[derive(Debug, Copy, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
}

impl<K: PartialEq, V: PartialEq> PartialEq for Node<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl<K: PartialEq, V: PartialEq> Eq for Node<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for Node<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, V: PartialOrd> Ord for Node<K, V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.key.partial_cmp(&other.key) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        { self.value.partial_cmp(&other.value) }.unwrap_or(std::cmp::Ordering::Equal)
    }
}

pub trait ResultSet {
    type Key;
    type Value;

    fn push(&mut self, key: Self::Key, value: Self::Value);

    fn is_full(&self) -> bool;

    fn max_key(&self) -> Option<&Self::Key>;
}

/// Keeps the `num` smallest `(key, value)` pairs pushed so far. Equal keys
/// are ordered by value, so the kept set does not depend on push order.
pub struct KnnResultSet<K, V> {
    data: BinaryHeap<Node<K, V>>,
    num: usize,
}

impl<K: PartialOrd, V: PartialOrd> KnnResultSet<K, V> {
    pub fn new(num: usize) -> Self {
        KnnResultSet {
            data: BinaryHeap::with_capacity(num.min(128) + 1),
            num,
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Kept pairs, smallest first.
    pub fn into_sorted_vec(self) -> Vec<(K, V)> {
        { self.data.into_sorted_vec().into_iter() }
            .map(|node| (node.key, node.value))
            .collect()
    }
}

impl<K: PartialOrd, V: PartialOrd> ResultSet for KnnResultSet<K, V> {
    type Key = K;
    type Value = V;

    fn push(&mut self, key: K, value: V) {
        if self.num == 0 {
            return;
        }

        let node = Node { key, value };
        if self.is_full() {
            match self.data.peek() {
                Some(max) if node < *max => {
                    self.data.pop();
                }
                _ => return,
            }
        }

        self.data.push(node);
    }

    fn is_full(&self) -> bool {
        self.data.len() >= self.num
    }

    fn max_key(&self) -> Option<&K> {
        self.data.peek().map(|node| &node.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_traits() {
        let node1 = Node {
            key: 0.0f32,
            value: 0,
        };
        let node2 = Node {
            key: 1.0f32,
            value: 1,
        };
        assert!(node1.cmp(&node2) == std::cmp::Ordering::Less);

        let tie = Node {
            key: 0.0f32,
            value: 5,
        };
        assert!(node1 < tie);
    }

    #[test]
    fn test_knn_result_set() {
        let mut rs = KnnResultSet::new(3);
        for (key, value) in [(4.0, 0), (1.0, 1), (3.0, 2), (0.5, 3), (3.0, 4), (9.0, 5)] {
            rs.push(key, value);
        }
        assert!(rs.is_full());
        assert_eq!(rs.max_key(), Some(&3.0));
        assert_eq!(rs.into_sorted_vec(), vec![(0.5, 3), (1.0, 1), (3.0, 2)]);

        let mut empty = KnnResultSet::<f64, usize>::new(0);
        empty.push(1.0, 0);
        assert!(empty.is_empty());
    }
}
