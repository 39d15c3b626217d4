/// The kNN list of every point, closest first and the point itself
/// included, stored back to back.
///
/// Built once by the feature pass and read by everything after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhoods<T> {
    indices: Vec<usize>,
    distances: Vec<T>,
    offsets: Vec<usize>,
}

impl<T: Copy> Neighborhoods<T> {
    pub fn with_capacity(points: usize, k: usize) -> Self {
        let mut offsets = Vec::with_capacity(points + 1);
        offsets.push(0);
        Neighborhoods {
            indices: Vec::with_capacity(points * k),
            distances: Vec::with_capacity(points * k),
            offsets,
        }
    }

    /// Appends the neighborhood of the next point.
    pub fn push(&mut self, neighbors: &[(usize, T)]) {
        for &(index, distance) in neighbors {
            self.indices.push(index);
            self.distances.push(distance);
        }
        self.offsets.push(self.indices.len());
    }

    /// Number of points with a stored neighborhood.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbor indices and distances of point `index`, in the same order.
    #[inline]
    pub fn get(&self, index: usize) -> (&[usize], &[T]) {
        let range = self.offsets[index]..self.offsets[index + 1];
        (&self.indices[range.clone()], &self.distances[range])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], &[T])> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }
}
