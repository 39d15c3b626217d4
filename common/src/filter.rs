use crate::Result;

/// A filter that keeps some parts of input, for example, some elements of an
/// array, and reports which ones.
pub trait Filter<T: ?Sized> {
    /// Indices of the kept elements, in increasing order.
    fn filter_indices(&mut self, input: &T) -> Result<Vec<usize>>;

    /// Kept and removed indices, both in increasing order.
    fn filter_all_indices(&mut self, input: &T) -> Result<(Vec<usize>, Vec<usize>)>;
}

impl<T, F: FnMut(&T) -> bool> Filter<[T]> for F {
    fn filter_indices(&mut self, input: &[T]) -> Result<Vec<usize>> {
        let mut indices = (0..input.len()).collect::<Vec<_>>();
        indices.retain(|&index| (self)(&input[index]));
        Ok(indices)
    }

    fn filter_all_indices(&mut self, input: &[T]) -> Result<(Vec<usize>, Vec<usize>)> {
        let mut indices = (0..input.len()).collect::<Vec<_>>();
        let mut removed = Vec::with_capacity(indices.len());
        indices.retain(|&index| {
            let ret = (self)(&input[index]);
            if !ret {
                removed.push(index)
            }
            ret
        });
        Ok((indices, removed))
    }
}
