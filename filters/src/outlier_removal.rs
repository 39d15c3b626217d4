use nalgebra::{RealField, Scalar};
use precip_common::{filter::Filter, search::NeighborIndex, Error, Result};
use rayon::prelude::*;

/// Calculate the mean distance between each point and its `mean_k` nearest
/// neighbors (the point itself included). If its mean distance is larger
/// than the overall mean distance plus their standard deviation by
/// `stddev_mul`, then it'll be removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StatOutlierRemoval<T: Scalar> {
    pub mean_k: usize,
    pub stddev_mul: T,
}

impl<T: Scalar> StatOutlierRemoval<T> {
    pub fn new(mean_k: usize, stddev_mul: T) -> Self {
        StatOutlierRemoval { mean_k, stddev_mul }
    }
}

impl<T: RealField + Copy> StatOutlierRemoval<T> {
    fn check(&self) -> Result<()> {
        if self.mean_k == 0 {
            return Err(Error::InvalidParameter {
                name: "sor_k",
                reason: "at least one neighbor is needed".into(),
            });
        }
        if !self.stddev_mul.is_finite() {
            return Err(Error::InvalidParameter {
                name: "sor_ratio",
                reason: format!("{} is not finite", self.stddev_mul),
            });
        }
        Ok(())
    }

    /// Mean neighbor distance of every indexed point.
    pub fn mean_distances<S>(&self, searcher: &S) -> Result<Vec<T>>
    where
        S: NeighborIndex<T> + Sync,
    {
        self.check()?;

        let distance = { searcher.points().par_iter() }
            .map_init(Vec::new, |result, point| {
                searcher.knn_search(point, self.mean_k, result);
                let sum = { result.iter() }.fold(T::zero(), |acc, &(_, distance)| acc + distance);
                sum / T::from_usize(result.len().max(1)).unwrap()
            })
            .collect::<Vec<_>>();
        Ok(distance)
    }

    /// Mean neighbor distances and the largest mean distance that is kept.
    fn filter_data<S>(&self, searcher: &S) -> Result<(Vec<T>, T)>
    where
        S: NeighborIndex<T> + Sync,
    {
        let distance = self.mean_distances(searcher)?;

        let (num, dsum, dsum2) = { distance.iter() }.fold(
            (0, T::zero(), T::zero()),
            |(num, dsum, dsum2), &dmean| (num + 1, dsum + dmean, dsum2 + dmean * dmean),
        );

        let dnum = T::from_usize(num.max(1)).unwrap();
        let dmean = dsum / dnum;
        let dmean2 = dsum2 / dnum;
        let dvar = (dmean2 - dmean * dmean).max(T::zero());
        let dstddev = dvar.sqrt();

        let threshold = dmean + dstddev * self.stddev_mul;
        log::debug!(
            "outlier removal: mean {dmean}, stddev {dstddev}, threshold {threshold} over {num} points"
        );

        Ok((distance, threshold))
    }
}

impl<T, S> Filter<S> for StatOutlierRemoval<T>
where
    T: RealField + Copy,
    S: NeighborIndex<T> + Sync,
{
    fn filter_indices(&mut self, input: &S) -> Result<Vec<usize>> {
        let (distance, threshold) = self.filter_data(input)?;

        let mut indices = (0..input.len()).collect::<Vec<_>>();
        indices.retain(|&index| distance[index] <= threshold);
        Ok(indices)
    }

    fn filter_all_indices(&mut self, input: &S) -> Result<(Vec<usize>, Vec<usize>)> {
        let (distance, threshold) = self.filter_data(input)?;

        let mut indices = (0..input.len()).collect::<Vec<_>>();
        let mut removed = Vec::with_capacity(indices.len());
        indices.retain(|&index| {
            let ret = distance[index] <= threshold;
            if !ret {
                removed.push(index)
            }
            ret
        });
        Ok((indices, removed))
    }
}
