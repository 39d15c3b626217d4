use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use nalgebra::{RealField, Vector3};
use precip_common::{
    feature::Feature,
    points::{cov_matrix, sorted_eigenvalues},
    search::{DistanceMode, NeighborIndex},
    Error, Result,
};
use rayon::prelude::*;

use crate::Neighborhoods;

/// Local statistics of one point's neighborhood.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalShape<T: RealField> {
    /// Covariance eigenvalues of the neighborhood, largest first.
    pub eigenvalues: Vector3<T>,
    /// Mean neighbor distance divided by the point's distance to the origin.
    pub mean_distance: T,
}

impl<T: RealField + Copy> LocalShape<T> {
    /// Share of the smallest eigenvalue in the total variance. Close to zero
    /// on planar surfaces, up to 1/3 for isotropic scatter.
    #[inline]
    pub fn variance_ratio(&self) -> T {
        self.eigenvalues.z / self.eigenvalues.sum()
    }
}

/// Output of the feature pass, aligned with the input points.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet<T: RealField> {
    pub shapes: Vec<LocalShape<T>>,
    pub neighborhoods: Neighborhoods<T>,
}

impl<T: RealField> FeatureSet<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Computes the kNN neighborhood, range-normalized mean neighbor distance and
/// covariance eigenvalues of every point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NeighborhoodFeatures<T> {
    pub distance_mode: DistanceMode,
    /// Points closer than this to the origin cannot be range-normalized.
    pub min_range: T,
    /// Show a progress bar on stderr while computing.
    pub progress: bool,
}

impl<T: RealField + Copy> NeighborhoodFeatures<T> {
    pub fn new(distance_mode: DistanceMode, min_range: T) -> Self {
        NeighborhoodFeatures {
            distance_mode,
            min_range,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn point<S: NeighborIndex<T>>(
        &self,
        index: usize,
        search: &S,
        k: usize,
        result: &mut Vec<(usize, T)>,
    ) -> Result<(LocalShape<T>, Vec<(usize, T)>)> {
        let pivot = &search.points()[index];
        search.knn_search(pivot, k, result);
        if result.len() < 3 {
            return Err(Error::InsufficientNeighbors {
                index,
                required: 3,
                actual: result.len(),
            });
        }

        let neighbors = { result.iter() }
            .map(|&(j, distance)| (j, self.distance_mode.apply(distance)))
            .collect::<Vec<_>>();

        let sum = { neighbors.iter() }.fold(T::zero(), |acc, &(_, distance)| acc + distance);
        let mean = sum / T::from_usize(neighbors.len()).unwrap();

        let coords = neighbors.iter().map(|&(j, _)| &search.points()[j]);
        let eigenvalues = match cov_matrix(coords) {
            Some((cov, _)) => sorted_eigenvalues(cov),
            None => {
                return Err(Error::InsufficientNeighbors {
                    index,
                    required: 3,
                    actual: neighbors.len(),
                })
            }
        };
        if !(eigenvalues.sum() > T::zero()) {
            return Err(Error::DegenerateNeighborhood { index });
        }

        let shape = LocalShape {
            eigenvalues,
            mean_distance: mean / pivot.norm(),
        };
        Ok((shape, neighbors))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} ({eta})")
        {
            pb.set_style(style.progress_chars("##>-"));
        }
        pb.set_message("Computing features");
        pb
    }
}

impl<T, S> Feature<[Vector3<T>], Result<FeatureSet<T>>, S, usize> for NeighborhoodFeatures<T>
where
    T: RealField + Copy,
    S: NeighborIndex<T> + Sync,
{
    /// `input` must be the points `search` was built from; neighbor indices
    /// in the result refer to them.
    fn compute(&self, input: &[Vector3<T>], search: &S, k: usize) -> Result<FeatureSet<T>> {
        if input.len() != search.len() {
            return Err(Error::InvalidShape {
                len: input.len(),
                width: search.len(),
            });
        }

        let available = k.min(search.len());
        if available < 3 {
            return Err(Error::InsufficientNeighbors {
                index: 0,
                required: 3,
                actual: available,
            });
        }

        // Range checks first, so the reported index is the lowest offender.
        for (index, point) in input.iter().enumerate() {
            if !point.iter().all(|x| x.is_finite()) {
                return Err(Error::NonFinite { index });
            }
            if !(point.norm() >= self.min_range) {
                return Err(Error::DegenerateRange { index });
            }
        }

        let pb = self.progress_bar(input.len());
        let points = { (0..input.len()).into_par_iter() }
            .progress_with(pb.clone())
            .map_init(Vec::new, |result, index| self.point(index, search, k, result))
            .collect::<Vec<_>>();
        pb.finish_and_clear();

        let mut shapes = Vec::with_capacity(points.len());
        let mut neighborhoods = Neighborhoods::with_capacity(points.len(), available);
        for point in points {
            let (shape, neighbors) = point?;
            shapes.push(shape);
            neighborhoods.push(&neighbors);
        }
        log::debug!(
            "computed local shape of {} points over {} neighbors each",
            shapes.len(),
            available
        );

        Ok(FeatureSet {
            shapes,
            neighborhoods,
        })
    }
}
