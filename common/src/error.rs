/// Failures shared by every stage of the labeling pipeline.
///
/// Indices always refer to the point set the failing stage was given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Not enough neighbors to estimate a 3x3 covariance.
    #[error("neighborhood of point {index} has {actual} points, at least {required} are needed")]
    InsufficientNeighbors {
        index: usize,
        required: usize,
        actual: usize,
    },

    /// Every neighbor coincides, so the covariance has no spread at all.
    #[error("neighborhood of point {index} collapses to a single location")]
    DegenerateNeighborhood { index: usize },

    /// The point is too close to the sensor origin to normalize by its range.
    #[error("point {index} lies within the minimum range of the sensor origin")]
    DegenerateRange { index: usize },

    #[error("point {index} has a non-finite coordinate or intensity")]
    NonFinite { index: usize },

    /// `intensity + a` is not positive, so the intensity term has no finite
    /// positive value.
    #[error("intensity {intensity} of point {index} is at or below -a")]
    IntensityOutOfRange { index: usize, intensity: f64 },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The flat storage does not split into rows of the requested width.
    #[error("{len} values cannot be split into rows of width {width}")]
    InvalidShape { len: usize, width: usize },

    #[error("point table has {actual} columns, at least {required} are needed")]
    MissingColumns { required: usize, actual: usize },
}

impl Error {
    /// Rewrites the point index carried by the error through `map`.
    ///
    /// Stages running on a filtered subset use this to report indices of the
    /// original input instead.
    pub fn remap_index(self, map: impl FnOnce(usize) -> usize) -> Self {
        match self {
            Error::InsufficientNeighbors {
                index,
                required,
                actual,
            } => Error::InsufficientNeighbors {
                index: map(index),
                required,
                actual,
            },
            Error::DegenerateNeighborhood { index } => {
                Error::DegenerateNeighborhood { index: map(index) }
            }
            Error::DegenerateRange { index } => Error::DegenerateRange { index: map(index) },
            Error::NonFinite { index } => Error::NonFinite { index: map(index) },
            Error::IntensityOutOfRange { index, intensity } => Error::IntensityOutOfRange {
                index: map(index),
                intensity,
            },
            other => other,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
