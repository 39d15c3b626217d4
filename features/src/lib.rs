mod local_shape;
mod neighborhood;

pub use self::{
    local_shape::{FeatureSet, LocalShape, NeighborhoodFeatures},
    neighborhood::Neighborhoods,
};
