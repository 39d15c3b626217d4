mod error;
pub mod feature;
pub mod filter;
pub mod point_cloud;
pub mod points;
pub mod search;

pub use self::error::{Error, Result};
