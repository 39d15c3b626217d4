use std::path::Path;

use precip_common::{search::DistanceMode, Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of one labeling run.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelerConfig {
    /// Neighbors per point for the feature pass, the point itself included.
    pub k: usize,
    /// Shift of the intensity term, `1 / (intensity + a)`.
    pub a: f64,
    /// Shift of the mean neighbor distance term.
    pub b: f64,
    /// Shift of the variance ratio term.
    pub c: f64,
    /// Upper clip of the range-normalized mean neighbor distance.
    pub th_md: f64,
    /// Normalized discriminant above which a point seeds as precipitation.
    pub th_s: f64,
    /// Normalized discriminant below which a point seeds as valid.
    pub th_ns: f64,
    /// Neighbors per point for statistical outlier removal.
    pub sor_k: usize,
    /// Standard deviation multiplier for statistical outlier removal.
    pub sor_ratio: f64,
    /// Points farther than this from the origin are always precipitation.
    pub th_d: Option<f64>,
    pub print_progress: bool,
    pub distance_mode: DistanceMode,
    /// Points closer than this to the origin are rejected.
    pub min_range: f64,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        LabelerConfig {
            k: 50,
            a: 1.0,
            b: 10.0,
            c: 1.0,
            th_md: 0.5,
            th_s: 0.75,
            th_ns: -0.75,
            sor_k: 10,
            sor_ratio: 10.0,
            th_d: None,
            print_progress: false,
            distance_mode: DistanceMode::Euclidean,
            min_range: 1e-9,
        }
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, format!("{value} is not finite")))
    }
}

impl LabelerConfig {
    /// Reads a JSON config; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_shifts(mut self, a: f64, b: f64, c: f64) -> Self {
        (self.a, self.b, self.c) = (a, b, c);
        self
    }

    pub fn with_seed_thresholds(mut self, th_ns: f64, th_s: f64) -> Self {
        (self.th_ns, self.th_s) = (th_ns, th_s);
        self
    }

    pub fn with_outlier_removal(mut self, sor_k: usize, sor_ratio: f64) -> Self {
        (self.sor_k, self.sor_ratio) = (sor_k, sor_ratio);
        self
    }

    pub fn with_max_distance(mut self, th_d: Option<f64>) -> Self {
        self.th_d = th_d;
        self
    }

    pub fn with_progress(mut self, print_progress: bool) -> Self {
        self.print_progress = print_progress;
        self
    }

    pub fn with_distance_mode(mut self, distance_mode: DistanceMode) -> Self {
        self.distance_mode = distance_mode;
        self
    }

    /// Rejects parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.k < 3 {
            return Err(invalid("k", "a covariance needs at least 3 neighbors"));
        }
        if self.sor_k == 0 {
            return Err(invalid("sor_k", "at least one neighbor is needed"));
        }

        finite("a", self.a)?;
        finite("b", self.b)?;
        finite("c", self.c)?;
        finite("th_md", self.th_md)?;
        finite("th_s", self.th_s)?;
        finite("th_ns", self.th_ns)?;
        finite("sor_ratio", self.sor_ratio)?;
        finite("min_range", self.min_range)?;

        if self.a <= 0.0 {
            return Err(invalid("a", "must be positive to keep 1 / (intensity + a) finite"));
        }
        if self.sor_ratio <= 0.0 {
            return Err(invalid("sor_ratio", "must be positive"));
        }
        if self.th_ns > self.th_s {
            return Err(invalid(
                "th_ns",
                format!("{} is above th_s = {}", self.th_ns, self.th_s),
            ));
        }
        if self.min_range <= 0.0 {
            return Err(invalid("min_range", "must be positive"));
        }
        match self.th_d {
            Some(th_d) if th_d.is_nan() || th_d < 0.0 => {
                Err(invalid("th_d", format!("{th_d} is not a distance")))
            }
            _ => Ok(()),
        }
    }
}
