//! Labels precipitation and snowflake returns in LiDAR point clouds.
//!
//! Points are scored from their intensity and the shape of their k nearest
//! neighborhood, thresholded into seeds, and the undecided rest resolved by
//! an inverse-distance vote of their neighbors. [`add_precip_label`] appends
//! the result as a 0/1 column, 1 meaning a valid return.

mod config;
mod discriminant;
mod io;
mod pipeline;
mod propagate;
mod reassemble;
mod synthetic;
mod vote;

pub use self::{
    config::LabelerConfig,
    discriminant::{combine, discriminant, norm_m1p1},
    io::{format_table, parse_table, read_table, write_table, TableIoError},
    pipeline::{
        add_precip_label, add_precip_label_with_summary, label_precipitation,
        label_precipitation_with, label_precipitation_with_summary, MIN_ROWS,
    },
    propagate::{propagate, vote_score},
    reassemble::{apply_distance_gate, reassemble, LabelSummary},
    synthetic::gaussian_cloud,
    vote::{seed_labels, Label, Vote},
};
