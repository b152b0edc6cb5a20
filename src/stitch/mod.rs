pub mod batch;
pub mod error;
pub mod pipeline;
pub mod stitcher;

pub use batch::{build_all, BuildJob};
pub use error::{ContinuityError, StitchError};
pub use pipeline::{build_continuous, BuildStage, ContinuousBuild};
pub use stitcher::{concatenate, stitch, Concatenated};
