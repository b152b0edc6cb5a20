pub mod stitch_config;

pub use stitch_config::StitchConfiguration;
