use crate::instrument::Contract;
use crate::roll::{RollParameters, RolloverRule};
use crate::stitch::error::StitchError;
use crate::stitch::pipeline::{build_continuous, ContinuousBuild};
use log::info;
use rayon::prelude::*;

//one independent continuous build
#[derive(Debug, Clone, Copy)]
pub struct BuildJob<'a> {
    pub contracts: &'a [Contract],
    pub rule: RolloverRule,
    pub params: RollParameters,
}

impl<'a> BuildJob<'a> {
    pub fn new(contracts: &'a [Contract], rule: RolloverRule) -> Self {
        BuildJob {
            contracts,
            rule,
            params: RollParameters::default(),
        }
    }

    pub fn with_params(mut self, params: RollParameters) -> Self {
        self.params = params;
        self
    }
}

//runs every job in parallel, results come back in job order
pub fn build_all(jobs: &[BuildJob<'_>]) -> Vec<Result<ContinuousBuild, StitchError>> {
    info!("running {} continuous builds", jobs.len());
    jobs.par_iter()
        .map(|job| build_continuous(job.contracts, job.rule, &job.params))
        .collect()
}
