use crate::instrument::{sort_contracts, ContinuousContract, Contract};
use crate::roll::{roll_schedule, RollEvent, RollParameters, RolloverRule};
use crate::stitch::error::StitchError;
use crate::stitch::stitcher::concatenate;
use log::{debug, info};
use std::fmt;

//stages of a continuous build, each may fail and abort the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    RawContracts,
    Sorted,
    RollDatesComputed,
    SlicedAndConcatenated,
    Validated,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::RawContracts => "raw contracts",
            BuildStage::Sorted => "sorted",
            BuildStage::RollDatesComputed => "roll dates computed",
            BuildStage::SlicedAndConcatenated => "sliced and concatenated",
            BuildStage::Validated => "validated",
        };
        f.write_str(name)
    }
}

//a validated continuous series and the rolls that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousBuild {
    pub contract: ContinuousContract,
    pub rolls: Vec<RollEvent>,
}

//builds the continuous series for one product under one rule
//inputs are only read; the result is fully recomputed on every call
pub fn build_continuous(
    contracts: &[Contract],
    rule: RolloverRule,
    params: &RollParameters,
) -> Result<ContinuousBuild, StitchError> {
    let Some(first) = contracts.first() else {
        return Err(StitchError::NoContracts);
    };
    let product = first.product_code();
    if let Some(other) = contracts.iter().find(|c| c.product_code() != product) {
        return Err(StitchError::MixedProducts {
            expected: product.to_string(),
            found: other.symbol().clone(),
        });
    }
    stage(product, BuildStage::RawContracts);

    let mut ordered: Vec<&Contract> = contracts.iter().collect();
    sort_contracts(&mut ordered);
    stage(product, BuildStage::Sorted);

    let rolls = roll_schedule(&ordered, rule, params)?;
    stage(product, BuildStage::RollDatesComputed);

    let concatenated = concatenate(&ordered, &rolls, rule)?;
    stage(product, BuildStage::SlicedAndConcatenated);

    let contract = concatenated.validate()?;
    stage(product, BuildStage::Validated);

    info!(
        "built {} from {} contracts: {} daily bars, {} rolls",
        contract.code(),
        contracts.len(),
        contract.daily().len(),
        rolls.len()
    );

    Ok(ContinuousBuild { contract, rolls })
}

fn stage(product: &str, stage: BuildStage) {
    debug!("{} continuous build: {}", product, stage);
}
