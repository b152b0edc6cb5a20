pub mod enums;
pub mod reference_data;

pub use enums::{AssetClass, DataSource};
pub use reference_data::{ContractReference, ReferenceData};
