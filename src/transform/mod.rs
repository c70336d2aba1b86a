//! Dataset cleaning rules
//!
//! Each rule is a [`Transformer`](crate::etl::Transformer) over a whole
//! [`Dataset`](crate::dataset::Dataset). [`TransformChain::default_cleaning`]
//! wires them in the fixed order the pipeline applies:
//! locality-code correction, total recomputation, customer-id filter,
//! customer-name filter.

mod chain;
mod locality_code;
mod required_fields;
mod total_paid;

pub use chain::TransformChain;
pub use locality_code::LocalityCodeFixer;
pub use required_fields::RequiredFieldFilter;
pub use total_paid::TotalRecalculator;
