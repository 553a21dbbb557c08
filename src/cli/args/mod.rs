//! Shared CLI argument types
//!
//! Reusable argument structs that can be flattened into commands using
//! `#[command(flatten)]`.

mod common;
mod global;
mod pagination;

pub use common::{OutputFormat, PeriodArg};
pub use global::GlobalOptions;
pub use pagination::{PageArgs, SinglePageArg};
