mod error;
pub use error::{Error, IntoError};

pub mod plan;
pub use plan::{LimitNode, Plan, PlanNode};

pub mod stmt;

/// A Result type alias that uses Ember's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
