//! Search requests and the predicate model.
//!
//! - [`types`] - facing, axis, constraints and the predicate itself
//! - [`parser`] - rotation-list and constraint-object parsers
//! - [`request`] - validation of raw input into a [`SearchRequest`]
//! - [`error`] - everything that can be wrong with a request

pub mod error;
pub mod parser;
pub mod request;
pub mod types;

pub use error::RequestError;
pub use parser::{parse_constraint_objects, parse_rotation_list};
pub use request::{RequestBuilder, SearchRequest};
pub use types::{Axis, Constraint, Facing, Predicate};
