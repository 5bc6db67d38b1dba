//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file location and loading
//! - [`bits`] - Portable sign-extending shift used by the position hash
//! - [`progress`] - Progress bar that becomes a no-op without the `progress` feature
//!
//! ```
//! use dirt_search::utils::shift_right_arithmetic;
//!
//! assert_eq!(shift_right_arithmetic(-256, 4), -16);
//! ```

pub mod app_data;
pub mod bits;
pub mod progress;

pub use app_data::*;
pub use bits::*;
