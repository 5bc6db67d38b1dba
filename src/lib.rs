//! # dirt - block rotation search
//!
//! Some blocks are drawn with one of four texture rotations picked from a
//! hash of their position. Given the rotations seen on a few neighbouring
//! blocks, `dirt` scans a box of the world for every position that would
//! produce exactly that pattern.
//!
//! ## Architecture
//!
//! - [`world`] - position hash, 48-bit LCG, and the rotation function
//! - [`query`] - predicates (offset + expected rotation) and request validation
//! - [`search`] - volume partitioning and the parallel search engine
//! - [`output`] - match sinks (`[x, y, z]` lines)
//! - [`utils`] - bit helpers, configuration, progress reporting
//!
//! ## Quick Start
//!
//! ```
//! use dirt_search::output::CollectSink;
//! use dirt_search::query::RequestBuilder;
//! use dirt_search::search::SearchEngine;
//!
//! let request = RequestBuilder::new()
//!     .facing("north")
//!     .rotations("0,0,1,3")
//!     .x_range(0, 0)
//!     .y_range(0, 0)
//!     .z_range(0, 0)
//!     .workers(2)
//!     .build()
//!     .unwrap();
//!
//! let sink = CollectSink::new();
//! SearchEngine::from_request(request).run(&sink).unwrap();
//! assert_eq!(sink.into_sorted().len(), 1);
//! ```

pub mod output;
pub mod query;
pub mod search;
pub mod utils;
pub mod world;
