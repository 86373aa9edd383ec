//! # Availability MCP Server Core
//!
//! Turns a list of availability slots into shareable text in the user's
//! timezone, optionally alongside a recipient's timezone.
//!
//! ## Features
//! - Naive and offset-aware slot boundaries
//! - Continuous (`start - end` per slot) and chunked layouts
//! - Second timezone column for the recipient
//! - Automatic DST handling
//!
//! ## Modules
//! - `error`: Custom error types and error handling
//! - `format`: Date, time and header labels
//! - `models`: Engine value types plus tool requests and responses
//! - `normalize`: Timezone lookup and conversion
//! - `provider`: Request-level entry point
//! - `render`: Continuous and chunk layouts
//! - `timestamp`: Parsing of slot boundaries
//! - `validation`: Checks run before rendering

pub mod error;
pub mod format;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod render;
pub mod timestamp;
pub mod validation;
