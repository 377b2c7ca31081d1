//! Library components of the `formv` binary: logging setup and the JSON
//! document adapter.

pub mod document;
pub mod logging;
