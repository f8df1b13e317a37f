//! Analysis core: pure domain model and the services that derive a
//! diagnostic report from classified log records and a parsed device
//! configuration. Nothing in this module performs I/O.
pub mod domain;
pub mod services;
