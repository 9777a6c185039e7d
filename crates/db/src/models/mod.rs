//! Insert DTOs.
//!
//! Each submodule contains a `Serialize` + `Deserialize` create DTO whose
//! fields map one-to-one onto the table's insert columns.

pub mod analysis_log;
