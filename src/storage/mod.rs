//! Storage layer for finboard
//!
//! JSON files with atomic writes and automatic directory creation. Settings,
//! the session and offline record files all go through here.

pub mod file_io;

pub use file_io::{json_file_valid, read_json, read_json_required, write_json_atomic};
