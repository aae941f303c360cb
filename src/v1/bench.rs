#![forbid(unsafe_code)]

pub mod db;
pub mod fortunes;
pub mod json;
pub mod plaintext;
pub mod queries;
pub mod updates;
