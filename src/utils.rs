#![forbid(unsafe_code)]

pub mod bench_utils;
pub mod config;
pub mod db;
pub mod db_init;
pub mod db_statements;
pub mod db_types;
pub mod errors;
