//! Conversion of plate-reader spreadsheet exports into headerless CSV and
//! plotting of replicate growth curves per experimental condition.

pub mod cli;
pub mod color;
pub mod config;
pub mod convert;
pub mod data;
pub mod error;
pub mod render;
pub mod sample;
pub mod sheet;
