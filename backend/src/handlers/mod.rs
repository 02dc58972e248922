//! HTTP request handlers

pub mod report;

pub use report::*;
