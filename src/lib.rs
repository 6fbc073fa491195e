//! Core library functions for grouping protein families into transporter groups

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod family;
pub mod graph;
pub mod pipeline;
pub mod storage;

pub use anyhow::{anyhow, Result};
pub use config::Config;
pub use error::GroupingError;
