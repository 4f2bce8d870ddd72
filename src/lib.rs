// src/lib.rs
// roadmap-mcp - GitHub roadmap and sprint planning over MCP

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod github;
pub mod http;
pub mod mcp;
pub mod planning;
pub use error::{Result, RoadmapError};
