//! MCP gateway exposing time, random-number, search, news and weather tools
//! to agent clients over streamable HTTP, SSE or stdio.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
