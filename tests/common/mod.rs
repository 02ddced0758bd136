//! Common test utilities for surfsup.
//!
//! This module provides shared utilities for testing the surfsup server.

#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod test_data;
