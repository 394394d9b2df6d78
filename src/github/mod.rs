// GitHub API module.
// Typed report operations, pagination, and domain values.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod pager;
pub mod types;

pub use client::GitHubApiClient;
pub use types::{Event, Repository, User};
