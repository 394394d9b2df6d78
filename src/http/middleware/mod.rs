// Middleware stages for the request pipeline.
// Composition order is significant: Authentication -> Cache -> StatusCheck
// -> JsonDecode, so cached entries are always validated and decoded.

#![allow(dead_code, unused_imports)]

pub mod authentication;
pub mod cache;
pub mod json_decode;
pub mod status_check;

pub use authentication::Authentication;
pub use cache::Cache;
pub use json_decode::JsonDecode;
pub use status_check::StatusCheck;
