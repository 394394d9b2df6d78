// HTTP pipeline module.
// Request/response model, transport boundary, and the middleware chain.

#![allow(dead_code, unused_imports)]

pub mod chain;
pub mod message;
pub mod middleware;
#[cfg(test)]
pub mod testing;
pub mod transport;

pub use chain::{Chain, Middleware, Next};
pub use message::{Headers, Method, Request, Response};
pub use transport::{HttpTransport, Transport};
