//! Request middleware.

pub mod scope_cookie;

pub use scope_cookie::{caller_cookie_middleware, CallerId, CallerScope};
