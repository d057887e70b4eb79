//! HTTP middleware.

mod error_details;
mod logging;

pub use error_details::*;
pub use logging::*;
