//! REST client for the products/orders backend

mod client;
mod error;
mod traits;

pub use client::BackendClient;
pub use error::ApiError;
pub use traits::{ApiResult, BackendClientTrait};

#[cfg(test)]
pub use traits::MockBackendClientTrait;
