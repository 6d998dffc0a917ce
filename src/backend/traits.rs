//! Trait abstraction for the backend client to enable mocking in tests

use super::ApiError;
use crate::state::{NewOrder, NewProduct, Order, OrderUpdate, Product};
use async_trait::async_trait;
use std::path::Path;

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations the dashboard performs against the products/orders service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    /// Fetch every product
    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    /// Fetch one product by its server id
    async fn get_product(&self, id: &str) -> ApiResult<Product>;

    /// Products whose name matches `name`. The server may answer 404 for no match.
    async fn find_products_by_name(&self, name: &str) -> ApiResult<Vec<Product>>;

    /// Create a product, stamping its creation time
    async fn create_product(&self, product: &NewProduct) -> ApiResult<Product>;

    /// Replace a product (PUT)
    async fn update_product(&self, id: &str, product: &NewProduct) -> ApiResult<Product>;

    async fn delete_product(&self, id: &str) -> ApiResult<()>;

    /// Fetch every order
    async fn list_orders(&self) -> ApiResult<Vec<Order>>;

    /// Fetch one order by its server id
    async fn get_order(&self, id: &str) -> ApiResult<Order>;

    /// Create an order, stamping its creation time
    async fn create_order(&self, order: &NewOrder) -> ApiResult<Order>;

    /// Patch the editable fields of an order
    async fn update_order(&self, id: &str, order: &OrderUpdate) -> ApiResult<Order>;

    async fn delete_order(&self, id: &str) -> ApiResult<()>;

    /// Upload a local image file and return its public URL
    async fn upload_image(&self, path: &Path) -> ApiResult<String>;
}
