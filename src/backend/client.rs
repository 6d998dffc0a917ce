//! HTTP client for the products/orders REST backend
//!
//! Records live under `<base>/products` and `<base>/orders`. Images go to a
//! separate upload endpoint that answers `{ success, url }`.

use super::{ApiError, ApiResult, BackendClientTrait};
use crate::state::{NewOrder, NewProduct, Order, OrderUpdate, Product};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the REST backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    upload_url: Url,
}

/// Create body for products: the record plus its creation stamp
#[derive(Serialize)]
struct ProductCreate<'a> {
    #[serde(flatten)]
    product: &'a NewProduct,
    #[serde(rename = "createdAt")]
    created_at: i64,
}

/// Create body for orders: the record plus its creation stamp
#[derive(Serialize)]
struct OrderCreate<'a> {
    #[serde(flatten)]
    order: &'a NewOrder,
    created_at: i64,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    url: Option<String>,
    message: Option<String>,
}

impl BackendClient {
    /// Create a client for `base_url` (records) and `upload_url` (images)
    pub fn new(base_url: &str, upload_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid backend URL '{}': {}", base_url, e))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Invalid backend URL '{}': not a hierarchical URL", base_url);
        }
        let upload = Url::parse(upload_url)
            .map_err(|e| anyhow::anyhow!("Invalid upload URL '{}': {}", upload_url, e))?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base,
            upload_url: upload,
        })
    }

    /// `<base>/<segments...>` with every segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn products_url(&self) -> Url {
        self.endpoint(&["products"])
    }

    fn product_url(&self, id: &str) -> Url {
        self.endpoint(&["products", id])
    }

    fn orders_url(&self) -> Url {
        self.endpoint(&["orders"])
    }

    fn order_url(&self, id: &str) -> Url {
        self.endpoint(&["orders", id])
    }
}

#[async_trait]
impl BackendClientTrait for BackendClient {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let response = self.http.get(self.products_url()).send().await?;
        decode(response).await
    }

    async fn get_product(&self, id: &str) -> ApiResult<Product> {
        let response = self.http.get(self.product_url(id)).send().await?;
        decode(response).await
    }

    async fn find_products_by_name(&self, name: &str) -> ApiResult<Vec<Product>> {
        let response = self
            .http
            .get(self.products_url())
            .query(&[("product_name", name)])
            .send()
            .await?;
        decode(response).await
    }

    async fn create_product(&self, product: &NewProduct) -> ApiResult<Product> {
        let body = ProductCreate {
            product,
            created_at: Utc::now().timestamp(),
        };
        tracing::debug!(name = %product.product_name, "Creating product");
        let response = self.http.post(self.products_url()).json(&body).send().await?;
        decode(response).await
    }

    async fn update_product(&self, id: &str, product: &NewProduct) -> ApiResult<Product> {
        let response = self.http.put(self.product_url(id)).json(product).send().await?;
        decode(response).await
    }

    async fn delete_product(&self, id: &str) -> ApiResult<()> {
        let response = self.http.delete(self.product_url(id)).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        let response = self.http.get(self.orders_url()).send().await?;
        decode(response).await
    }

    async fn get_order(&self, id: &str) -> ApiResult<Order> {
        let response = self.http.get(self.order_url(id)).send().await?;
        decode(response).await
    }

    async fn create_order(&self, order: &NewOrder) -> ApiResult<Order> {
        let body = OrderCreate {
            order,
            created_at: Utc::now().timestamp(),
        };
        tracing::debug!(order_id = %order.order_id, "Creating order");
        let response = self.http.post(self.orders_url()).json(&body).send().await?;
        decode(response).await
    }

    async fn update_order(&self, id: &str, order: &OrderUpdate) -> ApiResult<Order> {
        let response = self.http.patch(self.order_url(id)).json(order).send().await?;
        decode(response).await
    }

    async fn delete_order(&self, id: &str) -> ApiResult<()> {
        let response = self.http.delete(self.order_url(id)).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn upload_image(&self, path: &Path) -> ApiResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Upload(format!("Cannot read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(path))?;
        let form = multipart::Form::new().part("file", part);

        let response = self.http.post(self.upload_url.clone()).multipart(form).send().await?;
        let ok = response.status().is_success();
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|_| ApiError::Upload("Upload failed".to_string()))?;

        match body.url {
            Some(url) if ok && body.success && !url.is_empty() => Ok(url),
            _ => Err(ApiError::Upload(
                body.message.unwrap_or_else(|| "Upload failed".to_string()),
            )),
        }
    }
}

/// Map non-success statuses to `ApiError`, passing successful responses through
async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .unwrap_or_default()
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

    tracing::warn!(status = status.as_u16(), %message, "Backend request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
