use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Category, Product, ProductId},
    error::ErrorCode,
    protocol::{
        ApiMessage, CreatedProduct, DeletedProduct, LoginRequest, LoginResponse, NewProduct,
        ProductListing, RegisterRequest, RegisterResponse,
    },
};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;
pub mod result_list;
pub mod session;
pub mod settings;
pub mod sort;

pub use error::CatalogError;
pub use result_list::{PageView, PaginationError, ResultList};
pub use session::{SessionError, SessionStore, StoredSession, WishlistStore};
pub use settings::{load_settings, Settings};
pub use sort::{SortFields, SortKey, SortOrder};

pub const FEATURED_LIMIT: u32 = 10;
pub const MIN_PASSWORD_LEN: usize = 6;

pub const FALLBACK_CATEGORIES: [&str; 19] = [
    "smartphones",
    "laptops",
    "fragrances",
    "skincare",
    "groceries",
    "home-decoration",
    "furniture",
    "tops",
    "womens-dresses",
    "mens-shirts",
    "mens-shoes",
    "womens-shoes",
    "mens-watches",
    "womens-watches",
    "womens-bags",
    "womens-jewellery",
    "sunglasses",
    "automotive",
    "motorcycle",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductSource {
    #[default]
    All,
    Category(String),
    Search(String),
}

impl ProductSource {
    pub fn from_params(category: Option<&str>, query: Option<&str>) -> Self {
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            return ProductSource::Search(query.to_string());
        }
        match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => ProductSource::Category(category.to_string()),
            None => ProductSource::All,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, CatalogError> {
        let fields = [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(CatalogError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(CatalogError::Validation(
                "Passwords do not match".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CatalogError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }

        Ok(RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.username.trim().to_string(),
            last_name: "User".to_string(),
            age: 25,
        })
    }
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(
        &self,
        source: &ProductSource,
        limit: u32,
    ) -> Result<Vec<Product>, CatalogError>;
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;
    async fn add_product(&self, product: &NewProduct) -> Result<CreatedProduct, CatalogError>;
    async fn delete_product(&self, id: ProductId) -> Result<DeletedProduct, CatalogError>;
    async fn login(&self, username: &str, password: &str)
        -> Result<LoginResponse, CatalogError>;
    async fn register(&self, form: &RegisterForm) -> Result<RegisterResponse, CatalogError>;

    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.list_products(&ProductSource::All, FEATURED_LIMIT)
            .await
    }

    async fn categories_or_fallback(&self) -> Vec<Category> {
        match self.categories().await {
            Ok(categories) => categories,
            Err(err) => {
                warn!(
                    error = %err,
                    code = ?err.code(),
                    "category listing failed; using fallback categories"
                );
                FALLBACK_CATEGORIES
                    .iter()
                    .map(|slug| Category::from(*slug))
                    .collect()
            }
        }
    }
}

/// On failure the list is left empty on page 1.
pub async fn refresh_listing<A: CatalogApi + ?Sized>(
    api: &A,
    list: &mut ResultList<Product>,
    source: &ProductSource,
    limit: u32,
) -> Result<usize, CatalogError> {
    match api.list_products(source, limit).await {
        Ok(products) => {
            let count = products.len();
            list.load(products);
            Ok(count)
        }
        Err(err) => {
            warn!(error = %err, code = ?err.code(), ?source, "product listing failed");
            list.clear();
            Err(err)
        }
    }
}

pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = Url::parse(api_base.trim()).map_err(|e| CatalogError::InvalidBaseUrl {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: api_base.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        Self::new(&settings.api_base, settings.request_timeout())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(CatalogError::Status {
            status: status.as_u16(),
            code: ErrorCode::from_status(status.as_u16()),
            message,
        });
    }
    serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_products(
        &self,
        source: &ProductSource,
        limit: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        let limit = limit.to_string();
        let (url, query): (Url, Vec<(&str, &str)>) = match source {
            ProductSource::All => (
                self.endpoint(&["products"])?,
                vec![("limit", limit.as_str())],
            ),
            ProductSource::Category(slug) => (
                self.endpoint(&["products", "category", slug.as_str()])?,
                vec![("limit", limit.as_str())],
            ),
            ProductSource::Search(q) => (
                self.endpoint(&["products", "search"])?,
                vec![("q", q.as_str()), ("limit", limit.as_str())],
            ),
        };

        debug!(%url, "fetching products");
        let response = self.http.get(url).query(&query).send().await?;
        let products = read_json::<ProductListing>(response)
            .await?
            .into_products();
        info!(count = products.len(), ?source, "loaded products");
        Ok(products)
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let id = id.to_string();
        let url = self.endpoint(&["products", id.as_str()])?;
        debug!(%url, "fetching product");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint(&["products", "categories"])?;
        debug!(%url, "fetching categories");
        let response = self.http.get(url).send().await?;
        let categories: Vec<Category> = read_json(response).await?;
        info!(count = categories.len(), "loaded categories");
        Ok(categories)
    }

    async fn add_product(&self, product: &NewProduct) -> Result<CreatedProduct, CatalogError> {
        let url = self.endpoint(&["products", "add"])?;
        info!(title = %product.title, "adding product");
        let response = self.http.post(url).json(product).send().await?;
        let created: CreatedProduct = read_json(response).await?;
        if created.id.is_none() {
            let message = created
                .attributes
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Failed to add product");
            return Err(CatalogError::Rejected(message.to_string()));
        }
        Ok(created)
    }

    async fn delete_product(&self, id: ProductId) -> Result<DeletedProduct, CatalogError> {
        let url = self.endpoint(&["products", id.to_string().as_str()])?;
        info!(product_id = id.0, "deleting product");
        let response = self.http.delete(url).send().await?;
        read_json(response).await
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, CatalogError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CatalogError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        let url = self.endpoint(&["auth", "login"])?;
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
            expires_in_mins: None,
        };
        let response = self.http.post(url).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if let Ok(login) = serde_json::from_slice::<LoginResponse>(&body) {
            if login.auth_token().is_some() {
                info!(username = %login.username, "signed in");
                return Ok(login);
            }
        }
        let message = serde_json::from_slice::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| "Invalid credentials".to_string());
        warn!(status = status.as_u16(), %message, "sign in rejected");
        Err(CatalogError::Rejected(message))
    }

    async fn register(&self, form: &RegisterForm) -> Result<RegisterResponse, CatalogError> {
        let request = form.validate()?;
        let url = self.endpoint(&["users", "add"])?;
        let response = self.http.post(url).json(&request).send().await?;
        let registered: RegisterResponse = read_json(response).await?;
        if registered.id.is_none() {
            let message = registered
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(CatalogError::Rejected(message));
        }
        info!(username = %request.username, "account created");
        Ok(registered)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
