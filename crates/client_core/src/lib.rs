use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CustomerId, CustomerPatch, CustomerRecord, OptionId, OptionRef},
    error::ApiErrorBody,
    protocol::{
        cities_path, delete_customer_path, states_path, update_customer_path,
        CreateCustomerRequest, CustomerListResponse, COUNTRIES_ROUTE, CREATE_CUSTOMER_ROUTE,
        LANGUAGES_ROUTE, LIST_CUSTOMERS_ROUTE,
    },
};
use tracing::debug;
use url::Url;

pub mod error;
pub mod modal;
pub mod pagination;
pub mod registration;
pub mod table;
pub mod validation;

pub use error::{DirectoryError, FormField, TableError, ValidationError};
pub use modal::{ModalKind, ModalPayload, ModalStore, ModalVisibility};
pub use pagination::{PageWindow, PAGE_SIZE};
pub use registration::{
    DependentFetch, DependentKind, FetchOutcome, FormState, RegistrationForm, RequestToken,
    SubmitOutcome,
};
pub use table::{CustomerTable, EditSession};
pub use validation::ValidationRules;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Customer records plus the location and language option lists that feed
/// the registration selects.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError>;
    async fn create_customer(&self, request: &CreateCustomerRequest) -> Result<(), DirectoryError>;
    async fn update_customer(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<(), DirectoryError>;
    async fn delete_customer(&self, id: &CustomerId) -> Result<(), DirectoryError>;
    async fn countries(&self) -> Result<Vec<OptionRef>, DirectoryError>;
    async fn states(&self, country_id: &OptionId) -> Result<Vec<OptionRef>, DirectoryError>;
    async fn cities(&self, state_id: &OptionId) -> Result<Vec<OptionRef>, DirectoryError>;
    async fn languages(&self) -> Result<Vec<OptionRef>, DirectoryError>;
}

#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    http: Client,
    base_url: Url,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str) -> Result<Self, DirectoryError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, DirectoryError> {
        let parsed = Url::parse(base_url).map_err(|source| DirectoryError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(DirectoryError::OpaqueBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, DirectoryError> {
        let response = request
            .send()
            .await
            .map_err(|source| DirectoryError::Transport { operation, source })?;
        let status = response.status();
        if status.is_success() {
            debug!(operation, status = status.as_u16(), "directory request ok");
            return Ok(response);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(ApiErrorBody::into_message);
        Err(DirectoryError::Status {
            operation,
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> Result<T, DirectoryError> {
        self.send(operation, self.http.get(url))
            .await?
            .json::<T>()
            .await
            .map_err(|source| DirectoryError::Decode { operation, source })
    }
}

fn route_segments(route: &str) -> impl Iterator<Item = &str> {
    route.trim_start_matches('/').split('/')
}

#[async_trait]
impl CustomerDirectory for HttpDirectoryClient {
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError> {
        let url = self.endpoint(route_segments(LIST_CUSTOMERS_ROUTE));
        let body: CustomerListResponse = self.get_json("list customers", url).await?;
        Ok(body.customers)
    }

    async fn create_customer(&self, request: &CreateCustomerRequest) -> Result<(), DirectoryError> {
        let url = self.endpoint(route_segments(CREATE_CUSTOMER_ROUTE));
        self.send("create customer", self.http.post(url).json(request)).await?;
        Ok(())
    }

    async fn update_customer(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<(), DirectoryError> {
        let url = self.endpoint(update_customer_path(id));
        self.send("update customer", self.http.put(url).json(patch)).await?;
        Ok(())
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), DirectoryError> {
        let url = self.endpoint(delete_customer_path(id));
        self.send("delete customer", self.http.delete(url)).await?;
        Ok(())
    }

    async fn countries(&self) -> Result<Vec<OptionRef>, DirectoryError> {
        let url = self.endpoint(route_segments(COUNTRIES_ROUTE));
        self.get_json("list countries", url).await
    }

    async fn states(&self, country_id: &OptionId) -> Result<Vec<OptionRef>, DirectoryError> {
        let url = self.endpoint(states_path(country_id));
        self.get_json("list states", url).await
    }

    async fn cities(&self, state_id: &OptionId) -> Result<Vec<OptionRef>, DirectoryError> {
        let url = self.endpoint(cities_path(state_id));
        self.get_json("list cities", url).await
    }

    async fn languages(&self) -> Result<Vec<OptionRef>, DirectoryError> {
        let url = self.endpoint(route_segments(LANGUAGES_ROUTE));
        self.get_json("list languages", url).await
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
