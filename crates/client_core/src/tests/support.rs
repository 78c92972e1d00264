//! In-memory directory used by controller tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use shared::{
    domain::{CustomerId, CustomerPatch, CustomerRecord, NamedRef, OptionId, OptionRef},
    protocol::CreateCustomerRequest,
};
use tokio::sync::Mutex;

use crate::{CustomerDirectory, DirectoryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Create(CreateCustomerRequest),
    Update(CustomerId, CustomerPatch),
    Delete(CustomerId),
    Countries,
    States(OptionId),
    Cities(OptionId),
    Languages,
}

#[derive(Default)]
pub(crate) struct FakeDirectory {
    customers: Vec<CustomerRecord>,
    countries: Vec<OptionRef>,
    states: HashMap<String, Vec<OptionRef>>,
    cities: HashMap<String, Vec<OptionRef>>,
    languages: Vec<OptionRef>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_customers(mut self, customers: Vec<CustomerRecord>) -> Self {
        self.customers = customers;
        self
    }

    pub(crate) fn with_countries(mut self, countries: Vec<OptionRef>) -> Self {
        self.countries = countries;
        self
    }

    pub(crate) fn with_states(mut self, country: &str, states: Vec<OptionRef>) -> Self {
        self.states.insert(country.to_string(), states);
        self
    }

    pub(crate) fn with_cities(mut self, state: &str, cities: Vec<OptionRef>) -> Self {
        self.cities.insert(state.to_string(), cities);
        self
    }

    pub(crate) fn with_languages(mut self, languages: Vec<OptionRef>) -> Self {
        self.languages = languages;
        self
    }

    /// Makes every call of `operation` fail with HTTP 500.
    pub(crate) async fn fail_on(&self, operation: &'static str) {
        self.failing.lock().await.insert(operation);
    }

    pub(crate) async fn recover(&self, operation: &'static str) {
        self.failing.lock().await.remove(operation);
    }

    pub(crate) async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, operation: &'static str, call: Call) -> Result<(), DirectoryError> {
        self.calls.lock().await.push(call);
        if self.failing.lock().await.contains(operation) {
            return Err(DirectoryError::Status {
                operation,
                status: 500,
                message: Some("boom".to_string()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerDirectory for FakeDirectory {
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError> {
        self.record("list customers", Call::List).await?;
        Ok(self.customers.clone())
    }

    async fn create_customer(&self, request: &CreateCustomerRequest) -> Result<(), DirectoryError> {
        self.record("create customer", Call::Create(request.clone())).await
    }

    async fn update_customer(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<(), DirectoryError> {
        self.record("update customer", Call::Update(id.clone(), patch.clone())).await
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), DirectoryError> {
        self.record("delete customer", Call::Delete(id.clone())).await
    }

    async fn countries(&self) -> Result<Vec<OptionRef>, DirectoryError> {
        self.record("list countries", Call::Countries).await?;
        Ok(self.countries.clone())
    }

    async fn states(&self, country_id: &OptionId) -> Result<Vec<OptionRef>, DirectoryError> {
        self.record("list states", Call::States(country_id.clone())).await?;
        Ok(self
            .states
            .get(country_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn cities(&self, state_id: &OptionId) -> Result<Vec<OptionRef>, DirectoryError> {
        self.record("list cities", Call::Cities(state_id.clone())).await?;
        Ok(self
            .cities
            .get(state_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn languages(&self) -> Result<Vec<OptionRef>, DirectoryError> {
        self.record("list languages", Call::Languages).await?;
        Ok(self.languages.clone())
    }
}

pub(crate) fn customer(id: &str, full_name: &str, email: &str) -> CustomerRecord {
    CustomerRecord {
        id: CustomerId::new(id),
        full_name: full_name.to_string(),
        email: email.to_string(),
        country: NamedRef::new("India"),
        state: NamedRef::new("Gujarat"),
        city: NamedRef::new("Surat"),
        languages: vec![NamedRef::new("Gujarati")],
        is_active: true,
        created_date: "2024-02-01T10:00:00Z".to_string(),
    }
}

pub(crate) fn customers(count: usize) -> Vec<CustomerRecord> {
    (1..=count)
        .map(|n| {
            customer(
                &format!("c-{n}"),
                &format!("Customer {n}"),
                &format!("c{n}@example.com"),
            )
        })
        .collect()
}

pub(crate) fn option(label: &str, value: &str) -> OptionRef {
    OptionRef::new(label, value)
}
