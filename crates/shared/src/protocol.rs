use serde::{Deserialize, Serialize};

use crate::domain::{CustomerId, CustomerRecord, OptionId};

pub const LIST_CUSTOMERS_ROUTE: &str = "/";
pub const CREATE_CUSTOMER_ROUTE: &str = "/createCustomer";
pub const COUNTRIES_ROUTE: &str = "/countries";
pub const LANGUAGES_ROUTE: &str = "/languages";

pub fn delete_customer_path(id: &CustomerId) -> [&str; 2] {
    ["deleteCustomer", id.as_str()]
}

pub fn update_customer_path(id: &CustomerId) -> [&str; 2] {
    ["updateCustomer", id.as_str()]
}

pub fn states_path(country_id: &OptionId) -> [&str; 2] {
    ["states", country_id.as_str()]
}

pub fn cities_path(state_id: &OptionId) -> [&str; 2] {
    ["cities", state_id.as_str()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerListResponse {
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
}

/// Body of `POST /createCustomer`. Location and language references are
/// sent as raw option ids, never as `{label, value}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "CountryId")]
    pub country_id: OptionId,
    #[serde(rename = "StateId")]
    pub state_id: OptionId,
    #[serde(rename = "CityId")]
    pub city_id: OptionId,
    #[serde(rename = "LanguageIds")]
    pub language_ids: Vec<OptionId>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}
