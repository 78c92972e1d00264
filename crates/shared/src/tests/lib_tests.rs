use serde_json::json;

use crate::{
    domain::{CustomerId, CustomerPatch, CustomerRecord, NamedRef, OptionId, OptionRef},
    error::ApiErrorBody,
    protocol::{CreateCustomerRequest, CustomerListResponse},
};

fn sample_record() -> CustomerRecord {
    CustomerRecord {
        id: CustomerId::new("64f0c0ffee"),
        full_name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        country: NamedRef::new("United Kingdom"),
        state: NamedRef::new("England"),
        city: NamedRef::new("London"),
        languages: vec![NamedRef::new("English"), NamedRef::new("French")],
        is_active: true,
        created_date: "2024-01-15T09:30:00Z".into(),
    }
}

#[test]
fn list_response_uses_directory_field_names() {
    let body = json!({
        "customers": [{
            "_id": "64f0c0ffee",
            "FullName": "Ada Lovelace",
            "Email": "ada@example.com",
            "CountryId": { "name": "United Kingdom" },
            "StateId": { "name": "England" },
            "CityId": { "name": "London" },
            "LanguageIds": [{ "name": "English" }, { "name": "French" }],
            "isActive": true,
            "CreatedDate": "2024-01-15T09:30:00Z"
        }]
    });

    let parsed: CustomerListResponse = serde_json::from_value(body).expect("parse");
    assert_eq!(parsed.customers, vec![sample_record()]);
    assert_eq!(parsed.customers[0].language_names(), "English, French");
}

#[test]
fn list_response_tolerates_missing_optional_fields() {
    let body = json!({
        "customers": [{ "_id": "1", "FullName": "Bob", "Email": "bob@example.com" }]
    });

    let parsed: CustomerListResponse = serde_json::from_value(body).expect("parse");
    let record = &parsed.customers[0];
    assert!(!record.is_active);
    assert!(record.languages.is_empty());
    assert_eq!(record.country, NamedRef::default());
    assert!(record.created_at().is_none());
}

#[test]
fn created_at_parses_rfc3339() {
    let created = sample_record().created_at().expect("timestamp");
    assert_eq!(created.to_rfc3339(), "2024-01-15T09:30:00+00:00");
}

#[test]
fn patch_serializes_only_touched_fields() {
    let patch = CustomerPatch {
        email: Some("new@example.com".into()),
        ..CustomerPatch::default()
    };

    let value = serde_json::to_value(&patch).expect("serialize");
    assert_eq!(value, json!({ "Email": "new@example.com" }));
    assert!(!patch.is_empty());
    assert!(CustomerPatch::default().is_empty());
}

#[test]
fn merge_replaces_only_present_fields() {
    let record = sample_record();
    let patch = CustomerPatch {
        email: Some("countess@example.com".into()),
        ..CustomerPatch::default()
    };

    let merged = record.merge(&patch);
    assert_eq!(merged.email, "countess@example.com");
    assert_eq!(merged.full_name, record.full_name);
    assert_eq!(merged.is_active, record.is_active);
    assert_eq!(merged.languages, record.languages);
}

#[test]
fn option_ref_accepts_model_shape() {
    let from_select: OptionRef =
        serde_json::from_value(json!({ "label": "Spain", "value": "es" })).expect("select");
    let from_model: OptionRef =
        serde_json::from_value(json!({ "name": "Spain", "_id": "es" })).expect("model");

    assert_eq!(from_select, from_model);
    assert!(from_select.is_well_formed());
    assert!(!OptionRef::new("  ", "es").is_well_formed());
}

#[test]
fn create_request_sends_ids_not_labels() {
    let request = CreateCustomerRequest {
        full_name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        country_id: OptionId::new("gb"),
        state_id: OptionId::new("eng"),
        city_id: OptionId::new("ldn"),
        language_ids: vec![OptionId::new("en"), OptionId::new("fr")],
        is_active: true,
    };

    let value = serde_json::to_value(&request).expect("serialize");
    assert_eq!(
        value,
        json!({
            "FullName": "Ada Lovelace",
            "Email": "ada@example.com",
            "Password": "secret1",
            "CountryId": "gb",
            "StateId": "eng",
            "CityId": "ldn",
            "LanguageIds": ["en", "fr"],
            "isActive": true
        })
    );
}

#[test]
fn error_body_prefers_message_then_error() {
    let body: ApiErrorBody =
        serde_json::from_value(json!({ "error": "duplicate email" })).expect("parse");
    assert_eq!(body.into_message().as_deref(), Some("duplicate email"));

    let blank: ApiErrorBody = serde_json::from_value(json!({ "message": "  " })).expect("parse");
    assert_eq!(blank.into_message(), None);
}
