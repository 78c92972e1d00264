//! New-customer registration form with cascading location selects.
//!
//! Country scopes the state options and state scopes the city options.
//! Changing an upstream selection clears everything below it immediately,
//! before the replacement options arrive. Option fetches are issued by the
//! caller (see [`DependentFetch::run`]) and fed back through
//! [`RegistrationForm::apply_dependent_options`]; a result is only applied when
//! its token is still the latest one issued for that kind.

use futures::future;
use shared::{
    domain::{OptionId, OptionRef},
    protocol::CreateCustomerRequest,
};
use tracing::{debug, info, warn};

use crate::{
    error::{DirectoryError, ValidationError},
    modal::{ModalKind, ModalStore},
    validation::{self, ValidationRules},
    CustomerDirectory,
};

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create customer. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub country: Option<OptionRef>,
    pub state: Option<OptionRef>,
    pub city: Option<OptionRef>,
    /// Selection order is kept; duplicates by value are dropped.
    pub languages: Vec<OptionRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependentKind {
    States,
    Cities,
}

impl DependentKind {
    fn label(self) -> &'static str {
        match self {
            Self::States => "states",
            Self::Cities => "cities",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct TokenCounter {
    latest: RequestToken,
}

impl TokenCounter {
    fn issue(&mut self) -> RequestToken {
        self.latest = RequestToken(self.latest.0 + 1);
        self.latest
    }

    fn is_latest(&self, token: RequestToken) -> bool {
        self.latest == token
    }
}

/// An option fetch the form wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentFetch {
    pub kind: DependentKind,
    pub parent: OptionId,
    pub token: RequestToken,
}

impl DependentFetch {
    pub async fn run<D>(self, api: &D) -> (Self, Result<Vec<OptionRef>, DirectoryError>)
    where
        D: CustomerDirectory + ?Sized,
    {
        let result = match self.kind {
            DependentKind::States => api.states(&self.parent).await,
            DependentKind::Cities => api.cities(&self.parent).await,
        };
        (self, result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// Superseded by a later selection; nothing changed.
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Invalid(ValidationError),
    Failed,
}

#[derive(Debug)]
pub struct RegistrationForm {
    form: FormState,
    countries: Vec<OptionRef>,
    states: Vec<OptionRef>,
    cities: Vec<OptionRef>,
    languages: Vec<OptionRef>,
    state_tokens: TokenCounter,
    city_tokens: TokenCounter,
    rules: ValidationRules,
    error: Option<String>,
    modal: ModalStore,
}

impl RegistrationForm {
    pub fn new(modal: ModalStore) -> Self {
        Self::with_rules(modal, ValidationRules::default())
    }

    pub fn with_rules(modal: ModalStore, rules: ValidationRules) -> Self {
        Self {
            form: FormState::default(),
            countries: Vec::new(),
            states: Vec::new(),
            cities: Vec::new(),
            languages: Vec::new(),
            state_tokens: TokenCounter::default(),
            city_tokens: TokenCounter::default(),
            rules,
            error: None,
            modal,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn country_options(&self) -> &[OptionRef] {
        &self.countries
    }

    pub fn state_options(&self) -> &[OptionRef] {
        &self.states
    }

    pub fn city_options(&self) -> &[OptionRef] {
        &self.cities
    }

    pub fn language_options(&self) -> &[OptionRef] {
        &self.languages
    }

    pub fn is_visible(&self) -> bool {
        self.modal.is_showing(ModalKind::CreateUser)
    }

    pub fn open(&self) {
        self.modal.open(ModalKind::CreateUser, None);
    }

    pub fn close(&self) {
        self.modal.close();
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.form.full_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.form.email = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.form.password = value.into();
    }

    /// Fetches countries and languages together and applies both.
    pub async fn load_initial_options<D>(&mut self, api: &D)
    where
        D: CustomerDirectory + ?Sized,
    {
        let (countries, languages) = future::join(api.countries(), api.languages()).await;
        self.apply_initial_options(countries, languages);
    }

    pub fn apply_initial_options(
        &mut self,
        countries: Result<Vec<OptionRef>, DirectoryError>,
        languages: Result<Vec<OptionRef>, DirectoryError>,
    ) {
        match countries {
            Ok(options) => self.countries = options,
            Err(err) => {
                warn!(error = %err, "failed to load countries");
                self.error = Some("Failed to load countries.".to_string());
            }
        }
        match languages {
            Ok(options) => self.languages = options,
            Err(err) => {
                warn!(error = %err, "failed to load languages");
                self.error = Some("Failed to load languages.".to_string());
            }
        }
    }

    /// Sets the country and clears state, city and the city options.
    ///
    /// Any state or city fetch still in flight becomes stale. Returns the
    /// states fetch to run when a country was chosen.
    pub fn select_country(&mut self, country: Option<OptionRef>) -> Option<DependentFetch> {
        self.form.state = None;
        self.form.city = None;
        self.cities.clear();
        self.city_tokens.issue();
        let token = self.state_tokens.issue();

        let Some(country) = country else {
            self.form.country = None;
            self.states.clear();
            return None;
        };

        let fetch = DependentFetch {
            kind: DependentKind::States,
            parent: country.value.clone(),
            token,
        };
        debug!(country = %country.value, ?token, "queued states fetch");
        self.form.country = Some(country);
        Some(fetch)
    }

    /// Sets the state and clears the city and the city options.
    pub fn select_state(&mut self, state: Option<OptionRef>) -> Option<DependentFetch> {
        self.form.city = None;
        self.cities.clear();
        let token = self.city_tokens.issue();

        let Some(state) = state else {
            self.form.state = None;
            return None;
        };

        let fetch = DependentFetch {
            kind: DependentKind::Cities,
            parent: state.value.clone(),
            token,
        };
        debug!(state = %state.value, ?token, "queued cities fetch");
        self.form.state = Some(state);
        Some(fetch)
    }

    pub fn select_city(&mut self, city: Option<OptionRef>) {
        self.form.city = city;
    }

    pub fn set_languages(&mut self, languages: Vec<OptionRef>) {
        let mut selected: Vec<OptionRef> = Vec::with_capacity(languages.len());
        for lang in languages {
            if !selected.iter().any(|existing| existing.value == lang.value) {
                selected.push(lang);
            }
        }
        self.form.languages = selected;
    }

    /// Adds `language` at the end of the selection, or removes it if present.
    pub fn toggle_language(&mut self, language: OptionRef) {
        let before = self.form.languages.len();
        self.form
            .languages
            .retain(|existing| existing.value != language.value);
        if self.form.languages.len() == before {
            self.form.languages.push(language);
        }
    }

    pub fn apply_dependent_options(
        &mut self,
        fetch: &DependentFetch,
        result: Result<Vec<OptionRef>, DirectoryError>,
    ) -> FetchOutcome {
        let tokens = match fetch.kind {
            DependentKind::States => &self.state_tokens,
            DependentKind::Cities => &self.city_tokens,
        };
        if !tokens.is_latest(fetch.token) {
            debug!(
                kind = fetch.kind.label(),
                parent = %fetch.parent,
                token = ?fetch.token,
                "discarding superseded option fetch"
            );
            return FetchOutcome::Stale;
        }

        let target = match fetch.kind {
            DependentKind::States => &mut self.states,
            DependentKind::Cities => &mut self.cities,
        };
        match result {
            Ok(options) => {
                *target = options;
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(kind = fetch.kind.label(), parent = %fetch.parent, error = %err, "option fetch failed");
                target.clear();
                self.error = Some(format!("Failed to load {}.", fetch.kind.label()));
                FetchOutcome::Failed
            }
        }
    }

    /// Validates without submitting and records the first violation.
    pub fn validate(&mut self) -> Result<CreateCustomerRequest, ValidationError> {
        validation::validate(&self.form, self.rules).inspect_err(|err| {
            self.error = Some(err.message.clone());
        })
    }

    /// Validates, then creates the customer.
    ///
    /// On success the form returns to its initial state and the modal closes.
    /// On failure every entered value is kept.
    pub async fn submit<D>(&mut self, api: &D) -> SubmitOutcome
    where
        D: CustomerDirectory + ?Sized,
    {
        let request = match self.validate() {
            Ok(request) => request,
            Err(err) => return SubmitOutcome::Invalid(err),
        };

        match api.create_customer(&request).await {
            Ok(()) => {
                info!(email = %request.email, "customer created");
                self.reset();
                self.modal.close();
                SubmitOutcome::Created
            }
            Err(err) => {
                warn!(error = %err, "customer creation failed");
                self.error = Some(CREATE_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    fn reset(&mut self) {
        self.form = FormState::default();
        self.states.clear();
        self.cities.clear();
        self.state_tokens.issue();
        self.city_tokens.issue();
        self.error = None;
    }
}

#[cfg(test)]
#[path = "tests/registration_tests.rs"]
mod tests;
