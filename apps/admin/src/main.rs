mod config;
mod events;
mod render;

use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    CustomerDirectory, CustomerTable, FetchOutcome, HttpDirectoryClient, ModalStore,
    RegistrationForm, SubmitOutcome, ValidationRules,
};
use shared::domain::{CustomerId, OptionId, OptionRef};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::load_settings, events::FetchQueue};

#[derive(Parser, Debug)]
#[command(name = "customer-admin", about = "Manage customers in the directory service")]
struct Args {
    /// Directory base URL; overrides the config file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true, default_value = "admin.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of the customer table.
    List {
        #[arg(long, default_value = "1")]
        page: NonZeroUsize,
    },
    /// Edit a customer's name, email or active flag.
    Update {
        id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Create a customer. Location and language values match by label or id.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        city: String,
        #[arg(long = "language")]
        languages: Vec<String>,
    },
    /// Dump a selectable option list.
    Options {
        #[command(subcommand)]
        list: OptionList,
    },
}

#[derive(Subcommand, Debug)]
enum OptionList {
    Countries,
    Languages,
    States { country_id: String },
    Cities { state_id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.config, args.api_url.as_deref())?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(api = %settings.api_base_url, "using directory service");
    let client = HttpDirectoryClient::new(&settings.api_base_url)?;
    let api: Arc<dyn CustomerDirectory> = Arc::new(client);
    let modal = ModalStore::new();

    match args.command {
        Command::List { page } => {
            let mut table = CustomerTable::new(modal);
            table.load(api.as_ref()).await?;
            table.set_page(page);
            print!("{}", render::customer_table(table.visible()));
            println!("{}", render::page_selector(&table.window()));
        }
        Command::Update {
            id,
            full_name,
            email,
            active,
        } => {
            let id = CustomerId::new(id);
            let mut table = CustomerTable::new(modal);
            table.load(api.as_ref()).await?;
            table.begin_edit(&id)?;
            if let Some(full_name) = full_name {
                table.edit_full_name(full_name)?;
            }
            if let Some(email) = email {
                table.edit_email(email)?;
            }
            if let Some(active) = active {
                table.edit_active(active)?;
            }
            table.save(api.as_ref()).await?;
            if let Some(row) = table.customers().iter().find(|c| c.id == id) {
                print!("{}", render::customer_table(std::slice::from_ref(row)));
            }
        }
        Command::Delete { id, yes } => {
            let id = CustomerId::new(id);
            let mut table = CustomerTable::new(modal.clone());
            table.load(api.as_ref()).await?;
            table.request_delete(&id)?;
            if !yes {
                if let Some(prompt) = modal.payload().as_ref().and_then(render::removal_prompt) {
                    println!("{prompt}");
                }
                return Ok(());
            }
            let removed = table.confirm_delete(api.as_ref()).await?;
            println!("Removed customer {removed}");
        }
        Command::Register {
            full_name,
            email,
            password,
            country,
            state,
            city,
            languages,
        } => {
            let rules = ValidationRules {
                require_language: settings.require_language,
            };
            let mut form = RegistrationForm::with_rules(modal, rules);
            let mut queue = FetchQueue::new(Arc::clone(&api));
            form.open();
            form.load_initial_options(api.as_ref()).await;
            if let Some(err) = form.error() {
                bail!("{err}");
            }

            form.set_full_name(full_name);
            form.set_email(email);
            form.set_password(password);

            let country = pick(form.country_options(), &country, "country")?;
            if let Some(fetch) = form.select_country(Some(country)) {
                queue.spawn(fetch);
            }
            await_options(&mut queue, &mut form).await?;

            let state = pick(form.state_options(), &state, "state")?;
            if let Some(fetch) = form.select_state(Some(state)) {
                queue.spawn(fetch);
            }
            await_options(&mut queue, &mut form).await?;

            let city = pick(form.city_options(), &city, "city")?;
            form.select_city(Some(city));

            let selected = languages
                .iter()
                .map(|wanted| pick(form.language_options(), wanted, "language"))
                .collect::<Result<Vec<_>>>()?;
            form.set_languages(selected);

            match form.submit(api.as_ref()).await {
                SubmitOutcome::Created => println!("Customer created"),
                SubmitOutcome::Invalid(err) => bail!("{err}"),
                SubmitOutcome::Failed => {
                    bail!("{}", form.error().unwrap_or("customer creation failed"))
                }
            }
        }
        Command::Options { list } => {
            let options = match list {
                OptionList::Countries => api.countries().await?,
                OptionList::Languages => api.languages().await?,
                OptionList::States { country_id } => api.states(&OptionId::new(country_id)).await?,
                OptionList::Cities { state_id } => api.cities(&OptionId::new(state_id)).await?,
            };
            print!("{}", render::options(&options));
        }
    }

    Ok(())
}

async fn await_options(queue: &mut FetchQueue, form: &mut RegistrationForm) -> Result<()> {
    let outcomes = queue.drain_into(form).await;
    if outcomes.contains(&FetchOutcome::Failed) {
        bail!("{}", form.error().unwrap_or("option fetch failed"));
    }
    Ok(())
}

/// Finds `wanted` by id, then by case-insensitive label.
fn pick(options: &[OptionRef], wanted: &str, what: &str) -> Result<OptionRef> {
    options
        .iter()
        .find(|opt| opt.value.as_str() == wanted)
        .or_else(|| {
            options
                .iter()
                .find(|opt| opt.label.eq_ignore_ascii_case(wanted))
        })
        .cloned()
        .with_context(|| format!("unknown {what} '{wanted}'"))
}
