//! One shell invocation: sign in, fetch, filter, print, export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use erpdesk_client::{ApiClient, ClientConfig, Credentials, SessionContext, Transport};
use erpdesk_collection::{CollectionView, ViewConfig};
use erpdesk_core::Record;
use erpdesk_records::{
    Client, Endpoint, Invoice, PurchaseOrder, Quote, Resource, SalesOrder, StockItem, Supplier,
};

use crate::args::{CliArgs, Collection, ExportScope};
use crate::render;

/// What a run printed and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub table: String,
    pub export: Option<PathBuf>,
}

/// `ERPDESK_USERNAME` / `ERPDESK_PASSWORD`, used when no session is active.
pub fn credentials_from_env() -> Option<Credentials> {
    let username = std::env::var("ERPDESK_USERNAME").ok()?;
    let password = std::env::var("ERPDESK_PASSWORD").ok()?;
    Some(Credentials::new(username, password))
}

pub async fn run(args: CliArgs) -> Result<Outcome> {
    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let view_config = ViewConfig::from_env().context("invalid view configuration")?;
    info!(api = %config.base_url, "starting");

    let client = ApiClient::from_config(&config).context("failed to build HTTP client")?;
    let mut session = SessionContext::new(client, config.auth.clone());
    sign_in(&mut session, credentials_from_env()).await?;

    show(session.client(), &args, &view_config).await
}

/// Restore the cookie session, falling back to a login.
pub async fn sign_in<T: Transport>(
    session: &mut SessionContext<T>,
    credentials: Option<Credentials>,
) -> Result<()> {
    if session.restore().await.is_some() {
        return Ok(());
    }
    match credentials {
        Some(credentials) => {
            let user = session
                .login(&credentials)
                .await
                .context("login failed")?;
            info!(user = %user.display_name(), "signed in");
        }
        None => warn!("no active session and no credentials; continuing anonymously"),
    }
    Ok(())
}

pub async fn show<T: Transport>(
    client: &ApiClient<T>,
    args: &CliArgs,
    view_config: &ViewConfig,
) -> Result<Outcome> {
    match args.collection {
        Collection::Invoices => show_collection::<Invoice, T>(client, args, view_config).await,
        Collection::Quotes => show_collection::<Quote, T>(client, args, view_config).await,
        Collection::SalesOrders => show_collection::<SalesOrder, T>(client, args, view_config).await,
        Collection::PurchaseOrders => {
            show_collection::<PurchaseOrder, T>(client, args, view_config).await
        }
        Collection::Clients => show_collection::<Client, T>(client, args, view_config).await,
        Collection::Suppliers => show_collection::<Supplier, T>(client, args, view_config).await,
        Collection::Stock => show_collection::<StockItem, T>(client, args, view_config).await,
    }
}

async fn show_collection<R, T>(
    client: &ApiClient<T>,
    args: &CliArgs,
    view_config: &ViewConfig,
) -> Result<Outcome>
where
    R: Record + Endpoint + DeserializeOwned,
    T: Transport,
{
    let records = Resource::<R, T>::new(client)
        .list()
        .await
        .with_context(|| format!("failed to fetch {}", R::PATH))?;

    let mut view = CollectionView::with_config(records, view_config);
    view.set_filter(args.filter())
        .context("invalid filter")?;
    if let Some(sort) = &args.sort {
        view.set_sort(sort.clone());
    }
    if let Some(page) = args.page {
        view.set_page(page);
    }

    let table = render::table(&view.derive());

    let export = match args.export {
        None => None,
        Some(scope) => {
            let artifact = match scope {
                ExportScope::Page => view.export_current_page(R::EXPORT_PREFIX),
                ExportScope::All => view.export_all_filtered(R::EXPORT_PREFIX),
            }
            .context("failed to build CSV export")?;
            let path = artifact
                .write_to(&args.out_dir)
                .with_context(|| format!("failed to write export to {}", args.out_dir.display()))?;
            Some(path)
        }
    };

    Ok(Outcome { table, export })
}
