//! MongoDB client factory.
//!
//! Resolves the connection string from settings, builds a pooled client and
//! pings the server so a bad endpoint fails at startup rather than on the
//! first request.

use anyhow::{bail, Context};
use bookshelf_kernel::settings::{Environment, Settings};
use mongodb::{bson::doc, Client, Database};

/// Connection string used when running locally without `database.uri`.
pub const LOCAL_FALLBACK_URI: &str = "mongodb://127.0.0.1:27017";

/// Pick the MongoDB connection string for the current environment.
///
/// An explicit `database.uri` always wins. Without one, only the `local`
/// environment falls back to [`LOCAL_FALLBACK_URI`]; every other environment
/// is a configuration error.
pub fn resolve_uri(settings: &Settings) -> anyhow::Result<String> {
    match settings.database.uri.as_deref().map(str::trim) {
        Some(uri) if !uri.is_empty() => Ok(uri.to_string()),
        _ if settings.environment == Environment::Local => {
            tracing::warn!(
                target: "bookshelf-db",
                uri = LOCAL_FALLBACK_URI,
                "database.uri is not set, using the local development fallback"
            );
            Ok(LOCAL_FALLBACK_URI.to_string())
        }
        _ => bail!(
            "database.uri must be set in the '{}' environment (BOOKSHELF_DATABASE__URI)",
            settings.environment.as_str()
        ),
    }
}

/// Connect to MongoDB and return a handle to the configured database.
pub async fn connect(settings: &Settings) -> anyhow::Result<Database> {
    let uri = resolve_uri(settings)?;

    let client = Client::with_uri_str(&uri)
        .await
        .context("invalid MongoDB connection string")?;
    let database = client.database(&settings.database.name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("MongoDB at '{}' did not answer ping", redact(&uri)))?;

    tracing::info!(
        target: "bookshelf-db",
        database = %settings.database.name,
        "connected to MongoDB"
    );

    Ok(database)
}

/// Strip credentials from a connection string before it reaches a log line.
fn redact(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &uri[..scheme_end], &uri[at..])
        }
        _ => uri.to_string(),
    }
}
