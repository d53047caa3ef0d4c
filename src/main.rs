// Entrypoint for the CLI application.
// - Keeps `main` small: load the credential store, create the book
//   search client and hand both to the UI loop.
// - Returns `anyhow::Result` to simplify error handling for the prototype.

use openshelf_cli::api::BookClient;
use openshelf_cli::store::{CredentialStore, DEFAULT_STORE_PATH};
use openshelf_cli::ui::main_menu;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logging is filtered by RUST_LOG (e.g. RUST_LOG=openshelf_cli=debug)
    // and stays at errors-only by default so the prompts remain clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .try_init();

    // The store file defaults to ./regno.csv; `OPENSHELF_STORE` overrides
    // it. A missing file starts an empty store. See `store::CredentialStore`.
    let store_path =
        std::env::var("OPENSHELF_STORE").unwrap_or_else(|_| DEFAULT_STORE_PATH.into());
    let store = CredentialStore::load(store_path)?;

    // Book search client configured by environment variable
    // `OPENLIBRARY_URL` or the public endpoint. See `api::BookClient::from_env`.
    let api = BookClient::from_env()?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(store, api)?;
    Ok(())
}
