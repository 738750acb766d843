//! Cat resource server.
//!
//! Run from repo root: `cargo run -p catrest-server`
//! Store selection and connection settings come from the environment (see `AppConfig::from_env`).

use catrest::{app, init_tracing, AppConfig, AppState, Backend, Cat};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("catrest=info,catrest_server=info");

    let config = AppConfig::from_env()?;
    let backend = Backend::<Cat>::connect(&config).await?;
    backend.preparer.prepare().await?;

    let state = AppState::new(backend.store.clone());
    let router = app(&config.base_path, state, config.body_limit);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        base_path = %config.base_path,
        backend = ?config.backend,
        "listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, router).await?;
    Ok(())
}
