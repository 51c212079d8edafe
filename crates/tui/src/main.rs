mod app;
mod client;
mod config;
mod error;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // The alternate screen owns stdout; logs go to stderr so they can be
    // redirected without disturbing the UI.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "carteira_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
