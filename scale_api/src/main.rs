//! HTTP service that reads weight scales over serial ports.
//!
//! Boot order: parse args, load and validate the TOML config, install
//! tracing, compile the data pattern, then serve the router until killed.

mod cli;
mod handlers;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;

use crate::cli::Cli;
use crate::service::ScaleService;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.config)
        .wrap_err_with(|| format!("read config {}", cli.config.display()))?;
    let cfg = scale_config::load_toml(&raw)
        .wrap_err_with(|| format!("parse config {}", cli.config.display()))?;
    cfg.validate().wrap_err("invalid configuration")?;

    cli::init_tracing(&cli, &cfg.logging)?;

    let service = Arc::new(ScaleService::from_config(&cfg)?);
    let app = routes::router(service);

    let addr: std::net::SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .wrap_err("parse http.bind_addr")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("bind {addr}"))?;
    tracing::info!(%addr, scales = cfg.scales.len(), "scale service listening");
    axum::serve(listener, app).await.wrap_err("serve http")?;
    Ok(())
}
