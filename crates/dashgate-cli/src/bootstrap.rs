//! CLI bootstrap - the composition root.
//!
//! Wires the directory asset store, the SSE broadcaster and the report file
//! into a gateway, then drives it until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use dashgate_axum::{
    DirAssets, Gateway, GatewayOptions, RouterDeps, SseBroadcaster, create_broadcaster, report,
};
use dashgate_core::DefaultLanguage;
use tracing::info;

use crate::parser::Cli;
use crate::replay::replay_file;

/// Everything the CLI needs while the dashboard is up.
pub struct CliContext {
    /// The gateway, not yet listening.
    pub gateway: Gateway,
    /// Event broadcaster feeding `/events`.
    pub broadcaster: Arc<SseBroadcaster>,
}

/// Validate arguments and assemble the gateway.
pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let lang = DefaultLanguage::new(cli.lang.as_str()).context("Invalid --lang")?;

    if !cli.ui_dir.is_dir() {
        bail!("UI directory {} does not exist", cli.ui_dir.display());
    }
    if let Some(path) = &cli.report {
        if !path.is_file() {
            bail!("Report file {} does not exist", path.display());
        }
    }

    let report = match &cli.report {
        Some(path) => report::from_file(path),
        None => report::unavailable(),
    };

    let broadcaster = create_broadcaster();
    let deps = RouterDeps {
        assets: Arc::new(DirAssets::new(&cli.ui_dir)),
        events: broadcaster.clone(),
        report,
        lang,
    };

    let span = tracing::info_span!("dashgate", ui_dir = %cli.ui_dir.display());
    let gateway = Gateway::new(deps, GatewayOptions::default().with_span(span));

    Ok(CliContext {
        gateway,
        broadcaster,
    })
}

/// Serve until interrupted.
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = bootstrap(&cli)?;

    let addr = ctx.gateway.listen_and_serve(&cli.address()).await?;
    info!("Dashboard available at http://{addr}/");

    if let Some(path) = &cli.replay {
        replay_file(path, ctx.broadcaster.as_ref()).await?;
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutting down");

    ctx.gateway.stop().await?;
    Ok(())
}
