//! Watch command implementation
//!
//! Renders the portfolio, then keeps it fresh on a timer until
//! interrupted. The timer is held through a `RefreshHandle` so stopping
//! the watch also stops the timer task.

use std::sync::Arc;
use std::time::Duration;

use crate::cli::{CommandContext, GlobalOptions, show};
use crate::error::Result;
use crate::portfolio::spawn_auto_refresh;

/// Run the watch command
pub async fn run(opts: &GlobalOptions, interval_minutes: Option<u64>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let paths = ctx.discover_projects()?;

    if paths.is_empty() {
        println!(
            "No project files found in {}",
            ctx.require_projects_dir()?.display()
        );
        return Ok(());
    }

    let mut registry = ctx.registry();
    registry.load_projects(&paths).await?;
    registry.sort_by_last_updated();
    show::render(registry.projects(), ctx.format)?;

    let minutes = interval_minutes
        .unwrap_or(ctx.config.preferences.refresh_minutes)
        .max(1);
    let format = ctx.format;

    let registry = Arc::new(tokio::sync::Mutex::new(registry));
    let handle = spawn_auto_refresh(
        Arc::clone(&registry),
        Duration::from_secs(minutes * 60),
        move |projects| {
            if let Err(err) = show::render(projects, format) {
                log::warn!("Render after refresh failed: {}", err);
            }
        },
    );

    println!("Refreshing every {} min; press Ctrl-C to stop.", minutes);
    tokio::signal::ctrl_c().await?;
    handle.stop();

    Ok(())
}
