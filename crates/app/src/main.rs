mod config;

use std::sync::Arc;

use checklist_core::model::{Catalog, ProgressState};
use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ProgressService};
use ui::{App, UiApp, build_app_context};

use crate::config::{Args, catalog_summary, load_catalog, normalize_sqlite_url, prepare_sqlite_file};

struct DesktopApp {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    initial_progress: ProgressState,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn progress_service(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn initial_progress(&self) -> ProgressState {
        self.initial_progress.clone()
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Catalog problems stop startup before any window or database is opened.
    let catalog = load_catalog(args.catalog.as_deref())?;
    tracing::info!(
        sections = catalog.sections().len(),
        steps = catalog.total_steps(),
        "catalog loaded"
    );

    if args.check_catalog {
        print!("{}", catalog_summary(&catalog));
        return Ok(());
    }

    let db_url = normalize_sqlite_url(&args.db_url)?;
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, catalog).await?;
    tracing::info!(db = %db_url, "progress store ready");

    let initial_progress = services.initial_progress().await;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        catalog: services.catalog(),
        progress: services.progress(),
        initial_progress,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Renovation Checklist")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
