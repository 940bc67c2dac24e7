mod config;
mod db;
mod display;
mod input;
mod models;
mod run;
mod summary;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let data_dir = config::data_dir()?;
    let settings = config::Settings::load(&data_dir)?;
    let db = db::Database::open(&settings.database_path(&data_dir))?;

    let today = chrono::Local::now().date_naive();
    let mut ctx = run::Context::new(db, settings, today);
    let stdout = std::io::stdout();
    run::as_cli(&args, &mut ctx, &mut stdout.lock())
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
