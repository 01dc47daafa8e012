use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plantdeck_tui::AppConfig;
use plantdeck_types::Theme;

#[derive(Parser)]
#[command(name = "plantdeck")]
#[command(author, version, about = "Terminal dashboard for a greenhouse sensor node", long_about = None)]
struct Cli {
    /// Node URL (overrides the config file)
    #[arg(short, long)]
    server: Option<String>,

    /// Theme: light, dark, or auto (overrides the config file)
    #[arg(short, long)]
    theme: Option<Theme>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go through tracing; the default level stays at warn so the
    // alternate screen is not disturbed unless RUST_LOG asks for more.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load();
    let server_url = cli.server.unwrap_or(config.server_url);
    let theme = cli.theme.unwrap_or(config.theme);

    plantdeck_tui::run(&server_url, theme).await
}
