use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "context-api-server")]
#[command(about = "Product recommendation context API", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "context-api.yaml")]
    config: String,

    /// Log at debug level for this crate.
    #[arg(long)]
    debug: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "context_api=debug,tower_http=debug"
    } else {
        "context_api=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = context_api::run(&args.config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
