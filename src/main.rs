use clap::Parser;
use tracing_subscriber::EnvFilter;

use s3edit::cli::{run, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("[ERROR] {err:#}");
            std::process::exit(1);
        }
    }
}
