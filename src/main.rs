use clap::Parser;

use pocketlink::cli::Cli;
use pocketlink::runtime::modes::cli::run_cli;

#[tokio::main]
async fn main() {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    if let Err(e) = run_cli(args).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
