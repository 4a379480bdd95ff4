//! erpdesk command-line entry point.

use clap::Parser;

use erpdesk_desktop::CliArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    erpdesk_observability::init();

    let args = CliArgs::parse();
    let outcome = erpdesk_desktop::run(args).await?;

    print!("{}", outcome.table);
    if let Some(path) = outcome.export {
        println!("exported {}", path.display());
    }
    Ok(())
}
