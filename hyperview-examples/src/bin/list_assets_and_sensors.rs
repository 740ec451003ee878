use clap::Parser;
use hyperview::{workflow, ApiClient};
use std::path::PathBuf;

/// Lists the first page of CRAC units and prints the sensors of each one.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Env file providing CLIENT_ID, CLIENT_SECRET and INSTANCE_URL
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let credentials = hyperview_examples::bootstrap(args.env_file.as_deref())?;

    let client = ApiClient::new(&credentials.base_url)?;
    let mut out = std::io::stdout().lock();
    workflow::run(&client, &credentials, &mut out).await?;

    Ok(())
}
