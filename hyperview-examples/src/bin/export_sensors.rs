use clap::Parser;
use hyperview::{export, workflow, ApiClient};
use std::path::PathBuf;

/// Fetches the sensors of the assets listed in a CSV file and exports them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with an AssetId column
    input: PathBuf,

    /// Where to write the export (default: output_<timestamp>.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Env file providing CLIENT_ID, CLIENT_SECRET and INSTANCE_URL
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let credentials = hyperview_examples::bootstrap(args.env_file.as_deref())?;

    let output = args
        .output
        .unwrap_or_else(|| export::default_output_path(chrono::Local::now()));

    let client = ApiClient::new(&credentials.base_url)?;
    let mut out = std::io::stdout().lock();
    workflow::run_export(&client, &credentials, &args.input, &output, &mut out).await?;

    Ok(())
}
