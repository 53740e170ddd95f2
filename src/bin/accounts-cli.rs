use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "accounts-cli")]
#[command(about = "Command line client for the account proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an account by id
    Get { account_id: String },
    /// Create an account from a JSON envelope file
    Create { file: PathBuf },
    /// Delete an account at a given version
    Delete {
        account_id: String,
        #[arg(short, long)]
        version: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let accounts = format!("{}/form3Client/accounts", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::Get { account_id } => {
            client.get(format!("{}/{}", accounts, account_id)).send().await?
        }
        Commands::Create { file } => {
            let body = tokio::fs::read(&file).await?;
            client
                .post(&accounts)
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body)
                .send()
                .await?
        }
        Commands::Delete { account_id, version } => {
            client
                .delete(format!("{}/{}", accounts, account_id))
                .query(&[("version", version)])
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
