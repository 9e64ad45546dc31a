use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod apollo;
mod export;
mod models;
mod pipeline;

use apollo::ApolloClient;
use pipeline::RunSettings;

#[derive(Parser, Debug)]
#[command(version, about = "Fetch deduplicated business leads from the Apollo people search into a CSV sheet")]
struct Args {
    /// Apollo API key
    #[arg(long, env = "APOLLO_API_KEY")]
    api_key: Option<String>,

    /// Number of leads to collect
    #[arg(long, env = "TARGET_LEADS", default_value_t = 100)]
    target_leads: usize,

    /// Output CSV path, overwritten on each run
    #[arg(long, env = "LEADS_OUTPUT", default_value = "Leads_Sheet.csv")]
    output: String,

    /// Search page size
    #[arg(long, default_value_t = 50)]
    per_page: u32,

    /// Delay between page requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    page_delay_ms: u64,

    /// Max pages to fetch per run (0 = no cap)
    #[arg(long, default_value_t = 0)]
    max_pages: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let api_key = args
        .api_key
        .clone()
        .context("api key must be provided via --api-key or APOLLO_API_KEY")?;

    info!(
        "lead fetch start: target={} per_page={} delay={}ms key={}",
        args.target_leads,
        args.per_page,
        args.page_delay_ms,
        mask_secret(&api_key, 2, 2)
    );

    let client = ApolloClient::new(api_key)?;
    let settings = RunSettings {
        target_leads: args.target_leads,
        per_page: args.per_page,
        page_delay_ms: args.page_delay_ms,
        max_pages: args.max_pages,
    };

    let leads = pipeline::run(&client, &settings).await?;
    export::write_csv(&args.output, &leads)?;
    info!("success: {} leads saved to {}", leads.len(), args.output);

    Ok(())
}

fn mask_secret(value: &str, front: usize, back: usize) -> String {
    if value.is_empty() {
        return "".to_string();
    }
    if value.len() <= front + back {
        return "***".to_string();
    }
    format!("{}...{}", &value[..front], &value[value.len() - back..])
}
