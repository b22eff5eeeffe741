use clap::Parser;

use mmsearch_cli::cli::{Cli, Commands, IndexCommands, SearchMode};
use mmsearch_cli::{images, logging, render};
use mmsearch_client::{HttpTransport, VisionClient};
use mmsearch_core::config::ClientConfig;
use mmsearch_core::types::{HealthStatus, QueryMode, SearchForm};
use mmsearch_ops::Console;

fn search_form(mode: SearchMode) -> anyhow::Result<SearchForm> {
    let form = match mode {
        SearchMode::Text { query, k, threshold } => {
            let mut form = SearchForm::new(QueryMode::Text);
            form.text = query;
            form.k = k;
            form.threshold = threshold;
            form
        }
        SearchMode::Image { image, k } => {
            let mut form = SearchForm::new(QueryMode::Image);
            form.image = Some(images::load(&image)?);
            form.k = k;
            form
        }
        SearchMode::Multimodal { image, text, k } => {
            let mut form = SearchForm::new(QueryMode::Multimodal);
            form.image = Some(images::load(&image)?);
            form.text = text;
            form.k = k;
            form
        }
    };
    Ok(form)
}

async fn run(console: &Console<HttpTransport>, command: Commands, json: bool) -> anyhow::Result<bool> {
    let ok = match command {
        Commands::Health => {
            let status = render::with_spinner("Checking backend...", json, console.admin.check_health()).await;
            if json {
                println!("{}", serde_json::json!({ "status": console.health().to_string() }));
            } else {
                println!("{}", console.health());
            }
            status == HealthStatus::Healthy
        }
        Commands::Metrics => {
            render::with_spinner("Loading metrics...", json, console.admin.load_metrics()).await;
            render::metrics(&console.admin.metrics_state())
        }
        Commands::Stats => {
            render::with_spinner("Loading stats...", json, console.admin.refresh_stats()).await;
            render::stats(&console.admin.stats_state(), json)
        }
        Commands::Search(args) => {
            let form = search_form(args.mode)?;
            render::with_spinner("Searching...", json, console.search.submit(form)).await;
            render::results(&console.search.state(), json)
        }
        Commands::Ask { image, question } => {
            let image = images::load(&image)?;
            render::with_spinner("Asking...", json, console.vqa.ask(Some(&image), &question)).await;
            render::answer(&console.vqa.answer(), json)
        }
        Commands::Describe { image } => {
            let image = images::load(&image)?;
            render::with_spinner("Describing...", json, console.vqa.describe(Some(&image))).await;
            render::answer(&console.vqa.description(), json)
        }
        Commands::Index(IndexCommands::Build { image_dir, no_train }) => {
            render::with_spinner("Building index...", json, console.admin.build_index(image_dir.as_deref(), !no_train)).await;
            render::ack(&console.admin.build_state(), "Index build started", json)
        }
        Commands::Index(IndexCommands::Add { paths }) => {
            let payloads = images::load_all(&paths)?;
            if !json {
                println!("Uploading {} image(s)", payloads.len());
            }
            render::with_spinner("Adding images...", json, console.admin.add_images(&payloads)).await;
            render::ack(&console.admin.add_state(), "Images added", json)
        }
    };
    Ok(ok)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ClientConfig::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    if let Some(url) = cli.backend.as_deref() {
        config = config.with_backend_url(url)?;
    }
    logging::init(&config.log_level);

    let console = Console::new(VisionClient::from_config(&config)?);
    if !run(&console, cli.command, cli.json).await? {
        std::process::exit(1);
    }
    Ok(())
}
