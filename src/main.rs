//! Health Compass CLI.
//!
//! Single-query mode when `--message` is given, interactive mode otherwise.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use health_compass::adapters::cli::{help_text, render_report, render_summary};
use health_compass::adapters::memory::{FsMemoryStore, InMemoryMemoryStore};
use health_compass::adapters::text_generation::{
    AnthropicConfig, AnthropicGenerator, MockGenerator,
};
use health_compass::application::assessors::{
    EconomicHealthAssessor, MentalHealthAssessor, PhysicalHealthAssessor,
};
use health_compass::application::{AssessorPool, Coordinator};
use health_compass::config::{AiProvider, AppConfig, MemoryBackend};
use health_compass::domain::assessment::{AssessmentContext, AssessmentRequest, TrainingData};
use health_compass::domain::foundation::UserId;
use health_compass::ports::{Assessor, MemoryGateway, TextGeneration};
use secrecy::ExposeSecret;

/// Command-line interface for the health advisory engine.
#[derive(Debug, Parser)]
#[command(name = "health-compass", version, about = "Concurrent multi-assessor health advisor")]
struct Cli {
    /// User message to analyze; omit to enter interactive mode
    #[arg(short, long)]
    message: Option<String>,

    /// User identifier
    #[arg(short, long, default_value = "cli_user")]
    user_id: String,

    /// Annual income in USD
    #[arg(long)]
    income: Option<f64>,

    /// Country code (e.g. CN/US/IN/BR)
    #[arg(long)]
    country: Option<String>,

    /// Age in years (enables the injury risk rules)
    #[arg(long)]
    age: Option<u32>,

    /// Normalized training load in [0, 1]
    #[arg(long)]
    training_load: Option<f64>,

    /// Normalized match intensity in [0, 1]
    #[arg(long)]
    match_intensity: Option<f64>,

    /// Print the raw report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Builds the typed context bag from the flags.
    fn context(&self) -> AssessmentContext {
        let mut context = AssessmentContext::new();

        if let Some(income) = self.income {
            context = context.with_income(income);
        }
        if let Some(country) = &self.country {
            context = context.with_country_code(country.as_str());
        }
        if let Some(age) = self.age {
            context = context.with_training(
                TrainingData::new()
                    .with_age(age)
                    .with_training_load(self.training_load.unwrap_or(0.5))
                    .with_match_intensity(self.match_intensity.unwrap_or(0.5)),
            );
        }

        context
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    config.validate()?;

    let coordinator = build_coordinator(&config)?;
    let user_id = UserId::new(&cli.user_id)?;

    match &cli.message {
        Some(message) => {
            let request =
                AssessmentRequest::new(user_id, message.as_str()).with_context(cli.context());
            let report = coordinator.handle(request).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report));
            }
        }
        None => interactive(&coordinator, user_id, &cli).await?,
    }

    Ok(())
}

/// Wires adapters and assessors per the loaded configuration.
fn build_coordinator(config: &AppConfig) -> Result<Coordinator, Box<dyn Error>> {
    let generator: Arc<dyn TextGeneration> = match config.ai.provider {
        AiProvider::Mock => Arc::new(MockGenerator::new()),
        AiProvider::Anthropic => {
            let api_key = config
                .ai
                .api_key
                .as_ref()
                .ok_or("ai.api_key is not configured")?;
            let anthropic_config = AnthropicConfig::new(api_key.expose_secret().clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(Duration::from_secs(config.ai.timeout_secs))
                .with_max_retries(config.ai.max_retries);
            Arc::new(AnthropicGenerator::new(anthropic_config)?)
        }
    };

    let memory: Arc<dyn MemoryGateway> = match config.memory.backend {
        MemoryBackend::Memory => Arc::new(InMemoryMemoryStore::new()),
        MemoryBackend::Filesystem => {
            let data_dir = config
                .memory
                .data_dir
                .as_ref()
                .ok_or("memory.data_dir is not configured")?;
            Arc::new(FsMemoryStore::new(data_dir))
        }
    };

    // Configuration order here is the synthesis evaluation order.
    let assessors: Vec<Arc<dyn Assessor>> = vec![
        Arc::new(MentalHealthAssessor::new(Arc::clone(&generator))),
        Arc::new(PhysicalHealthAssessor::new()),
        Arc::new(EconomicHealthAssessor::new()),
    ];

    Ok(Coordinator::new(memory, AssessorPool::new(assessors)))
}

/// Interactive prompt loop.
async fn interactive(
    coordinator: &Coordinator,
    user_id: UserId,
    cli: &Cli,
) -> Result<(), Box<dyn Error>> {
    println!("{}", "=".repeat(60));
    println!("Health Compass - 交互式模式");
    println!("{}", "=".repeat(60));
    println!("\n输入 'quit' 或 'exit' 退出，'summary' 查看健康摘要，'help' 查看帮助\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all("\n💬 请输入您的健康问题: ".as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();

        if message.is_empty() {
            continue;
        }
        match message.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("\n👋 再见！");
                break;
            }
            "help" => {
                println!("{}", help_text());
                continue;
            }
            "summary" => {
                let summary = coordinator.user_summary(&user_id, 30).await;
                println!("\n{}", render_summary(&summary));
                continue;
            }
            _ => {}
        }

        println!("\n🔍 正在分析...");
        let request =
            AssessmentRequest::new(user_id.clone(), message).with_context(cli.context());
        let report = coordinator.handle(request).await;
        println!("{}", render_report(&report));
    }

    Ok(())
}
