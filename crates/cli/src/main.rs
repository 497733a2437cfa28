use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ruta_agents::{AgentProvider, BackendSettings, Pipeline};
use ruta_core::{detect_locale, ExtractedParameters, InputRejection, Locale, PolicyEngine};
use ruta_observability::{init_tracing, AppMetrics};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "ruta")]
#[command(about = "Travel question assistant")]
struct Cli {
    /// Provider for the climate, costs, places and itinerary agents.
    #[arg(long, env = "RUTA_AGENT_BACKEND")]
    agent_backend: Option<AgentProvider>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Ask {
        question: String,
    },
    Chat,
    /// Input guardrail verdict only; no remote calls.
    Check {
        question: String,
        #[arg(long)]
        locale: Option<String>,
    },
    Extract {
        question: String,
        #[arg(long)]
        locale: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct CheckReport {
    blocked: bool,
    rule: Option<InputRejection>,
    message: Option<&'static str>,
    locale: Locale,
}

#[derive(Debug, Serialize)]
struct ExtractReport {
    #[serde(flatten)]
    parameters: ExtractedParameters,
    locale: Locale,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing("ruta_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Ask { question } => {
            let pipeline = build_pipeline(cli.agent_backend)?;
            println!("{}", pipeline.process(&question).await);
        }
        Command::Chat => {
            let pipeline = build_pipeline(cli.agent_backend)?;
            run_chat(&pipeline).await?;
        }
        Command::Check { question, locale } => {
            let locale = detect_locale(Locale::from_optional_str(locale.as_deref()), &question);
            let rule = PolicyEngine::default().evaluate_question(&question);
            let report = CheckReport {
                blocked: rule.is_some(),
                rule,
                message: rule.map(|rule| rule.message(locale)),
                locale,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Extract { question, locale } => {
            let report = ExtractReport {
                parameters: ExtractedParameters::from_question(&question),
                locale: detect_locale(Locale::from_optional_str(locale.as_deref()), &question),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn build_pipeline(agent_backend: Option<AgentProvider>) -> Result<Pipeline> {
    let mut settings = BackendSettings::from_env().context("invalid backend configuration")?;
    if let Some(provider) = agent_backend {
        settings.agent_provider = provider;
    }
    Pipeline::from_settings(&settings, AppMetrics::shared())
}

async fn run_chat(pipeline: &Pipeline) -> Result<()> {
    println!("Ruta chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        if question.is_empty() {
            continue;
        }

        let answer = pipeline.process(question).await;
        println!("\n{answer}\n");
    }

    Ok(())
}
