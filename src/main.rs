// src/main.rs
// alva-reply - operator harness for the Alva reply core

use alva_reply::config::EnvConfig;
use alva_reply::engine::{AnswerEngineContext, AnswerEngineFactory, EngineKind, Query};
use alva_reply::filter::{FilterMode, ReferenceType, RelevanceFilter, RelevanceOptions, TweetReference};
use alva_reply::fixtures::{check_reply, load_fixtures};
use alva_reply::llm::Message;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Handle the harness uses for the bot when none is given
const DEFAULT_BOT_HANDLE: &str = "@AlvaBot";

#[derive(Parser)]
#[command(name = "alva-reply")]
#[command(about = "Tweet relevance filter and reply engines for the Alva bot")]
#[command(version)]
struct Cli {
    /// Bot handle placed on the engine context
    #[arg(long, global = true, default_value = DEFAULT_BOT_HANDLE)]
    bot_handle: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relevance pipeline on one tweet and print the decision as JSON
    Check {
        /// Tweet text
        text: String,

        /// Override the configured filter mode (alva1 or alva2)
        #[arg(long)]
        mode: Option<FilterMode>,

        /// Tweet creation time, RFC 3339
        #[arg(long)]
        created_at: Option<DateTime<Utc>>,

        /// Mark the tweet as a pure retweet
        #[arg(long)]
        retweet: bool,
    },

    /// Generate a reply to a single user message
    Answer {
        /// Engine tag (openai or alva)
        #[arg(short, long, default_value = "openai")]
        engine: String,

        /// User message
        text: String,
    },

    /// Run every conversation in a fixtures file and check the replies
    Fixtures {
        /// Engine tag (openai or alva)
        #[arg(short, long, default_value = "openai")]
        engine: String,

        /// JSON array of fixtures
        file: PathBuf,
    },
}

fn context_for(factory: &AnswerEngineFactory, kind: EngineKind, bot_handle: &str) -> Result<AnswerEngineContext> {
    let engine = Arc::new(factory.create(kind)?);
    Ok(AnswerEngineContext::new(Arc::new(()), bot_handle, "", engine))
}

async fn run_check(
    factory: &AnswerEngineFactory,
    bot_handle: &str,
    text: String,
    mode: Option<FilterMode>,
    created_at: Option<DateTime<Utc>>,
    retweet: bool,
) -> Result<()> {
    let mut settings = factory.config().filter.clone();
    if let Some(mode) = mode {
        settings.mode = mode;
    }

    let ctx = context_for(factory, EngineKind::OpenAi, bot_handle)?;
    let filter = RelevanceFilter::from_settings(factory.gateway()?, &settings);

    let mut opts = RelevanceOptions {
        created_at,
        ..RelevanceOptions::default()
    };
    if retweet {
        opts.referenced_tweets.push(TweetReference {
            kind: ReferenceType::Retweeted,
            id: String::new(),
        });
    }

    let result = filter.check_tweet_relevance(&text, &ctx, &opts).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_answer(factory: &AnswerEngineFactory, bot_handle: &str, tag: &str, text: String) -> Result<()> {
    let kind = EngineKind::from_tag(tag)?;
    let ctx = context_for(factory, kind, bot_handle)?;

    let query = Query::new("cli", "cli", vec![Message::user(text)]);
    let reply = ctx
        .answer_engine
        .generate_response_for_query(&query, &ctx)
        .await?;
    check_reply(&reply)?;

    println!("{}", reply);
    Ok(())
}

async fn run_fixtures(factory: &AnswerEngineFactory, bot_handle: &str, tag: &str, file: PathBuf) -> Result<()> {
    let kind = EngineKind::from_tag(tag)?;
    let ctx = context_for(factory, kind, bot_handle)?;
    let cases = load_fixtures(&file)?;

    info!(engine = %kind, cases = cases.len(), "Running fixtures");

    let mut failures = 0usize;
    for (i, case) in cases.iter().enumerate() {
        let query = case.to_query();
        let outcome = ctx
            .answer_engine
            .generate_response_for_query(&query, &ctx)
            .await
            .map_err(anyhow::Error::from)
            .and_then(|reply| check_reply(&reply).map(|_| reply));

        match outcome {
            Ok(reply) => println!("[{}] {} @{}\n{}\n", i, query.prompt_tweet_id, query.prompt_username, reply),
            Err(e) => {
                failures += 1;
                warn!(index = i, tweet_id = %query.prompt_tweet_id, error = %e, "Fixture failed");
                println!("[{}] {} FAILED: {}\n", i, query.prompt_tweet_id, e);
            }
        }
    }

    println!("{} passed, {} failed", cases.len() - failures, failures);
    if failures > 0 {
        bail!("{} of {} fixtures failed", failures, cases.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then working directory)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".alva/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = EnvConfig::load();
    let validation = config.validate();
    if !validation.is_valid() {
        bail!("Invalid configuration\n{}", validation.report());
    }
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    let factory = AnswerEngineFactory::new(config);

    match cli.command {
        Commands::Check {
            text,
            mode,
            created_at,
            retweet,
        } => run_check(&factory, &cli.bot_handle, text, mode, created_at, retweet)
            .await
            .context("check failed")?,
        Commands::Answer { engine, text } => run_answer(&factory, &cli.bot_handle, &engine, text).await?,
        Commands::Fixtures { engine, file } => run_fixtures(&factory, &cli.bot_handle, &engine, file).await?,
    }

    Ok(())
}
