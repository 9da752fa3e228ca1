use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rankflux_core::alerts::{self, DEFAULT_THRESHOLD};
use rankflux_core::analysis::normalize_analysis;
use rankflux_core::backend::http::HttpRankingBackend;
use rankflux_core::backend::RankingBackend;
use rankflux_core::domain::series::AlignedSeriesSet;
use rankflux_core::series::{align_predictions, align_rankings};

mod render;

#[derive(Debug, Parser)]
#[command(name = "rankflux_dashboard")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tracked keywords.
    Keywords,

    /// Add a keyword to track.
    Add {
        #[arg(long)]
        term: String,

        #[arg(long)]
        industry: Option<String>,
    },

    /// Show ranking history, predictions, analysis and alerts for a keyword.
    Show {
        #[arg(long)]
        keyword_id: i64,

        /// History window in days.
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Alert when the predicted position change exceeds this value.
        #[arg(long, default_value_t = DEFAULT_THRESHOLD, value_parser = clap::value_parser!(u32).range(1..=10))]
        threshold: u32,
    },

    /// Trigger a fresh ranking collection, then show the reloaded dashboard.
    Refresh {
        #[arg(long)]
        keyword_id: i64,

        #[arg(long, default_value_t = 30)]
        days: u32,

        #[arg(long, default_value_t = DEFAULT_THRESHOLD, value_parser = clap::value_parser!(u32).range(1..=10))]
        threshold: u32,
    },

    /// Content-gap analysis of a target URL against competitors.
    Content {
        #[arg(long)]
        keyword_id: i64,

        #[arg(long)]
        target_url: String,

        /// Repeatable; the backend picks top-ranking URLs when omitted.
        #[arg(long = "competitor-url")]
        competitor_urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = rankflux_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let client =
        HttpRankingBackend::from_settings(&settings).context("backend client setup failed")?;

    let result = match args.command {
        Command::Keywords => list_keywords(&client).await,
        Command::Add { term, industry } => add_keyword(&client, &term, industry.as_deref()).await,
        Command::Show {
            keyword_id,
            days,
            threshold,
        } => show(&client, keyword_id, days, threshold).await,
        Command::Refresh {
            keyword_id,
            days,
            threshold,
        } => refresh_and_show(&client, keyword_id, days, threshold).await,
        Command::Content {
            keyword_id,
            target_url,
            competitor_urls,
        } => analyze_content(&client, keyword_id, &target_url, &competitor_urls).await,
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

async fn list_keywords(client: &impl RankingBackend) -> anyhow::Result<()> {
    let keywords = client.keywords().await?;
    print!("{}", render::render_keywords(&keywords));
    Ok(())
}

async fn add_keyword(
    client: &impl RankingBackend,
    term: &str,
    industry: Option<&str>,
) -> anyhow::Result<()> {
    let keyword = client.add_keyword(term, industry).await?;
    tracing::info!(keyword_id = keyword.id, term = %keyword.term, "keyword added");
    println!("Added keyword [{}] {}", keyword.id, keyword.term);
    Ok(())
}

/// Primary flow loads rankings; predictions and analysis are secondary and a
/// failure there only empties the dependent panels.
async fn show(
    client: &impl RankingBackend,
    keyword_id: i64,
    days: u32,
    threshold: u32,
) -> anyhow::Result<()> {
    let rankings = client.rankings(keyword_id, days).await?;
    let history = align_rankings(&rankings);
    print!(
        "{}",
        render::render_series_table("Ranking History", &history, "No ranking data available")
    );

    match client.predict(keyword_id).await {
        Ok(predict) => {
            if let Some(message) = &predict.message {
                tracing::info!(%message, "backend prediction note");
            }

            let forecast = align_predictions(&predict.predictions);
            print!(
                "\n{}",
                render::render_series_table(
                    "Ranking Predictions",
                    &forecast,
                    "No prediction data available"
                )
            );

            let report = normalize_analysis(&predict.claude_analysis);
            print!("\n{}", render::render_analysis(report.as_ref()));

            let alerts = alerts::evaluate_alerts(&predict.predictions, threshold)?;
            print!("\n{}", render::render_alerts(&alerts, threshold));
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::warn!(error = %err, keyword_id, "prediction fetch failed; showing empty panels");
            print!(
                "\n{}",
                render::render_series_table(
                    "Ranking Predictions",
                    &AlignedSeriesSet::default(),
                    "No prediction data available"
                )
            );
            print!("\n{}", render::render_analysis(None));
        }
    }

    Ok(())
}

async fn refresh_and_show(
    client: &impl RankingBackend,
    keyword_id: i64,
    days: u32,
    threshold: u32,
) -> anyhow::Result<()> {
    client.refresh_rankings(keyword_id).await?;
    tracing::info!(keyword_id, "ranking refresh triggered");
    show(client, keyword_id, days, threshold).await
}

async fn analyze_content(
    client: &impl RankingBackend,
    keyword_id: i64,
    target_url: &str,
    competitor_urls: &[String],
) -> anyhow::Result<()> {
    let response = client
        .analyze_content(keyword_id, target_url, competitor_urls)
        .await?;
    print!("{}", render::render_content_report(&response.analysis));
    Ok(())
}

fn init_sentry(settings: &rankflux_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
