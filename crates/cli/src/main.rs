use anyhow::Context;
use bedin_core::domain::day::DayCategory;
use bedin_core::horoscope::orchestrator::HoroscopeService;
use bedin_core::horoscope::prompt;
use bedin_core::horoscope::state::Session;
use bedin_core::llm::gemini::GeminiClient;
use bedin_core::time::mm_calendar;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "bedin", version, about = "Daily Myanmar horoscope")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the day categories.
    Days,

    /// Read today's horoscope.
    Read {
        /// Day category id, e.g. "tuesday" or "rahu". Defaults to the first day.
        #[arg(long, conflicts_with = "born")]
        day: Option<String>,

        /// Birth moment (YYYY-MM-DDTHH:MM); the day category is derived from it.
        #[arg(long)]
        born: Option<String>,

        /// Print the outbound request instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = bedin_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Days => {
            print!("{}", render::days_table());
            Ok(())
        }
        Command::Read { day, born, dry_run } => {
            let day = resolve_day(day.as_deref(), born.as_deref())?;
            if dry_run {
                return print_request(day);
            }
            read(day).await
        }
    }
}

async fn read(day: DayCategory) -> anyhow::Result<()> {
    let gemini = GeminiClient::from_env().inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
    })?;
    let session = Session::new(HoroscopeService::new(Arc::new(gemini)));
    session.select(day).await;

    let state = session.submit().await;
    match (state.result, state.error) {
        (Some(result), _) => {
            print!("{}", render::horoscope(&result));
            Ok(())
        }
        (None, error) => {
            let message = error.unwrap_or_default();
            eprintln!("{message}");
            anyhow::bail!("horoscope request failed for {day}")
        }
    }
}

fn print_request(day: DayCategory) -> anyhow::Result<()> {
    let date = mm_calendar::today(chrono::Utc::now())?;
    let req = prompt::build_request(day, date);
    let out = serde_json::json!({
        "system_instruction": req.system_instruction,
        "prompt": req.prompt,
        "response_schema": req.response_schema,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    tracing::info!(%day, %date, dry_run = true, "request not sent");
    Ok(())
}

fn resolve_day(day_arg: Option<&str>, born_arg: Option<&str>) -> anyhow::Result<DayCategory> {
    if let Some(s) = born_arg {
        let born = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .with_context(|| format!("invalid --born '{s}', expected YYYY-MM-DDTHH:MM"))?;
        return Ok(DayCategory::from_birth(born));
    }

    match day_arg {
        Some(s) => s.parse(),
        None => Ok(DayCategory::default()),
    }
}

fn init_sentry(settings: &bedin_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_day_from_id_birth_or_default() {
        assert_eq!(resolve_day(None, None).unwrap(), DayCategory::Sunday);
        assert_eq!(resolve_day(Some("rahu"), None).unwrap(), DayCategory::Rahu);
        // 2026-10-14 is a Wednesday.
        assert_eq!(
            resolve_day(None, Some("2026-10-14T20:15")).unwrap(),
            DayCategory::Rahu
        );
        assert!(resolve_day(None, Some("14/10/2026")).is_err());
        assert!(resolve_day(Some("someday"), None).is_err());
    }

    #[test]
    fn args_reject_day_with_born() {
        let parsed = Args::try_parse_from(["bedin", "read", "--day", "monday", "--born", "2026-10-14T08:00"]);
        assert!(parsed.is_err());
    }
}
