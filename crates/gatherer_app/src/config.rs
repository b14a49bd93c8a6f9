use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use gatherer_core::{FilterCriteria, Normalizer, RetrievalBounds};
use gatherer_engine::{GateSettings, ProviderSettings, SessionSettings};

use crate::cli::{Cli, SearchArgs};

/// Fully resolved inputs for one `search` run.
#[derive(Debug)]
pub struct SearchConfig {
    pub criteria: FilterCriteria,
    pub bounds: RetrievalBounds,
    pub normalizer: Normalizer,
    pub session: SessionSettings,
    pub provider: ProviderSettings,
    pub api_key: String,
    pub output: PathBuf,
    pub seen_path: PathBuf,
}

pub fn resolve_search(cli: &Cli, args: &SearchArgs) -> Result<SearchConfig> {
    let job_titles = collect_job_titles(&args.job_title, args.job_titles.as_deref());
    let companies = collect_companies(&args.company, args.companies_file.as_deref())?;
    let criteria = FilterCriteria::new(
        job_titles,
        companies,
        args.country.clone(),
        args.list_name.clone(),
    )?;
    let bounds = RetrievalBounds::new(args.max_contacts, args.max_pages, args.per_page)?;

    Ok(SearchConfig {
        criteria,
        bounds,
        normalizer: Normalizer::default().with_extra_placeholders(&args.placeholder_email),
        session: SessionSettings {
            gate: gate_settings(cli)?,
            checkpoint_each_page: args.checkpoint,
        },
        provider: provider_settings(cli),
        api_key: api_key(cli)?,
        output: args.output.clone(),
        seen_path: args.seen_emails_file.clone(),
    })
}

pub fn api_key(cli: &Cli) -> Result<String> {
    match cli.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => bail!("Apollo API key was not provided; use --api-key or set APOLLO_API_KEY"),
    }
}

pub fn provider_settings(cli: &Cli) -> ProviderSettings {
    ProviderSettings {
        base_url: cli.base_url.clone(),
        ..ProviderSettings::default()
    }
}

pub fn gate_settings(cli: &Cli) -> Result<GateSettings> {
    if cli.max_attempts == 0 {
        bail!("--max-attempts must be at least 1");
    }
    let mut settings = GateSettings::with_delay(seconds(cli.request_delay, "--request-delay")?);
    settings.max_attempts = cli.max_attempts;
    settings.max_backoff = seconds(cli.max_backoff, "--max-backoff")?;
    Ok(settings)
}

/// Repeated `--job-title` values plus a comma-separated `--job-titles`.
pub fn collect_job_titles(repeated: &[String], comma_list: Option<&str>) -> Vec<String> {
    let mut titles = repeated.to_vec();
    if let Some(list) = comma_list {
        titles.extend(list.split(',').map(ToOwned::to_owned));
    }
    titles
}

/// Repeated `--company` values plus one name per line from a file.
pub fn collect_companies(repeated: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut companies = repeated.to_vec();
    if let Some(path) = file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read companies file {}", path.display()))?;
        companies.extend(content.lines().map(ToOwned::to_owned));
    }
    Ok(companies)
}

fn seconds(value: f64, flag: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("{flag} must be a non-negative number of seconds"))
}
