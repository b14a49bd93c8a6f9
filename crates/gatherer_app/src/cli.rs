//! Command-line surface of the `gatherer` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use gatherer_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use gatherer_engine::DEFAULT_BASE_URL;

/// Search Apollo for contacts by job title, company and country, skipping
/// emails revealed in earlier runs, and export them to CSV.
#[derive(Parser, Debug)]
#[command(name = "gatherer", author, version, about)]
pub struct Cli {
    /// Apollo API key.
    #[arg(long, global = true, env = "APOLLO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Apollo REST API.
    #[arg(long, global = true, env = "APOLLO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait between the end of one request and the next.
    #[arg(long, global = true, default_value_t = 0.5, value_name = "SECONDS")]
    pub request_delay: f64,

    /// Attempts per request when the API keeps rate limiting.
    #[arg(long, global = true, default_value_t = 5)]
    pub max_attempts: u32,

    /// Upper bound for a single rate-limit backoff, in seconds.
    #[arg(long, global = true, default_value_t = 60.0, value_name = "SECONDS")]
    pub max_backoff: f64,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write logs to this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search people and export new contacts.
    Search(SearchArgs),
    /// List the saved lists on the account.
    Lists(ListsArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Job title keyword. Repeat for more than one.
    #[arg(long = "job-title", value_name = "TITLE")]
    pub job_title: Vec<String>,

    /// Comma-separated job title keywords.
    #[arg(long = "job-titles", value_name = "TITLES")]
    pub job_titles: Option<String>,

    /// Company name. Repeat for more than one.
    #[arg(long = "company", value_name = "NAME")]
    pub company: Vec<String>,

    /// File with one company name per line.
    #[arg(long, value_name = "PATH")]
    pub companies_file: Option<PathBuf>,

    /// Country filter, e.g. "United States". Required unless --list-name is given.
    #[arg(long)]
    pub country: Option<String>,

    /// Saved list to search within.
    #[arg(long, value_name = "NAME")]
    pub list_name: Option<String>,

    /// Destination CSV file.
    #[arg(long, default_value = "apollo_contacts.csv", value_name = "PATH")]
    pub output: PathBuf,

    /// Results per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub per_page: u32,

    /// Stop after this many pages.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Stop once this many contacts have been accepted.
    #[arg(long)]
    pub max_contacts: Option<usize>,

    /// File of already revealed emails, one per line.
    #[arg(long, default_value = ".apollo_seen_emails.txt", value_name = "PATH")]
    pub seen_emails_file: PathBuf,

    /// Extra placeholder email the API returns for locked contacts. Repeatable.
    #[arg(long = "placeholder-email", value_name = "EMAIL")]
    pub placeholder_email: Vec<String>,

    /// Save the seen-email file after every page.
    #[arg(long)]
    pub checkpoint: bool,
}

#[derive(Args, Debug)]
pub struct ListsArgs {
    /// Only print the list with this name (case-insensitive).
    #[arg(long)]
    pub name: Option<String>,

    /// Lists per page.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=(MAX_PAGE_SIZE as i64)))]
    pub per_page: u32,

    /// Stop after this many pages.
    #[arg(long)]
    pub max_pages: Option<u32>,
}
