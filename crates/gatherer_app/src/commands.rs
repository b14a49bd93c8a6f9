use std::path::Path;

use anyhow::{bail, Context, Result};
use engine_logging::{engine_info, engine_warn};
use gatherer_core::Contact;
use gatherer_engine::{
    fetch_saved_lists, find_saved_list, write_contacts_csv, FileSeenStore, RequestGate,
    ReqwestTransport, Session,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Command, ListsArgs};
use crate::config::{self, SearchConfig};

pub fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match &cli.command {
        Command::Search(args) => {
            let config = config::resolve_search(&cli, args)?;
            runtime.block_on(search(config))
        }
        Command::Lists(args) => runtime.block_on(lists(&cli, args)),
    }
}

async fn search(config: SearchConfig) -> Result<()> {
    let transport = ReqwestTransport::new(&config.api_key, config.provider.clone())
        .context("failed to build http client")?;
    let store = FileSeenStore::new(&config.seen_path);
    let cancel = CancellationToken::new();
    let watcher = watch_for_interrupt(cancel.clone());

    let mut session = Session::new(
        &transport,
        &store,
        config.normalizer.clone(),
        config.session,
    );
    let result = session.run(&config.criteria, config.bounds, &cancel).await;
    watcher.abort();

    match result {
        Ok(harvest) => {
            export(&config.output, &harvest.contacts)?;
            if let Some(stop) = harvest.stop {
                engine_info!("Stopped: {}", stop);
            }
            println!(
                "{} new contacts written to {} ({})",
                harvest.contacts.len(),
                config.output.display(),
                harvest.stats
            );
            Ok(())
        }
        Err(failure) => {
            if !failure.partial.contacts.is_empty() {
                engine_warn!(
                    "Exporting {} contacts gathered before the failure",
                    failure.partial.contacts.len()
                );
                export(&config.output, &failure.partial.contacts)?;
            }
            Err(failure).context("Apollo search failed")
        }
    }
}

async fn lists(cli: &Cli, args: &ListsArgs) -> Result<()> {
    let transport = ReqwestTransport::new(&config::api_key(cli)?, config::provider_settings(cli))
        .context("failed to build http client")?;
    let mut gate = RequestGate::new(config::gate_settings(cli)?);

    let lists = fetch_saved_lists(&transport, &mut gate, args.per_page, args.max_pages)
        .await
        .context("failed to fetch saved lists")?;

    let selected = match args.name.as_deref() {
        Some(name) => match find_saved_list(&lists, name) {
            Some(list) => vec![list],
            None => bail!("no saved list named {name:?}"),
        },
        None => lists.iter().collect(),
    };
    for list in selected {
        let count = list
            .cached_count
            .map(|count| count.to_string())
            .unwrap_or_default();
        println!("{}\t{}\t{}", list.id, list.name, count);
    }
    Ok(())
}

fn export(path: &Path, contacts: &[Contact]) -> Result<()> {
    write_contacts_csv(path, contacts)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Cancels the session on Ctrl-C so it can save state before exiting.
fn watch_for_interrupt(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            engine_warn!("Interrupt received; finishing up");
            cancel.cancel();
        }
    })
}
