use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use laptop_id_common::CancelToken;
use laptop_id_rust::cache::CatalogCache;
use laptop_id_rust::cli::{disk_policy, Cli, Commands};
use laptop_id_rust::config::Config;
use laptop_id_rust::logging::{init_logging, LogConfig};
use laptop_id_rust::pipeline::{self, MatchJob, Progress, ProgressFn};
use laptop_id_rust::{CatalogSource, IdMatchError};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&LogConfig::new(cli.verbose, cli.log_file.clone()));
    let mut config = Config::load();

    match cli.command {
        Commands::Run { catalog, input, output, worksheet, credentials, with_disks, refresh, no_dump } => {
            let locator = catalog
                .or_else(|| config.catalog_source.clone())
                .context("no catalog given (use --catalog or `config --set-catalog`)")?;
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .context("no output directory given (use --output or `config --set-output`)")?;
            let worksheet = worksheet.unwrap_or_else(|| config.worksheet.clone());

            let job = MatchJob {
                catalog: CatalogSource::parse_with_worksheet(&locator, &worksheet),
                input,
                output_dir: output_dir.clone(),
                policy: disk_policy(with_disks, config.disk_policy),
                refresh_catalog: refresh,
                dump_catalog: !no_dump,
                credentials: credentials.or_else(|| config.credentials.clone()),
                work_dir: config.dump_dir(),
            };

            println!("laptop-id - matching {}\n", job.input.display());

            let cancel = CancelToken::new();
            let ctrl_c = {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        eprintln!("\nCancelling...");
                        cancel.cancel();
                    }
                })
            };

            let bar = ProgressBar::hidden();
            let result = pipeline::run_job(job, cancel, Some(progress_printer(bar.clone()))).await;
            ctrl_c.abort();

            let summary = match result {
                Ok(summary) => summary,
                Err(IdMatchError::Cancelled) => {
                    bar.abandon_with_message("cancelled");
                    bail!("run cancelled, no result written");
                }
                Err(e) => {
                    bar.abandon();
                    return Err(e).context("matching failed");
                }
            };
            bar.finish_and_clear();

            let stats = summary.cleaning;
            println!(
                "✔ Catalog: {} rows, {} useful, {} deleted{}",
                stats.total_rows,
                stats.useful_rows,
                stats.deleted_rows(),
                if summary.catalog_reloaded { "" } else { " (cached)" }
            );
            println!("✔ Found: {} / {} units", summary.matched_units, summary.total_units);
            if let Some(dump) = &summary.dump_path {
                println!("✔ Catalog dump: {}", dump.display());
            }
            println!("✔ Result: {}", summary.output_path.display());

            config.remember_run(&locator, &output_dir);
            if let Err(e) = config.save() {
                tracing::warn!(error = %e, "settings not saved");
            }
        }

        Commands::Clean { catalog, output } => {
            let locator = catalog
                .or_else(|| config.catalog_source.clone())
                .context("no catalog given (use --catalog or `config --set-catalog`)")?;
            let source = CatalogSource::parse_with_worksheet(&locator, &config.worksheet);

            println!("laptop-id - cleaning {}\n", source);
            let (stats, dump) = pipeline::run_clean(
                &source,
                config.credentials.as_deref(),
                &config.dump_dir(),
                output.as_deref(),
            )
            .await
            .context("cleaning failed")?;

            println!("✔ Rows before cleaning: {}", stats.total_rows);
            println!("✔ Useful rows: {}", stats.useful_rows);
            println!("✔ Deleted rows: {} ({} docking stations)", stats.deleted_rows(), stats.docking_rows);
            println!("✔ Repairs: {} brand, {} shifted columns", stats.brand_fixes, stats.shift_fixes);
            println!("✔ Dump: {}", dump.display());
        }

        Commands::Config { set_catalog, set_output, set_credentials, show } => {
            let mut changed = false;
            if let Some(catalog) = set_catalog {
                config.catalog_source = Some(catalog);
                changed = true;
            }
            if let Some(output) = set_output {
                config.output_dir = Some(output);
                changed = true;
            }
            if let Some(credentials) = set_credentials {
                config.credentials = Some(credentials);
                changed = true;
            }
            if changed {
                config.save().context("cannot save settings")?;
                println!("✔ Settings saved");
            }

            if show || !changed {
                let unset = || "(not set)".to_string();
                println!("Settings:");
                println!("  Catalog: {}", config.catalog_source.clone().unwrap_or_else(unset));
                println!(
                    "  Output: {}",
                    config.output_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!("  Worksheet: {}", config.worksheet);
                println!(
                    "  Credentials: {}",
                    config.credentials.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!("  Disk policy: {:?}", config.disk_policy);
                if let Ok(path) = Config::config_path() {
                    println!("  File: {}", path.display());
                }
            }
        }

        Commands::Cache { clear, info } => {
            let dir = config.dump_dir();
            let cache_path = CatalogCache::cache_path(&dir);

            if info || !clear {
                if cache_path.exists() {
                    let cache = CatalogCache::load(&dir);
                    println!("Catalog cache:");
                    println!("  Path: {}", cache_path.display());
                    println!("  Entries: {}", cache.len());
                    if let Some(snapshot) = cache.snapshot() {
                        println!("  Fingerprint: {}", snapshot.fingerprint());
                    }
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  Size: {} bytes", meta.len());
                    }
                } else {
                    println!("No catalog cache at {}", cache_path.display());
                }
            }

            if clear {
                match CatalogCache::clear(&dir) {
                    Ok(true) => println!("✔ Cache deleted: {}", cache_path.display()),
                    Ok(false) => println!("No catalog cache to delete"),
                    Err(e) => println!("Cannot delete cache: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Prints stage lines and drives the scoring bar.
fn progress_printer(bar: ProgressBar) -> ProgressFn {
    Arc::new(move |event| match event {
        Progress::LoadingCatalog => println!("[1/4] Loading catalog..."),
        Progress::LoadingInput => println!("[2/4] Loading input report..."),
        Progress::Cleaning => println!("      Cleaning catalog..."),
        Progress::CatalogCached { entries } => {
            println!("      Catalog unchanged, {} cached entries", entries)
        }
        Progress::Matching { total } => {
            println!("[3/4] Matching {} units...", total);
            bar.set_length(total as u64);
            bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::with_template("      [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
                bar.set_style(style.progress_chars("=> "));
            }
        }
        // Workers finish out of order, so count events rather than trust `done`.
        Progress::Scored { .. } => bar.inc(1),
        Progress::Writing => {
            bar.finish_and_clear();
            println!("[4/4] Writing results...");
        }
    })
}
