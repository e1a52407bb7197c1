use clap::{Parser, Subcommand};
use laptop_id_common::DiskPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "laptop-id")]
#[command(about = "Assigns catalog IDs to the laptops of an inventory report", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (per-unit lines)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log file (default: output.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match an input report against the catalog and write the result workbook
    Run {
        /// Catalog file or URL (default: last used)
        #[arg(short, long)]
        catalog: Option<String>,

        /// Input report (xlsx/xls/ods/csv)
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Output directory (default: last used)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worksheet of a remote catalog
        #[arg(long)]
        worksheet: Option<String>,

        /// Access token file for a remote catalog
        #[arg(long)]
        credentials: Option<PathBuf>,

        /// Accept catalog entries with disks and compare storage capacity
        #[arg(long)]
        with_disks: bool,

        /// Clean the catalog even if it is unchanged since the last run
        #[arg(long)]
        refresh: bool,

        /// Skip the cleaned catalog CSV dump
        #[arg(long)]
        no_dump: bool,
    },

    /// Clean the catalog only and write the CSV dump
    Clean {
        /// Catalog file or URL (default: last used)
        #[arg(short, long)]
        catalog: Option<String>,

        /// Dump file (default: outputID.csv / outputID-fromURL.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or edit settings
    Config {
        /// Set the default catalog file or URL
        #[arg(long)]
        set_catalog: Option<String>,

        /// Set the default output directory
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// Set the access token file for remote catalogs
        #[arg(long)]
        set_credentials: Option<PathBuf>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },

    /// Catalog snapshot cache management
    Cache {
        /// Delete the cache
        #[arg(long)]
        clear: bool,

        /// Show cache information
        #[arg(long)]
        info: bool,
    },
}

/// Disk policy chosen by the `--with-disks` flag, or the configured one.
pub fn disk_policy(with_disks: bool, configured: DiskPolicy) -> DiskPolicy {
    if with_disks {
        DiskPolicy::CompareCapacity
    } else {
        configured
    }
}
