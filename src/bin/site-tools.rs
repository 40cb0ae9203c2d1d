//! Static export tooling
//!
//! Commands:
//! - sitemap: write sitemap.xml from the built-in content
//! - placeholders: write placeholder SVGs under images/
//! - copy-htaccess: copy the rewrite rules into the export
//! - verify: check the export before uploading it

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use portfolio_site::export::{self, format_bytes, ExportError};

#[derive(Parser)]
#[command(name = "site-tools")]
#[command(about = "Prepare the static export for shared hosting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sitemap.xml into the export directory
    Sitemap {
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
        #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },

    /// Write the project and blog placeholder images
    Placeholders {
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },

    /// Copy .htaccess into the export directory
    CopyHtaccess {
        #[arg(long, default_value = "public/.htaccess")]
        from: PathBuf,
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
    },

    /// Check that the export is complete
    Verify {
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
    },
}

fn run(command: Commands) -> Result<bool, ExportError> {
    match command {
        Commands::Sitemap { out, base_url } => {
            let path = export::write_sitemap(&out, &base_url)?;
            tracing::info!("Sitemap written to {}", path.display());
        }
        Commands::Placeholders { out } => {
            let written = export::write_placeholders(&out)?;
            for path in &written {
                tracing::debug!("Wrote {}", path.display());
            }
            tracing::info!("{} placeholder images written under {}", written.len(), out.display());
        }
        Commands::CopyHtaccess { from, out } => {
            let dest = export::copy_htaccess(&from, &out)?;
            tracing::info!(".htaccess copied to {}", dest.display());
        }
        Commands::Verify { out } => {
            let report = export::verify(&out)?;

            for file in &report.large_files {
                println!("large file: {} ({})", file.path.display(), format_bytes(file.size));
            }
            println!("Total upload size: {}", format_bytes(report.total_size));

            for issue in &report.issues {
                println!("ISSUE   {issue}");
            }
            for warning in &report.warnings {
                println!("WARNING {warning}");
            }

            if report.is_ok() && report.warnings.is_empty() {
                println!("All checks passed.");
            }
            return Ok(report.is_ok());
        }
    }
    Ok(true)
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
