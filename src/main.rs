use berneis_site::{config, generate, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "berneis-site")]
#[command(about = "Static site generator for a bilingual photographer portfolio")]
#[command(long_about = "\
Static site generator for a bilingual photographer portfolio

Every page is generated in English and German from JSON content and one
shared HTML template.

Source structure:

  site/
  ├── site.toml                    # Config (optional, overrides stock defaults)
  ├── template.html                # Shared page template with {slot} placeholders
  ├── data/
  │   ├── life.json                # Biography with timeline events (required)
  │   ├── career.json              # Career sections per language
  │   ├── galleries.json           # List of photo galleries
  │   ├── movies.json              # List of movie galleries (link + IMDb)
  │   ├── hollywood.json           # Single gallery page
  │   └── subsite.json             # Standalone page under subsite/
  ├── assets/                      # Copied to output root
  └── img/                         # Copied to output root

Output:

  public/index.html               Landing page, redirects by browser language
  public/en/<slug>.html           English pages
  public/de/<slug>.html           German pages (same file names)

Set RUST_LOG=debug to trace every page and asset directory.

Run 'berneis-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and write the site
    Build,
    /// Render every page without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.source.display());
            let site = generate::prepare(&cli.source)?;
            let rendered = generate::render_site(&site)?;
            let copies = generate::write_site(&site, &rendered, &cli.source, &cli.output)?;
            output::print_build_output(&rendered, &copies, &site.config.paths.subsite_dir);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = generate::prepare(&cli.source)?;
            let rendered = generate::render_site(&site)?;
            output::print_check_output(&rendered);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
