//! Command-line interface for the harvester.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{article_url, DEFAULT_WIKI_API_URL};
use crate::error::Result;
use crate::excerpt::WikiClient;

/// Width used when printing paragraphs.
const TEXT_WRAP_WIDTH: usize = 100;

/// Spadchyna Harvester - Fetch article excerpts from Belarusian Wikipedia.
#[derive(Parser)]
#[command(name = "spadchyna-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the leading paragraphs of an article.
    Excerpt {
        /// Page title (e.g., "Мірскі замак")
        title: String,

        /// Number of paragraphs to keep
        #[arg(short, long, default_value_t = 1)]
        paragraphs: usize,

        /// Read API endpoint
        #[arg(long, default_value = DEFAULT_WIKI_API_URL)]
        api_url: String,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Excerpt {
            title,
            paragraphs,
            api_url,
        } => excerpt_command(&title, paragraphs, &api_url).await,
    }
}

/// Execute the excerpt command.
async fn excerpt_command(title: &str, paragraphs: usize, api_url: &str) -> Result<()> {
    let client = WikiClient::with_api_url(api_url)?;

    println!(
        "{} {} ({} paragraph(s))",
        style("Fetching").bold(),
        style(title).cyan(),
        paragraphs
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Querying Wikipedia...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let excerpt = match client.fetch_excerpt(title, paragraphs).await {
        Ok(excerpt) => excerpt,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    if !excerpt.found {
        println!("{} {}", style("Not found:").yellow().bold(), excerpt.title);
        return Ok(());
    }

    println!("  Source: {}", style(article_url(&excerpt.title)).green());
    println!();
    for paragraph in excerpt.paragraphs.iter().filter(|p| !p.trim().is_empty()) {
        println!("{}", textwrap::fill(paragraph, TEXT_WRAP_WIDTH));
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_excerpt() {
        let cli = Cli::parse_from(["spadchyna-harvester", "excerpt", "Горадня"]);

        let Commands::Excerpt {
            title,
            paragraphs,
            api_url,
        } = cli.command;
        assert_eq!(title, "Горадня");
        assert_eq!(paragraphs, 1);
        assert_eq!(api_url, DEFAULT_WIKI_API_URL);
    }

    #[test]
    fn test_cli_parse_excerpt_with_paragraphs() {
        let cli = Cli::parse_from([
            "spadchyna-harvester",
            "excerpt",
            "Горадня",
            "--paragraphs",
            "4",
        ]);

        let Commands::Excerpt { paragraphs, .. } = cli.command;
        assert_eq!(paragraphs, 4);
    }
}
