//! Command-line interface definitions for the feed renderer.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Render an Instant Articles RSS feed from a manifest.
///
/// # Examples
///
/// ```sh
/// # Render feed.xml only
/// instant_articles -i feed.yaml -o ./public
///
/// # Also write one HTML file per article and a JSON index
/// instant_articles -i feed.yaml -o ./public --articles --index
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Manifest describing the feed (YAML, or JSON with a .json extension)
    #[arg(short, long, env = "INSTANT_MANIFEST")]
    pub input: PathBuf,

    /// Output directory for feed.xml and the optional extras
    #[arg(short, long, env = "INSTANT_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Also write every article to articles/<guid>.html
    #[arg(long)]
    pub articles: bool,

    /// Also write feed_index.json
    #[arg(long)]
    pub index: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "instant_articles",
            "--input",
            "feed.yaml",
            "--output-dir",
            "./public",
        ]);

        assert_eq!(cli.input, PathBuf::from("feed.yaml"));
        assert_eq!(cli.output_dir, PathBuf::from("./public"));
        assert!(!cli.articles);
        assert!(!cli.index);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "instant_articles",
            "-i",
            "/tmp/feed.json",
            "-o",
            "/tmp/out",
            "--articles",
            "--index",
        ]);

        assert_eq!(cli.input, PathBuf::from("/tmp/feed.json"));
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
        assert!(cli.articles);
        assert!(cli.index);
    }
}
