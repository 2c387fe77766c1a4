use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{ContentType, ErrorCorrection};

#[derive(Parser)]
#[command(
    name = "qrsnap",
    version,
    about = "Generate QR codes with a local, capped history"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a QR code from the given content
    Generate(GenerateArgs),
    /// Re-render debounced as lines arrive on stdin
    Watch(WatchArgs),
    /// Inspect and manage past generations
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// Work with the built-in content templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

/// Rendering flags shared by every command that encodes.
#[derive(Args, Clone)]
pub struct EncodeArgs {
    /// Error-correction level
    #[arg(long = "ec", value_enum, ignore_case = true, default_value_t = ErrorCorrection::H)]
    pub error_correction: ErrorCorrection,

    /// Edge length in pixels (256-1024)
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Quiet zone width in modules (1-8)
    #[arg(long, default_value_t = 4)]
    pub margin: u32,

    /// Foreground color as #rrggbb
    #[arg(long, default_value = "#1f2937")]
    pub dark: String,

    /// Background color as #rrggbb
    #[arg(long, default_value = "#ffffff")]
    pub light: String,

    /// Named color pair (classic, ocean, forest, sunset, royal, gold)
    #[arg(long, conflicts_with_all = ["dark", "light"])]
    pub preset: Option<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Content to encode (e.g. "example.com", "a@b.com")
    pub content: String,

    /// Content type; selects the normalization rule
    #[arg(long = "type", value_enum, default_value_t = ContentType::Text)]
    pub content_type: ContentType,

    #[command(flatten)]
    pub encode: EncodeArgs,

    /// Output file (defaults to qr-<type>-<date>.png)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Copy the rendered image to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Hand the rendered file to the platform open/share facility
    #[arg(long)]
    pub share: bool,

    /// Skip recording this generation in the history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Args)]
pub struct WatchArgs {
    /// Content type; selects the normalization rule
    #[arg(long = "type", value_enum, default_value_t = ContentType::Text)]
    pub content_type: ContentType,

    #[command(flatten)]
    pub encode: EncodeArgs,

    /// Output file re-rendered on every settled change
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Skip recording generations in the history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List past generations, newest first
    List {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Toggle the favorite flag on an entry
    Favorite { id: i64 },
    /// Delete one entry
    Delete { id: i64 },
    /// Delete every entry
    Clear,
    /// Write the stored PNG of an entry back to disk
    Save {
        id: i64,
        /// Output file (defaults to qr-<type>-<date>.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export the history as a JSON document
    Export {
        /// Output file or directory (defaults to qr-history-<date>.json)
        path: Option<PathBuf>,
    },
    /// Prepend entries from an exported JSON document
    Import { path: PathBuf },
}

#[derive(Subcommand)]
pub enum TemplatesCommand {
    /// List the built-in templates
    List,
    /// Generate from a template, substituting [PLACEHOLDER] tokens
    Use {
        /// Template id (see `templates list`)
        id: String,

        /// Placeholder substitution, may repeat: --set NETWORK_NAME=HomeNet
        #[arg(long = "set", value_parser = parse_key_value)]
        set: Vec<(String, String)>,

        #[command(flatten)]
        encode: EncodeArgs,

        /// Output file (defaults to qr-<type>-<date>.png)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Copy the rendered image to the clipboard
        #[arg(long)]
        copy: bool,

        /// Hand the rendered file to the platform open/share facility
        #[arg(long)]
        share: bool,

        /// Skip recording this generation in the history
        #[arg(long)]
        no_history: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn error_correction_levels_parse_as_documented() {
        for level in ["L", "M", "Q", "H", "h"] {
            let parsed = Cli::try_parse_from(["qrsnap", "generate", "--ec", level, "hello"]);
            assert!(parsed.is_ok(), "--ec {} rejected", level);
        }
        assert!(Cli::try_parse_from(["qrsnap", "generate", "--ec", "X", "hello"]).is_err());
    }

    #[test]
    fn key_value_parser() {
        assert_eq!(
            parse_key_value("A=b=c").unwrap(),
            ("A".to_string(), "b=c".to_string())
        );
        assert!(parse_key_value("nope").is_err());
    }
}
