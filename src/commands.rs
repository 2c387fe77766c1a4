use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::cli::{EncodeArgs, GenerateArgs, HistoryCommand, TemplatesCommand, WatchArgs};
use crate::clipboard::{self, CopyOutcome};
use crate::database::HistoryStore;
use crate::debounce::Debouncer;
use crate::encoder::{self, EncodeOptions};
use crate::error::{Error, Result};
use crate::models::{ContentType, HistoryEntry, HistoryPackage};
use crate::normalize::normalize;
use crate::{share, templates};

/// Window within which rapid changes collapse into one regeneration.
pub const DEBOUNCE_MS: u64 = 800;

/// Payloads beyond this scan poorly on most cameras; warn but still try.
const LONG_CONTENT_CHARS: usize = 1000;

fn encode_options(args: &EncodeArgs) -> Result<EncodeOptions> {
    let (dark, light) = match &args.preset {
        Some(name) => {
            let (dark, light) = encoder::color_preset(name)?;
            (dark.to_string(), light.to_string())
        }
        None => (args.dark.clone(), args.light.clone()),
    };

    Ok(EncodeOptions {
        error_correction: args.error_correction,
        width: args.width,
        margin: args.margin,
        dark,
        light,
    })
}

fn default_output_name(content_type: ContentType) -> PathBuf {
    PathBuf::from(format!(
        "qr-{}-{}.png",
        content_type.as_str(),
        chrono::Local::now().format("%Y-%m-%d")
    ))
}

fn new_entry(content_type: ContentType, content: &str, png: &[u8]) -> HistoryEntry {
    HistoryEntry {
        id: 0,
        content_type,
        content: content.trim().to_string(),
        png: png.to_vec(),
        favorite: false,
        created_at: chrono::Local::now().to_rfc3339(),
    }
}

fn warn_if_long(payload: &str) {
    let chars = payload.chars().count();
    if chars > LONG_CONTENT_CHARS {
        warn!(chars, "content is long; dense symbols scan poorly");
    }
}

fn report_copy(outcome: CopyOutcome) {
    match outcome {
        CopyOutcome::Image => println!("copied image to clipboard"),
        CopyOutcome::TextFallback => {
            println!("image clipboard unsupported; copied text payload instead")
        }
        CopyOutcome::Unavailable(reason) => {
            println!("clipboard unavailable: {}", reason);
        }
    }
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    let options = encode_options(&args.encode)?;
    let payload = normalize(args.content_type, &args.content)?;
    warn_if_long(&payload);

    let png = encoder::render_png(&payload, &options)?;

    if !args.no_history {
        let store = HistoryStore::open_default()?;
        store.add(&new_entry(args.content_type, &args.content, &png))?;
    }

    let out = args
        .out
        .unwrap_or_else(|| default_output_name(args.content_type));
    std::fs::write(&out, &png)?;
    println!("saved {}", out.display());

    if args.copy {
        report_copy(clipboard::copy_generated(&png, &payload));
    }
    if args.share {
        share::share_file(&out, &format!("QR code for: {}", payload));
    }

    Ok(())
}

fn regenerate(
    content_type: ContentType,
    raw: &str,
    options: &EncodeOptions,
    out: &Path,
    record: bool,
) -> Result<()> {
    let payload = normalize(content_type, raw)?;
    let png = encoder::render_png(&payload, options)?;

    if record {
        let store = HistoryStore::open_default()?;
        store.add(&new_entry(content_type, raw, &png))?;
    }

    std::fs::write(out, &png)?;
    Ok(())
}

/// Read lines from stdin and re-render the output file, debounced: a burst
/// of edits produces exactly one symbol, for the final line of the burst.
pub fn watch(args: WatchArgs) -> Result<()> {
    let options = encode_options(&args.encode)?;
    let out = args
        .out
        .unwrap_or_else(|| default_output_name(args.content_type));
    let record = !args.no_history;

    println!(
        "watching stdin, rendering to {} (Ctrl-D to finish)",
        out.display()
    );

    let debouncer = Debouncer::new(Duration::from_millis(DEBOUNCE_MS));
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let content_type = args.content_type;
        let options = options.clone();
        let out = out.clone();

        debouncer.submit(move || {
            match regenerate(content_type, &line, &options, &out, record) {
                Ok(()) => println!("rendered {}", out.display()),
                // Blank lines clear the pending render, nothing to draw.
                Err(Error::EmptyInput) => debug!("skipped empty input"),
                Err(err) => warn!(error = %err, "regeneration failed"),
            }
        });
    }
    debouncer.settle();

    Ok(())
}

pub fn history(command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List { favorites } => {
            let store = HistoryStore::open_default()?;
            if store.is_empty()? {
                println!("history is empty");
                return Ok(());
            }

            let entries = store.list(favorites)?;
            for entry in &entries {
                println!(
                    "{:>4}  {:<8} {}  {}  {}",
                    entry.id,
                    entry.content_type.as_str(),
                    if entry.favorite { "*" } else { " " },
                    entry.created_at,
                    truncate(&entry.content, 48),
                );
            }
            println!("{} of {} entries", entries.len(), store.len()?);
        }
        HistoryCommand::Favorite { id } => {
            let store = HistoryStore::open_default()?;
            if store.toggle_favorite(id)? {
                println!("toggled favorite on entry {}", id);
            } else {
                println!("no entry with id {}", id);
            }
        }
        HistoryCommand::Delete { id } => {
            let store = HistoryStore::open_default()?;
            if store.remove(id)? {
                println!("deleted entry {}", id);
            } else {
                println!("no entry with id {}", id);
            }
        }
        HistoryCommand::Clear => {
            let store = HistoryStore::open_default()?;
            let removed = store.clear()?;
            println!("cleared {} entries", removed);
        }
        HistoryCommand::Save { id, out } => {
            let store = HistoryStore::open_default()?;
            let entry = store.get(id)?.ok_or(Error::EntryNotFound(id))?;
            let out = out.unwrap_or_else(|| default_output_name(entry.content_type));
            std::fs::write(&out, &entry.png)?;
            println!("saved {}", out.display());
        }
        HistoryCommand::Export { path } => export_history(path)?,
        HistoryCommand::Import { path } => {
            let json = std::fs::read_to_string(&path)?;
            let package: HistoryPackage = serde_json::from_str(&json)?;
            let mut store = HistoryStore::open_default()?;
            let imported = store.import_package(&package)?;
            println!("imported {} entries", imported);
        }
    }

    Ok(())
}

fn export_history(path: Option<PathBuf>) -> Result<()> {
    let default_name = format!(
        "qr-history-{}.json",
        chrono::Local::now().format("%Y-%m-%d")
    );

    let mut out = path.unwrap_or_else(|| PathBuf::from(&default_name));
    if out.is_dir() {
        out.push(&default_name);
    } else if out.extension().is_none() {
        out.set_extension("json");
    }
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = HistoryStore::open_default()?;
    let package = store.export_package()?;
    let json = serde_json::to_string_pretty(&package)?;
    std::fs::write(&out, json)?;
    println!("exported {} entries to {}", package.entries.len(), out.display());

    Ok(())
}

pub fn templates(command: TemplatesCommand) -> Result<()> {
    match command {
        TemplatesCommand::List => {
            for template in templates::TEMPLATES {
                println!(
                    "{:<16} {:<16} [{}] {}",
                    template.id,
                    template.name,
                    template.content_type.as_str(),
                    template.description,
                );
            }
        }
        TemplatesCommand::Use {
            id,
            set,
            encode,
            out,
            copy,
            share,
            no_history,
        } => {
            let template = templates::find(&id)?;
            let content = templates::fill(template.body, &set);
            generate(GenerateArgs {
                content,
                content_type: template.content_type,
                encode,
                out,
                copy,
                share,
                no_history,
            })?;
        }
    }

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let head: String = flat.chars().take(max_chars).collect();
    format!("{}...", head)
}
