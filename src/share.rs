use std::path::Path;

use tracing::warn;

/// Result of handing a rendered file to the platform. Share trouble is a
/// recoverable notice, never a hard failure.
#[derive(Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Opened,
    Unsupported(String),
}

/// Hand the PNG to the platform's default handler together with a
/// descriptive line on stdout. Platforms without an opener (headless
/// sessions, missing associations) report [`ShareOutcome::Unsupported`].
pub fn share_file(path: &Path, description: &str) -> ShareOutcome {
    println!("{}", description);
    match opener::open(path) {
        Ok(()) => ShareOutcome::Opened,
        Err(err) => {
            warn!(error = %err, path = %path.display(), "platform share unavailable");
            ShareOutcome::Unsupported(err.to_string())
        }
    }
}
