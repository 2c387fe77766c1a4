use crate::error::{Error, Result};
use crate::models::ContentType;

/// Build the exact payload string handed to the encoder.
///
/// Scheme prefixes are added only when missing, so normalizing an
/// already-normalized payload is a no-op. Free-form types (text, wifi,
/// event, contact) pass through untouched.
pub fn normalize(content_type: ContentType, raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let payload = match content_type {
        ContentType::Email => with_prefix(text, "mailto:"),
        ContentType::Phone => with_prefix(text, "tel:"),
        ContentType::Sms => with_prefix(text, "sms:"),
        ContentType::Location => with_prefix(text, "geo:"),
        ContentType::Url => {
            if text.starts_with("http://")
                || text.starts_with("https://")
                || text.starts_with("ftp://")
            {
                text.to_string()
            } else {
                format!("https://{}", text)
            }
        }
        ContentType::Text | ContentType::Wifi | ContentType::Event | ContentType::Contact => {
            text.to_string()
        }
    };

    Ok(payload)
}

fn with_prefix(text: &str, prefix: &str) -> String {
    if text.starts_with(prefix) {
        text.to_string()
    } else {
        format!("{}{}", prefix, text)
    }
}
