use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of payload a QR code carries. Determines the normalization rule
/// applied before encoding and the placeholder shown in help text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Text,
    Email,
    Phone,
    Wifi,
    Location,
    Event,
    Contact,
    Sms,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Wifi => "wifi",
            ContentType::Location => "location",
            ContentType::Event => "event",
            ContentType::Contact => "contact",
            ContentType::Sms => "sms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Url => "URL/Website",
            ContentType::Text => "Plain Text",
            ContentType::Email => "Email",
            ContentType::Phone => "Phone",
            ContentType::Wifi => "WiFi",
            ContentType::Location => "Location",
            ContentType::Event => "Calendar Event",
            ContentType::Contact => "Contact Card",
            ContentType::Sms => "SMS",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ContentType::Url => "https://example.com",
            ContentType::Text => "Enter your text here",
            ContentType::Email => "user@example.com",
            ContentType::Phone => "+1234567890",
            ContentType::Wifi => "WIFI:T:WPA;S:NetworkName;P:Password;;",
            ContentType::Location => "geo:37.7749,-122.4194",
            ContentType::Event => "BEGIN:VEVENT...",
            ContentType::Contact => "BEGIN:VCARD...",
            ContentType::Sms => "sms:+1234567890:Hello!",
        }
    }

    /// Parse a stored tag, falling back to plain text for anything unknown.
    pub fn from_tag(tag: &str) -> ContentType {
        match tag {
            "url" => ContentType::Url,
            "email" => ContentType::Email,
            "phone" => ContentType::Phone,
            "wifi" => ContentType::Wifi,
            "location" => ContentType::Location,
            "event" => ContentType::Event,
            "contact" => ContentType::Contact,
            "sms" => ContentType::Sms,
            _ => ContentType::Text,
        }
    }
}

/// QR redundancy tier; higher tiers tolerate more damage but hold less data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrection {
    pub fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// One past generation. `content` is the raw user input before any prefix
/// normalization so it can be edited and re-used as typed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub content_type: ContentType,
    pub content: String,
    #[serde(with = "png_base64")]
    pub png: Vec<u8>,
    pub favorite: bool,
    pub created_at: String,
}

/// Transportable history document produced by export and consumed by import.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryPackage {
    pub version: u32,
    pub exported_at: String,
    pub entries: Vec<HistoryEntry>,
}

pub const HISTORY_PACKAGE_VERSION: u32 = 1;

/// Pre-filled content pattern with `[PLACEHOLDER]` tokens.
#[derive(Clone, Debug)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub content_type: ContentType,
    pub body: &'static str,
    pub description: &'static str,
}

/// PNG blobs travel inside the JSON export as base64 strings.
mod png_base64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_round_trips_through_json() {
        let entry = HistoryEntry {
            id: 7,
            content_type: ContentType::Url,
            content: "example.com".to_string(),
            png: vec![0x89, 0x50, 0x4e, 0x47],
            favorite: true,
            created_at: "2026-08-29T10:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"url\""));
        // PNG bytes must appear as a base64 string, not a byte array.
        assert!(json.contains("\"iVBORw==\""));

        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.png, entry.png);
        assert_eq!(back.content_type, ContentType::Url);
        assert!(back.favorite);
    }

    #[test]
    fn unknown_tag_falls_back_to_text() {
        assert_eq!(ContentType::from_tag("url"), ContentType::Url);
        assert_eq!(ContentType::from_tag("bogus"), ContentType::Text);
    }
}
