use crate::error::{Error, Result};
use crate::models::{ContentType, Template};

/// Static, read-only template catalog. Bodies carry `[PLACEHOLDER]` tokens
/// that `fill` substitutes; unknown tokens stay visible so the user can see
/// what is still missing.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: "wifi-network",
        name: "WiFi Network",
        content_type: ContentType::Wifi,
        body: "WIFI:T:WPA;S:[NETWORK_NAME];P:[PASSWORD];;",
        description: "Share WiFi credentials easily",
    },
    Template {
        id: "business-card",
        name: "Business Card",
        content_type: ContentType::Contact,
        body: "BEGIN:VCARD\nVERSION:3.0\nFN:[FULL_NAME]\nORG:[COMPANY]\nTEL:[PHONE]\nEMAIL:[EMAIL]\nURL:[WEBSITE]\nEND:VCARD",
        description: "Digital business card",
    },
    Template {
        id: "calendar-event",
        name: "Calendar Event",
        content_type: ContentType::Event,
        body: "BEGIN:VEVENT\nSUMMARY:[EVENT_NAME]\nDTSTART:[START_DATE]\nDTEND:[END_DATE]\nLOCATION:[LOCATION]\nDESCRIPTION:[DESCRIPTION]\nEND:VEVENT",
        description: "Add event to calendar",
    },
    Template {
        id: "location-pin",
        name: "Location Pin",
        content_type: ContentType::Location,
        body: "geo:[LATITUDE],[LONGITUDE]",
        description: "Share exact location",
    },
];

pub fn find(id: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|template| template.id == id)
        .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
}

/// Substitute `[KEY]` tokens with the given values.
pub fn fill(body: &str, values: &[(String, String)]) -> String {
    let mut filled = body.to_string();
    for (key, value) in values {
        filled = filled.replace(&format!("[{}]", key), value);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup() {
        let template = find("wifi-network").unwrap();
        assert_eq!(template.content_type, ContentType::Wifi);
        assert!(find("nope").is_err());
    }

    #[test]
    fn fill_substitutes_known_tokens_and_keeps_unknown_ones() {
        let template = find("wifi-network").unwrap();
        let filled = fill(
            template.body,
            &[("NETWORK_NAME".to_string(), "HomeNet".to_string())],
        );
        assert_eq!(filled, "WIFI:T:WPA;S:HomeNet;P:[PASSWORD];;");
    }
}
