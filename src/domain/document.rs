use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity document classes accepted by the booking flows.
///
/// The serialized strings are the option values the agency site has
/// always stored, so existing snapshots keep deserializing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentType {
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "CE")]
    Ce,
    #[serde(rename = "NIT")]
    Nit,
    #[serde(rename = "PASAPORTE")]
    Pasaporte,
    #[serde(rename = "TI")]
    Ti,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Cc,
        DocumentType::Ce,
        DocumentType::Nit,
        DocumentType::Pasaporte,
        DocumentType::Ti,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Cc => "CC",
            DocumentType::Ce => "CE",
            DocumentType::Nit => "NIT",
            DocumentType::Pasaporte => "PASAPORTE",
            DocumentType::Ti => "TI",
        }
    }

    /// Human-facing label used by pickers and summaries.
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Cc => "Cédula de Ciudadanía",
            DocumentType::Ce => "Cédula de Extranjería",
            DocumentType::Nit => "NIT",
            DocumentType::Pasaporte => "Pasaporte",
            DocumentType::Ti => "Tarjeta de Identidad",
        }
    }

    pub fn parse(value: &str) -> Option<DocumentType> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values() {
        assert_eq!(DocumentType::parse("CC"), Some(DocumentType::Cc));
        assert_eq!(DocumentType::parse(" pasaporte "), Some(DocumentType::Pasaporte));
        assert_eq!(DocumentType::parse("DNI"), None);
        assert_eq!(DocumentType::parse(""), None);
    }

    #[test]
    fn labels_are_picker_ready() {
        assert_eq!(DocumentType::Cc.label(), "Cédula de Ciudadanía");
        assert_eq!(DocumentType::Nit.label(), "NIT");
    }

    #[test]
    fn round_trips_through_serde() {
        let json = serde_json::to_string(&DocumentType::Pasaporte).unwrap();
        assert_eq!(json, "\"PASAPORTE\"");
        let parsed: DocumentType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DocumentType::Pasaporte);
    }
}
