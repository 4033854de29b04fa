//! Core types shared across docket crates.
//!
//! [`TemplateId`] is the wire-level selector clients send, [`TemplateKind`] is
//! the document family it resolves to, and [`TemplateRecord`] is a catalogue
//! entry as served by `/api/templates`.

use serde::{Deserialize, Serialize};

/// Numeric template selector (`PetTemMasId` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl TemplateId {
    /// Parse a selector from loosely-typed JSON: a positive integer, or a
    /// string whose leading digits form one (`"2"`, `" 2 "`, `"2abc"`).
    ///
    /// Zero, negatives, and anything without leading digits yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f.trunc() as u64))
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .map(TemplateId),
            serde_json::Value::String(s) => Self::parse_prefix(s),
            _ => None,
        }
    }

    /// Parse the leading decimal digits of `s` after trimming, e.g. a path
    /// segment such as `"1"` or `"1-preview"`.
    pub fn parse_prefix(s: &str) -> Option<Self> {
        let s = s.trim();
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        s[..end]
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(TemplateId)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which document family a template belongs to. Each variant owns its own
/// normalization (see [`crate::normalize`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Petition under Section 355(1) B.N.S.S.: absence condonation.
    Petition,
    /// Vakalathnama: power of attorney appointing advocates.
    Vakalathnama,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Petition => write!(f, "petition"),
            TemplateKind::Vakalathnama => write!(f, "vakalathnama"),
        }
    }
}

/// A catalogue entry. Field names on the wire follow the petition-management
/// client's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRecord {
    #[serde(rename = "PetTemMasId")]
    pub id: TemplateId,
    #[serde(rename = "PetitionNumber")]
    pub petition_number: String,
    #[serde(rename = "PetitionName")]
    pub petition_name: String,
    #[serde(rename = "TemplateType")]
    pub template_type: String,
    #[serde(rename = "IsActive")]
    pub is_active: bool,
    #[serde(rename = "TemplateContent")]
    pub content: String,
    #[serde(rename = "CreatedDate")]
    pub created: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "UpdatedDate")]
    pub updated: chrono::DateTime<chrono::Utc>,
    #[serde(skip)]
    pub kind: TemplateKind,
}
