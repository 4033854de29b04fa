//! Template repository: the catalogue of document templates.
//!
//! Handlers depend on the [`TemplateRepository`] trait rather than a global
//! list, so tests can inject their own catalogue. [`BuiltinTemplates`] is the
//! production catalogue; its markup is embedded in the binary via
//! [`include_str!`] so the server works without any files on disk.

use crate::types::{TemplateId, TemplateKind, TemplateRecord};

const PETITION_355_SRC: &str = include_str!("templates/petition_355.hbs");
const VAKALATHNAMA_SRC: &str = include_str!("templates/vakalathnama.hbs");

/// Read-only access to the template catalogue.
pub trait TemplateRepository: Send + Sync {
    /// All active templates, in catalogue order.
    fn list_active(&self) -> Vec<TemplateRecord>;

    /// The active template with `id`, if any. Inactive templates are hidden.
    fn find_active(&self, id: TemplateId) -> Option<TemplateRecord> {
        self.list_active().into_iter().find(|t| t.id == id)
    }
}

/// In-memory catalogue built once at startup.
#[derive(Debug, Clone)]
pub struct BuiltinTemplates {
    templates: Vec<TemplateRecord>,
}

impl BuiltinTemplates {
    /// The two court documents shipped with docket, stamped with the current
    /// time as their created/updated dates.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let record = |id, number: &str, name: &str, kind, content: &str| TemplateRecord {
            id: TemplateId(id),
            petition_number: number.to_string(),
            petition_name: name.to_string(),
            template_type: "HTML".to_string(),
            is_active: true,
            content: content.to_string(),
            created: now,
            updated: now,
            kind,
        };

        Self::from_records(vec![
            record(
                1,
                "TEMP-001",
                "Petition under Section 355(1) - Absence Condonation",
                TemplateKind::Petition,
                PETITION_355_SRC,
            ),
            record(
                2,
                "TEMP-002",
                "Vakalathnama - Power of Attorney",
                TemplateKind::Vakalathnama,
                VAKALATHNAMA_SRC,
            ),
        ])
    }

    /// Wrap an arbitrary list of records (inactive ones included).
    pub fn from_records(templates: Vec<TemplateRecord>) -> Self {
        Self { templates }
    }
}

impl Default for BuiltinTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRepository for BuiltinTemplates {
    fn list_active(&self) -> Vec<TemplateRecord> {
        self.templates.iter().filter(|t| t.is_active).cloned().collect()
    }

    fn find_active(&self, id: TemplateId) -> Option<TemplateRecord> {
        self.templates
            .iter()
            .find(|t| t.id == id && t.is_active)
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
