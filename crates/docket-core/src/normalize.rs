//! Template-data normalizer: maps a [`FormData`] onto the exact variable set
//! a template's markup references.
//!
//! Normalization is total: every variable has a default, so any input,
//! including an empty record, produces a complete [`TemplateVariables`]. The
//! only input besides the form is `today`, used for date and year fallbacks.
//!
//! Each [`TemplateKind`] owns its own derivation; the fields every template
//! shares live in [`CommonVariables`] and are flattened into the output.

use crate::case_number::format_case_number;
use crate::form::{AdvocateEntry, FormData, PersonRecord};
use crate::types::TemplateKind;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const DEFAULT_COURT: &str = "COIMBATORE";
const DEFAULT_ADVOCATE_CITY: &str = "Coimbatore";
const DEFAULT_ADVOCATE_ADDRESS_LINES: [&str; 3] = [
    "78/82, Semi Basement,",
    "Govt. Arts College Road,",
    "Cheran Towers,",
];

// Petition defaults
const DEFAULT_RESPONDENT_NAME: &str = "INSPECTOR OF POLICE,";
const DEFAULT_RESPONDENT_ADDRESS: &str = "PERIYANAIKENPALAYAM POLICE<br>STATION,<br>Coimbatore.";
const RESPONDENT_STATION_SUFFIX: &str = " Coimbatore.";
const DEFAULT_SECTION: &str = "355(1)";
const DEFAULT_PLACE: &str = "Coimbatore";
const PETITIONER_SEPARATOR: &str = " – ";

// Vakalathnama defaults
const DEFAULT_TRIBUNAL: &str = "COIMBATORE";
const DEFAULT_OA_NUMBER: &str = "182";
const DEFAULT_APPLICANT_NAME: &str = "INDIAN BANK";
const DEFAULT_APPLICANT_BRANCH: &str = "RAMNAGAR BRANCH";
const DEFAULT_APPLICANT_ADDRESS: &str = "COIMBATORE - 641 062.";
const DEFAULT_ADVOCATE: &str = "A.AASHIK ALI.B.A.LL.B.";
const DEFAULT_ENROLLMENT: &str = "MS.3368/2022";
const DEFAULT_ADVOCATES_LIST: &str = "A.AASHIK ALI.B.A.LL.B., (MS.3368/2022), \
V.VIJAYA KUMAR.B.A.LL.B., (MS.909/2022), S.SYED AHMED SHERIFF.B.A.LL.B., (MS.1270/2023)";
const VAKALATHNAMA_TITLE: &str = "VAKALATHNAMA FOR";
const DEFENDANTS_TITLE: &str = "THE DEFENDANTS";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Normalized variables for one template, serialized as a flat camelCase
/// object for the templating engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemplateVariables {
    Petition(PetitionVariables),
    Vakalathnama(VakalathnamaVariables),
}

impl TemplateVariables {
    pub fn common(&self) -> &CommonVariables {
        match self {
            TemplateVariables::Petition(v) => &v.common,
            TemplateVariables::Vakalathnama(v) => &v.common,
        }
    }

    pub fn kind(&self) -> TemplateKind {
        match self {
            TemplateVariables::Petition(_) => TemplateKind::Petition,
            TemplateVariables::Vakalathnama(_) => TemplateKind::Vakalathnama,
        }
    }

    /// JSON object handed to the templating engine.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Variables every template receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonVariables {
    pub case_number: String,
    pub court_name: String,
    pub day: String,
    pub month: String,
    pub year: String,
    pub advocate_name: String,
    pub advocate_address: String,
    pub advocate_city: String,
    pub advocate_phone: String,
    pub advocate_email: String,
    /// Same image as `advocate_signature_path`, preferring the base64 upload.
    pub lawyer_signature_path: Option<String>,
    /// Same image as `lawyer_signature_path`, preferring the direct field.
    pub advocate_signature_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionVariables {
    #[serde(flatten)]
    pub common: CommonVariables,
    pub petitioner_names: String,
    pub petitioner_names_array: Vec<String>,
    pub respondent_name: String,
    pub respondent_address: String,
    pub section_number: String,
    /// Non-blank points, each prefixed `"{n}. "`.
    pub petition_points: Vec<String>,
    pub point1: String,
    pub point2: String,
    pub point3: String,
    pub point4: String,
    pub prayer_text: String,
    pub place: String,
    pub hearing_date: String,
    pub court_full_name: String,
    pub address_section: bool,
    pub advocate_address_line1: String,
    pub advocate_address_line2: String,
    pub advocate_address_line3: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Defendant {
    /// Ordinal label, `"1."`, `"2."`, …
    pub number: String,
    pub name: String,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefendantSignature {
    pub signature_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VakalathnamaVariables {
    #[serde(flatten)]
    pub common: CommonVariables,
    pub tribunal_location: String,
    pub oa_number: String,
    pub oa_year: String,
    pub applicant_name: String,
    pub applicant_branch: String,
    pub applicant_address: String,
    pub defendants: Vec<Defendant>,
    pub defendant_signatures: Vec<DefendantSignature>,
    pub defendant_numbers: String,
    pub advocates: Vec<AdvocateEntry>,
    pub advocates_list: String,
    pub execution_day: String,
    pub execution_month: String,
    pub execution_year: String,
    pub advocate_address_line1: String,
    pub advocate_address_line2: String,
    pub advocate_address_line3: String,
    pub vakalathnama_title_line1: String,
    pub vakalathnama_title_line2: String,
    pub vakalathnama_signature: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Normalize `form` for a template of `kind`.
pub fn normalize(form: &FormData, kind: TemplateKind, today: NaiveDate) -> TemplateVariables {
    kind.normalize(form, today)
}

impl TemplateKind {
    /// Derive this template's variables from `form`.
    pub fn normalize(&self, form: &FormData, today: NaiveDate) -> TemplateVariables {
        let common = common_variables(form, today);
        tracing::debug!(kind = %self, case_number = %common.case_number, "normalizing form data");
        match self {
            TemplateKind::Petition => TemplateVariables::Petition(petition(form, common, today)),
            TemplateKind::Vakalathnama => {
                TemplateVariables::Vakalathnama(vakalathnama(form, common, today))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Common
// ---------------------------------------------------------------------------

fn common_variables(form: &FormData, today: NaiveDate) -> CommonVariables {
    let dates = DateParts::resolve(form, today);
    CommonVariables {
        case_number: format_case_number(
            form.case_number(),
            form.case_number_fallback.as_deref(),
            today.year(),
        ),
        court_name: or(&form.court_name, DEFAULT_COURT),
        day: dates.day,
        month: dates.month,
        year: dates.year,
        advocate_name: first(&[&form.advocate_name, &form.lawyer_name]).unwrap_or_default(),
        advocate_address: or(&form.advocate_address, ""),
        advocate_city: or(&form.advocate_city, DEFAULT_ADVOCATE_CITY),
        advocate_phone: or(&form.advocate_phone, ""),
        advocate_email: or(&form.advocate_email, ""),
        lawyer_signature_path: first(&[&form.lawyer_signature_base64, &form.advocate_signature]),
        advocate_signature_path: first(&[&form.advocate_signature, &form.lawyer_signature_base64]),
    }
}

/// Execution date fields, each independently defaulted to `today`.
struct DateParts {
    day: String,
    month: String,
    year: String,
}

impl DateParts {
    fn resolve(form: &FormData, today: NaiveDate) -> Self {
        Self {
            day: form
                .execution_day
                .clone()
                .unwrap_or_else(|| today.day().to_string()),
            month: form
                .execution_month
                .clone()
                .unwrap_or_else(|| today.format("%B").to_string()),
            year: form
                .execution_year
                .clone()
                .unwrap_or_else(|| today.year().to_string()),
        }
    }
}

fn advocate_address_lines(form: &FormData) -> [String; 3] {
    std::array::from_fn(|i| or(&form.advocate_address_lines[i], DEFAULT_ADVOCATE_ADDRESS_LINES[i]))
}

// ---------------------------------------------------------------------------
// Template 1: petition
// ---------------------------------------------------------------------------

fn petition(form: &FormData, common: CommonVariables, today: NaiveDate) -> PetitionVariables {
    let accused = form.accused.as_deref().unwrap_or_default();

    let petitioner_names = accused
        .iter()
        .filter_map(|p| p.name.as_deref())
        .collect::<Vec<_>>()
        .join(PETITIONER_SEPARATOR);

    let petitioner_names_array = accused
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let name = p.name.as_deref()?;
            let designation = p
                .designation
                .clone()
                .unwrap_or_else(|| format!("A{}", i + 1));
            Some(format!("{name}{PETITIONER_SEPARATOR}{designation}"))
        })
        .collect();

    let respondent_address = match (&form.respondent_address, &form.respondent_station) {
        (Some(address), _) => address.clone(),
        (None, Some(station)) => format!("{station}{RESPONDENT_STATION_SUFFIX}"),
        (None, None) => DEFAULT_RESPONDENT_ADDRESS.to_string(),
    };

    let [point1, point2, point3, point4] = raw_points(form);
    let [line1, line2, line3] = advocate_address_lines(form);
    let court_full_name = form
        .court_full_name
        .clone()
        .unwrap_or_else(|| format!("PRINCIPAL DISTRICT AND SESSIONS JUDGE OF {}", common.court_name));

    PetitionVariables {
        petitioner_names,
        petitioner_names_array,
        respondent_name: or(&form.respondent_name, DEFAULT_RESPONDENT_NAME),
        respondent_address,
        section_number: or(&form.section_number, DEFAULT_SECTION),
        petition_points: numbered_points(form),
        point1,
        point2,
        point3,
        point4,
        prayer_text: or(&form.prayer, ""),
        place: or(&form.place, DEFAULT_PLACE),
        hearing_date: form
            .hearing_date
            .clone()
            .unwrap_or_else(|| today.format("%d/%m/%Y").to_string()),
        court_full_name,
        address_section: form.address_section != Some(false),
        advocate_address_line1: line1,
        advocate_address_line2: line2,
        advocate_address_line3: line3,
        common,
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A non-empty `petitionPoints` array wins outright, even if every element
/// turns out blank; otherwise the individual `point1..point4` fields are used.
fn numbered_points(form: &FormData) -> Vec<String> {
    let points: Vec<&str> = match form.petition_points.as_deref() {
        Some(items) if !items.is_empty() => items
            .iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !is_blank(p))
            .collect(),
        _ => form
            .points
            .iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !is_blank(p))
            .collect(),
    };

    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {p}", i + 1))
        .collect()
}

/// `point1..point4`: the matching array slot when it is a non-blank string,
/// else the individually-named field.
fn raw_points(form: &FormData) -> [String; 4] {
    std::array::from_fn(|i| {
        form.petition_points
            .as_deref()
            .and_then(|items| items.get(i))
            .and_then(|p| p.as_deref())
            .filter(|p| !is_blank(p))
            .map(str::to_string)
            .or_else(|| form.points[i].clone())
            .unwrap_or_default()
    })
}

// ---------------------------------------------------------------------------
// Template 2: vakalathnama
// ---------------------------------------------------------------------------

fn vakalathnama(
    form: &FormData,
    common: CommonVariables,
    today: NaiveDate,
) -> VakalathnamaVariables {
    let source: &[PersonRecord] = match (&form.defendants, &form.accused) {
        (Some(d), _) if !d.is_empty() => d,
        (_, Some(a)) if !a.is_empty() => a,
        _ => &[],
    };

    let defendants: Vec<Defendant> = source
        .iter()
        .enumerate()
        .map(|(i, p)| Defendant {
            number: format!("{}.", i + 1),
            name: p
                .name
                .clone()
                .unwrap_or_else(|| format!("Defendant {}", i + 1)),
            signature: p.signature.clone(),
        })
        .collect();

    let defendant_numbers = (1..=defendants.len())
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let defendant_signatures = defendants
        .iter()
        .map(|d| DefendantSignature {
            signature_path: d.signature.clone(),
        })
        .collect();

    let vakalathnama_title_line2 = if defendant_numbers.is_empty() {
        DEFENDANTS_TITLE.to_string()
    } else {
        format!("{DEFENDANTS_TITLE} {defendant_numbers}")
    };

    let advocates = form.advocates.clone().unwrap_or_else(|| {
        vec![AdvocateEntry {
            name: first(&[&form.advocate_name_1, &form.advocate_name])
                .unwrap_or_else(|| DEFAULT_ADVOCATE.to_string()),
            enrollment_number: or(&form.advocate_enrollment_1, DEFAULT_ENROLLMENT),
        }]
    });

    let dates = DateParts::resolve(form, today);
    let [line1, line2, line3] = advocate_address_lines(form);

    VakalathnamaVariables {
        tribunal_location: or(&form.tribunal_location, DEFAULT_TRIBUNAL),
        oa_number: or(&form.oa_number, DEFAULT_OA_NUMBER),
        oa_year: form
            .oa_year
            .clone()
            .unwrap_or_else(|| today.year().to_string()),
        applicant_name: or(&form.applicant_name, DEFAULT_APPLICANT_NAME),
        applicant_branch: or(&form.applicant_branch, DEFAULT_APPLICANT_BRANCH),
        applicant_address: or(&form.applicant_address, DEFAULT_APPLICANT_ADDRESS),
        defendants,
        defendant_signatures,
        defendant_numbers,
        advocates,
        advocates_list: or(&form.advocates_list, DEFAULT_ADVOCATES_LIST),
        execution_day: dates.day,
        execution_month: dates.month,
        execution_year: dates.year,
        advocate_address_line1: line1,
        advocate_address_line2: line2,
        advocate_address_line3: line3,
        vakalathnama_title_line1: VAKALATHNAMA_TITLE.to_string(),
        vakalathnama_title_line2,
        vakalathnama_signature: form.vakalathnama_signature.clone(),
        common,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn or(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

fn first(candidates: &[&Option<String>]) -> Option<String> {
    candidates.iter().find_map(|c| (*c).clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
