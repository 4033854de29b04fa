//! Request-side input model: [`FormData`] and its nested records.
//!
//! Clients send `formData` as an arbitrary JSON object. Building a
//! [`FormData`] never fails: every recognised key is lifted into an explicit
//! `Option`, anything of the wrong shape counts as absent, and unknown keys
//! are ignored.
//!
//! Text fields follow "present if truthy" rules: a non-empty string, or a
//! number rendered in decimal. `null`, booleans, arrays, objects and `""` are
//! all absent. Case-number keys are stricter, see [`FormData::case_number`].

use serde::Deserialize;
use serde_json::{Map, Value};

/// One accused / defendant entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
    /// `name`, else `AccusedName`.
    pub name: Option<String>,
    pub designation: Option<String>,
    /// Signature image reference (data URI or URL).
    pub signature: Option<String>,
}

/// One advocate appearing on a vakalathnama.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateEntry {
    pub name: String,
    pub enrollment_number: String,
}

/// Explicit optional-field view of a request's `formData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct FormData {
    // Case number
    /// First truthy of `caseNumber` / `SCNo`, kept only if it is a string.
    pub case_number: Option<String>,
    /// `case_number`, a bare number supplied separately.
    pub case_number_fallback: Option<String>,

    // Common
    pub court_name: Option<String>,
    pub execution_day: Option<String>,
    pub execution_month: Option<String>,
    pub execution_year: Option<String>,
    pub advocate_name: Option<String>,
    pub lawyer_name: Option<String>,
    pub advocate_address: Option<String>,
    pub advocate_city: Option<String>,
    pub advocate_phone: Option<String>,
    pub advocate_email: Option<String>,
    pub lawyer_signature_base64: Option<String>,
    pub advocate_signature: Option<String>,
    pub advocate_address_lines: [Option<String>; 3],

    // Petition
    pub accused: Option<Vec<PersonRecord>>,
    pub respondent_name: Option<String>,
    pub respondent_address: Option<String>,
    pub respondent_station: Option<String>,
    pub section_number: Option<String>,
    /// Raw `petitionPoints` array; non-string elements are `None`.
    pub petition_points: Option<Vec<Option<String>>>,
    pub points: [Option<String>; 4],
    pub prayer: Option<String>,
    pub place: Option<String>,
    pub hearing_date: Option<String>,
    pub court_full_name: Option<String>,
    /// Only an explicit JSON `false` is recorded.
    pub address_section: Option<bool>,

    // Vakalathnama
    pub defendants: Option<Vec<PersonRecord>>,
    pub tribunal_location: Option<String>,
    pub oa_number: Option<String>,
    pub oa_year: Option<String>,
    pub applicant_name: Option<String>,
    pub applicant_branch: Option<String>,
    pub applicant_address: Option<String>,
    pub advocates: Option<Vec<AdvocateEntry>>,
    pub advocate_name_1: Option<String>,
    pub advocate_enrollment_1: Option<String>,
    pub advocates_list: Option<String>,
    pub vakalathnama_signature: Option<String>,
}

impl FormData {
    /// Build from any JSON value. Non-objects yield an empty record.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    fn from_map(m: &Map<String, Value>) -> Self {
        let t = |key: &str| text(m.get(key));
        Self {
            case_number: case_number_primary(m),
            case_number_fallback: m
                .get("case_number")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),

            court_name: t("courtName"),
            execution_day: t("executionDay"),
            execution_month: t("executionMonth"),
            execution_year: t("executionYear"),
            advocate_name: t("advocateName"),
            lawyer_name: t("lawyerName"),
            advocate_address: t("advocateAddress"),
            advocate_city: t("advocateCity"),
            advocate_phone: t("advocatePhone"),
            advocate_email: t("advocateEmail"),
            lawyer_signature_base64: t("lawyerSignatureBase64"),
            advocate_signature: t("advocateSignature"),
            advocate_address_lines: [
                t("advocateAddressLine1"),
                t("advocateAddressLine2"),
                t("advocateAddressLine3"),
            ],

            accused: persons(m.get("accused")),
            respondent_name: t("respondentName"),
            respondent_address: t("respondentAddress"),
            respondent_station: t("respondentStation"),
            section_number: t("sectionNumber"),
            petition_points: m.get("petitionPoints").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect()
            }),
            points: [t("point1"), t("point2"), t("point3"), t("point4")],
            prayer: t("prayer"),
            place: t("place"),
            hearing_date: t("hearingDate"),
            court_full_name: t("courtFullName"),
            address_section: match m.get("addressSection") {
                Some(Value::Bool(false)) => Some(false),
                _ => None,
            },

            defendants: persons(m.get("defendants")),
            tribunal_location: t("tribunalLocation"),
            oa_number: t("oaNumber"),
            oa_year: t("oaYear"),
            applicant_name: t("applicantName"),
            applicant_branch: t("applicantBranch"),
            applicant_address: t("applicantAddress"),
            advocates: m.get("advocates").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .map(|v| AdvocateEntry {
                        name: v.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
                        enrollment_number: v
                            .get("enrollmentNumber")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            }),
            advocate_name_1: t("advocateName1"),
            advocate_enrollment_1: t("advocateEnrollment1"),
            advocates_list: t("advocatesList"),
            vakalathnama_signature: t("vakalathnamaSignature"),
        }
    }

    /// Primary case identifier, if any.
    pub fn case_number(&self) -> Option<&str> {
        self.case_number.as_deref()
    }
}

impl From<Value> for FormData {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl PersonRecord {
    fn from_json(value: &Value) -> Self {
        let t = |key: &str| text(value.get(key));
        Self {
            name: t("name").or_else(|| t("AccusedName")),
            designation: t("designation"),
            signature: t("signature"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Truthy text: non-empty strings and non-zero numbers.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        _ => None,
    }
}

/// Decimal text of a JSON number. Floats with no fractional part print as
/// integers (`15.0` and `1e2` become `"15"` and `"100"`).
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// JavaScript-style truthiness, used where the first truthy key wins even if
/// it then turns out to have the wrong type.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The first truthy of `caseNumber` / `SCNo`. A truthy non-string (e.g. a bare
/// number) blocks the later key and yields `None`, which sends the formatter
/// to the `case_number` fallback.
fn case_number_primary(m: &Map<String, Value>) -> Option<String> {
    ["caseNumber", "SCNo"]
        .iter()
        .filter_map(|key| m.get(*key))
        .find(|v| truthy(v))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn persons(value: Option<&Value>) -> Option<Vec<PersonRecord>> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(PersonRecord::from_json).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
