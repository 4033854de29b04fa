//! Fixed inputs used across harnesses.

use chrono::NaiveDate;
use serde_json::{json, Value};

/// The date every harness treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid fixture date")
}

/// A fully filled-in form for the section 355 petition.
pub fn petition_form() -> Value {
    json!({
        "caseNumber": "SC0002",
        "courtName": "TIRUPPUR",
        "accused": [
            {"name": "John Doe"},
            {"AccusedName": "Ravi Kumar", "designation": "A3"},
        ],
        "respondentStation": "AVINASHI POLICE STATION,",
        "petitionPoints": [
            "The petitioners are innocent.",
            "",
            "They were not present at the scene.",
        ],
        "prayer": "to dispense with the appearance of the petitioners",
        "advocateName": "R. Selvam",
        "advocatePhone": "98430 12345",
        "hearingDate": "14/03/2025",
    })
}

/// A fully filled-in form for the vakalathnama.
pub fn vakalathnama_form() -> Value {
    json!({
        "SCNo": "S.C.No. 12 of 2024",
        "tribunalLocation": "CHENNAI",
        "oaNumber": 77,
        "oaYear": "2024",
        "applicantName": "CANARA BANK",
        "defendants": [
            {"name": "M. Arun", "signature": "data:image/png;base64,AAAA"},
            {"name": "K. Priya"},
            {},
        ],
        "advocates": [
            {"name": "A. Ali", "enrollmentNumber": "MS.1/2020"},
            {"name": "B. Bose", "enrollmentNumber": "MS.2/2021"},
        ],
        "executionDay": "3",
        "executionMonth": "February",
        "executionYear": "2025",
    })
}

/// Shapes a client might send that carry no usable data at all.
pub fn degenerate_forms() -> Vec<Value> {
    vec![
        json!(null),
        json!({}),
        json!([]),
        json!("form"),
        json!(42),
        json!({"accused": null, "defendants": "nobody", "petitionPoints": {}}),
        json!({"accused": [null, 3, "x"], "advocates": [null]}),
        json!({"caseNumber": 0, "SCNo": false, "case_number": ""}),
    ]
}
