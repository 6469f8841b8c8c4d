use serde::Serialize;

use crate::batch::{AddressDetail, BatchReport};
use crate::checker::CheckResult;

/// Everything printed by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub breached: &'a [String],
    pub pasted: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a [AddressDetail]>,
}

/// Text summary for a list run.
pub fn format_list_report(report: &BatchReport) -> String {
    let mut out = String::new();
    if report.is_empty() {
        out.push_str("No affected addresses found.\n");
        return out;
    }

    if !report.breached.is_empty() {
        out.push_str("\nEmails with a breach:\n");
        for address in &report.breached {
            out.push_str(&format!("{}\n", address));
        }
    }
    if !report.pasted.is_empty() {
        out.push_str("\nEmails in a paste:\n");
        for address in &report.pasted {
            out.push_str(&format!("{}\n", address));
        }
    }
    out
}

/// Text summary for a single-address run.
pub fn format_single_report(result: &CheckResult) -> String {
    let mut lines = Vec::new();
    if result.is_breached() {
        let names: Vec<&str> = result.breaches.iter().map(|b| b.name.as_str()).collect();
        lines.push(format!("Email in a breach ({})", names.join(", ")));
    }
    if result.is_pasted() {
        lines.push("Email in a paste".to_string());
    }
    if lines.is_empty() {
        lines.push("Email not found in any breach or paste".to_string());
    }
    lines.join("\n") + "\n"
}

/// Pretty JSON dump of the enrichment pass.
pub fn format_details(details: &[AddressDetail]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(details)
}

pub fn format_json(report: &BatchReport, details: Option<&[AddressDetail]>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        breached: &report.breached,
        pasted: &report.pasted,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::BreachRecord;

    fn breach(name: &str) -> BreachRecord {
        serde_json::from_value(serde_json::json!({ "Name": name })).unwrap()
    }

    #[test]
    fn list_report_omits_empty_sections() {
        let report = BatchReport {
            breached: vec!["a@x.com".into(), "c@x.com".into()],
            pasted: Vec::new(),
        };
        let text = format_list_report(&report);
        assert!(text.contains("Emails with a breach:\na@x.com\nc@x.com\n"));
        assert!(!text.contains("paste"));
    }

    #[test]
    fn empty_list_report_says_so() {
        assert_eq!(format_list_report(&BatchReport::default()), "No affected addresses found.\n");
    }

    #[test]
    fn single_report_names_breaches() {
        let result = CheckResult {
            address: "a@x.com".into(),
            breaches: vec![breach("Adobe"), breach("LinkedIn")],
            pastes: Some(Vec::new()),
        };
        assert_eq!(format_single_report(&result), "Email in a breach (Adobe, LinkedIn)\n");

        let clean = CheckResult {
            address: "b@x.com".into(),
            ..Default::default()
        };
        assert_eq!(format_single_report(&clean), "Email not found in any breach or paste\n");
    }

    #[test]
    fn json_report_includes_details_only_when_present() {
        let report = BatchReport {
            breached: vec!["a@x.com".into()],
            pasted: Vec::new(),
        };
        let plain: serde_json::Value = serde_json::from_str(&format_json(&report, None).unwrap()).unwrap();
        assert!(plain.get("details").is_none());

        let details = vec![AddressDetail {
            address: "a@x.com".into(),
            breaches: vec![breach("Adobe")],
        }];
        let full: serde_json::Value = serde_json::from_str(&format_json(&report, Some(&details)).unwrap()).unwrap();
        assert_eq!(full["details"][0]["breaches"][0]["Name"], "Adobe");
    }
}
