//! Human-readable safety report.

use crate::models::{SafetyVerdict, Severity};

pub fn format_safety_report(verdict: &SafetyVerdict) -> String {
    let mut report = Vec::new();

    if verdict.is_safe {
        report.push("ROUTE STATUS: SAFE".to_string());
        report.push("\nNo hazards detected along this route.".to_string());
    } else {
        let label = match verdict.severity {
            Severity::High => "[!!]",
            Severity::Medium => "[!]",
            _ => "[i]",
        };
        report.push(format!(
            "{} ROUTE STATUS: {} RISK",
            label,
            verdict.severity.as_str().to_uppercase()
        ));
        report.push(format!(
            "\n{} hazard(s) detected along this route.",
            verdict.total_hazards
        ));

        if !verdict.hazards_detected.is_empty() {
            report.push("\n\nDetected Hazards:".to_string());
        }
        for (i, hazard) in verdict.hazards_detected.iter().enumerate() {
            report.push(format!("\n{}. {}", i + 1, hazard.name));
            report.push(format!("   - Type: {}", hazard.hazard_type.title()));
            report.push(format!(
                "   - Severity: {}",
                hazard.severity.as_str().to_uppercase()
            ));
            report.push(format!("   - Description: {}", hazard.description));
            report.push(format!(
                "   - Route affected: {:.1}%",
                hazard.percentage_affected
            ));
            report.push(format!(
                "   - Incidents reported: {}",
                hazard.reported_incidents
            ));
        }
    }

    report.push(format!("\n\nRecommendations:\n{}", verdict.recommendation));

    if verdict.rerouted {
        report.push(
            "\n\nThis route has been automatically rerouted to avoid high-risk areas.".to_string(),
        );
    }

    report.join("\n")
}
