use nutrisite_core::availability::{check_availability, AvailabilityOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct AvailabilityOutput {
    command: &'static str,
    #[serde(flatten)]
    outcome: AvailabilityOutcome,
}

pub fn run(pincode: &str, seed: Option<u64>) -> CommandResult {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let output = AvailabilityOutput {
        command: "availability",
        outcome: check_availability(pincode, &mut rng),
    };
    CommandResult::from_payload("availability", &output)
}

#[cfg(test)]
mod tests {
    #[test]
    fn seeded_lookup_is_reproducible() {
        let first = super::run("560001", Some(7));
        let second = super::run("560001", Some(7));
        assert_eq!(first.output, second.output);

        let value: serde_json::Value = serde_json::from_str(&first.output).unwrap();
        assert_eq!(value["status"], "available");
        let platforms = value["platforms"].as_array().unwrap();
        assert!((6..=8).contains(&platforms.len()));
    }

    #[test]
    fn malformed_pincode_reports_the_validation_message() {
        let result = super::run("12ab6", Some(1));
        assert_eq!(result.exit_code, 0);
        let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(value["status"], "invalid_pincode");
        assert_eq!(value["message"], "Please enter a valid 6-digit pincode.");
    }
}
