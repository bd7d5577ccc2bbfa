use std::time::Instant;

use nutrisite_assistant::rules::{matched_topic, respond, FALLBACK_REPLY};
use nutrisite_core::availability::{check_availability, AvailabilityOutcome};
use nutrisite_core::carousel::{Carousel, SwipeGesture, SwipeOutcome};
use nutrisite_core::config::{LoadOptions, SiteConfig};
use nutrisite_core::recommend::{recommend, ActivityLevel};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SmokeStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: SmokeStatus,
    elapsed_ms: u64,
    message: String,
}

#[derive(Debug, Serialize)]
struct SmokeReport {
    command: &'static str,
    status: SmokeStatus,
    summary: String,
    total_elapsed_ms: u64,
    checks: Vec<SmokeCheck>,
}

pub fn run() -> CommandResult {
    let started = Instant::now();
    let mut checks = Vec::new();

    let config = match timed_check(|| SiteConfig::load(LoadOptions::default())) {
        Ok((elapsed_ms, config)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Pass,
                elapsed_ms,
                message: "configuration loaded and validated".to_string(),
            });
            config
        }
        Err((elapsed_ms, error)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Fail,
                elapsed_ms,
                message: error.to_string(),
            });
            checks.push(skipped("carousel_invariants"));
            checks.push(skipped("responder_rules"));
            checks.push(skipped("recommendation_fixtures"));
            checks.push(skipped("availability_simulation"));
            return finalize_report(checks, started.elapsed().as_millis() as u64);
        }
    };

    checks.push(run_check("carousel_invariants", || carousel_invariants(&config)));
    checks.push(run_check("responder_rules", responder_rules));
    checks.push(run_check("recommendation_fixtures", recommendation_fixtures));
    checks.push(run_check("availability_simulation", availability_simulation));

    finalize_report(checks, started.elapsed().as_millis() as u64)
}

fn carousel_invariants(config: &SiteConfig) -> Result<String, String> {
    let mut carousel = Carousel::new(config.carousel.slide_count);
    let count = carousel.slide_count();

    let frame = carousel.go_to(count + 1);
    if frame.active_slide != 1 {
        return Err(format!("wrap failed: go_to({}) landed on {}", count + 1, frame.active_slide));
    }
    let frame = carousel.go_to(count - 1);
    if carousel.advance().active_slide != 0 {
        return Err("advance from the last slide must wrap to 0".to_string());
    }
    if frame.slide_active.iter().filter(|on| **on).count() != 1 {
        return Err("exactly one slide must be active".to_string());
    }

    let threshold = config.carousel.swipe_threshold_px;
    let ignored = Carousel::classify_swipe(
        SwipeGesture { start_x: 0.0, end_x: threshold },
        threshold,
    );
    if ignored != SwipeOutcome::Ignored {
        return Err("threshold-distance swipe must be ignored".to_string());
    }

    Ok(format!("wrap and swipe invariants hold for {count} slides"))
}

fn responder_rules() -> Result<String, String> {
    if respond("no rule matches xyzzy") != FALLBACK_REPLY {
        return Err("unmatched input must fall back".to_string());
    }
    if matched_topic("a protein recipe") != Some("protein") {
        return Err("earlier rules must win over later ones".to_string());
    }
    if matched_topic("TELL ME ABOUT OMEGA") != Some("omega") {
        return Err("matching must be case-insensitive".to_string());
    }
    Ok("fallback, priority, and case handling verified".to_string())
}

fn recommendation_fixtures() -> Result<String, String> {
    let adult = recommend(Some(30), Some(ActivityLevel::Moderate));
    if adult.needs.protein_g != 55 || adult.servings != 5 || adult.coverage_percent != 22 {
        return Err(format!(
            "adult/moderate fixture mismatch: {}g, {} servings, {}%",
            adult.needs.protein_g, adult.servings, adult.coverage_percent
        ));
    }

    let defaulted = recommend(None, None);
    if defaulted != adult {
        return Err("omitted inputs must behave like age 25 / moderate".to_string());
    }

    Ok("recommendation fixtures match the lookup table".to_string())
}

fn availability_simulation() -> Result<String, String> {
    let mut rng = StdRng::seed_from_u64(7);
    match check_availability("560001", &mut rng) {
        AvailabilityOutcome::Available { platforms, .. } => {
            if !(6..=8).contains(&platforms.len()) {
                return Err(format!("expected 6-8 platforms, got {}", platforms.len()));
            }
        }
        AvailabilityOutcome::InvalidPincode { .. } => {
            return Err("valid pincode must not be rejected".to_string());
        }
    }

    if !matches!(
        check_availability("12345", &mut rng),
        AvailabilityOutcome::InvalidPincode { .. }
    ) {
        return Err("5-digit pincode must be rejected".to_string());
    }

    Ok("seeded lookup produces a valid platform subset".to_string())
}

fn run_check(
    name: &'static str,
    check: impl FnOnce() -> Result<String, String>,
) -> SmokeCheck {
    let started = Instant::now();
    match check() {
        Ok(message) => SmokeCheck {
            name,
            status: SmokeStatus::Pass,
            elapsed_ms: started.elapsed().as_millis() as u64,
            message,
        },
        Err(message) => SmokeCheck {
            name,
            status: SmokeStatus::Fail,
            elapsed_ms: started.elapsed().as_millis() as u64,
            message,
        },
    }
}

fn timed_check<T, E>(check: impl FnOnce() -> Result<T, E>) -> Result<(u64, T), (u64, E)> {
    let started = Instant::now();
    match check() {
        Ok(value) => Ok((started.elapsed().as_millis() as u64, value)),
        Err(error) => Err((started.elapsed().as_millis() as u64, error)),
    }
}

fn skipped(name: &'static str) -> SmokeCheck {
    SmokeCheck {
        name,
        status: SmokeStatus::Skipped,
        elapsed_ms: 0,
        message: "skipped due previous failure".to_string(),
    }
}

fn finalize_report(checks: Vec<SmokeCheck>, total_elapsed_ms: u64) -> CommandResult {
    let passed = checks.iter().filter(|check| check.status == SmokeStatus::Pass).count();
    let total = checks.len();
    let failed = checks.iter().any(|check| check.status == SmokeStatus::Fail);

    let report = SmokeReport {
        command: "smoke",
        status: if failed { SmokeStatus::Fail } else { SmokeStatus::Pass },
        summary: format!("smoke: {passed}/{total} checks passed in {total_elapsed_ms}ms"),
        total_elapsed_ms,
        checks,
    };

    let human = report.summary.clone();
    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"smoke\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: if failed { 6 } else { 0 }, output: format!("{human}\n{machine}") }
}
