use std::str::FromStr;

use nutrisite_core::recommend::{recommend, ActivityLevel, Recommendation};
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct RecommendOutput {
    command: &'static str,
    status: &'static str,
    age: u32,
    activity: ActivityLevel,
    #[serde(flatten)]
    recommendation: Recommendation,
}

pub fn run(age: Option<u32>, activity: Option<&str>) -> CommandResult {
    let activity = match activity.map(ActivityLevel::from_str).transpose() {
        Ok(activity) => activity,
        Err(error) => return CommandResult::failure("recommend", "invalid_input", error.to_string(), 2),
    };

    let output = RecommendOutput {
        command: "recommend",
        status: "ok",
        age: age.unwrap_or(25),
        activity: activity.unwrap_or_default(),
        recommendation: recommend(age, activity),
    };
    CommandResult::from_payload("recommend", &output)
}
