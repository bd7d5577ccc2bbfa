use nutrisite_assistant::rules::{matched_topic, respond};
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct RespondOutput {
    command: &'static str,
    status: &'static str,
    topic: Option<&'static str>,
    reply: &'static str,
}

pub fn run(text: &str) -> CommandResult {
    let output = RespondOutput {
        command: "respond",
        status: "ok",
        topic: matched_topic(text),
        reply: respond(text),
    };
    CommandResult::from_payload("respond", &output)
}

#[cfg(test)]
mod tests {
    #[test]
    fn emits_topic_and_reply_as_json() {
        let result = super::run("how much protein per serving?");
        assert_eq!(result.exit_code, 0);
        let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(value["topic"], "protein");
        assert!(value["reply"].as_str().unwrap().contains("12g"));
    }

    #[test]
    fn fallback_has_a_null_topic() {
        let result = super::run("xyzzy");
        let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert!(value["topic"].is_null());
    }
}
