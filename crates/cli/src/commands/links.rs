use nutrisite_core::links::{DeliveryPlatform, DEFAULT_SEARCH_QUERY};
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct PlatformLink {
    platform: &'static str,
    url: String,
}

#[derive(Debug, Serialize)]
struct LinksOutput {
    command: &'static str,
    status: &'static str,
    query: String,
    links: Vec<PlatformLink>,
}

pub fn run(platform: Option<&str>, query: Option<&str>) -> CommandResult {
    let query = query.unwrap_or(DEFAULT_SEARCH_QUERY);

    let platforms: Vec<DeliveryPlatform> = match platform {
        Some(name) => match DeliveryPlatform::from_name(name) {
            Some(platform) => vec![platform],
            None => {
                return CommandResult::failure(
                    "links",
                    "invalid_input",
                    format!("unknown platform `{name}`"),
                    2,
                )
            }
        },
        None => DeliveryPlatform::ALL.to_vec(),
    };

    let links = platforms
        .into_iter()
        .map(|platform| PlatformLink {
            platform: platform.display_name(),
            url: platform.search_url(query).to_string(),
        })
        .collect();

    let output = LinksOutput { command: "links", status: "ok", query: query.to_string(), links };
    CommandResult::from_payload("links", &output)
}

#[cfg(test)]
mod tests {
    #[test]
    fn lists_all_four_platforms_by_default() {
        let result = super::run(None, None);
        let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        let links = value["links"].as_array().unwrap();
        assert_eq!(links.len(), 4);
        assert_eq!(links[0]["platform"], "Blinkit");
        assert_eq!(links[0]["url"], "https://blinkit.com/s/?q=saffola+nutripower");
    }

    #[test]
    fn filters_to_a_single_platform() {
        let result = super::run(Some("zepto"), Some("almond mix"));
        let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        let links = value["links"].as_array().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0]["url"], "https://www.zeptonow.com/search?query=almond+mix");
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let result = super::run(Some("dunzo"), None);
        assert_eq!(result.exit_code, 2);
    }
}
