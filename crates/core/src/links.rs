//! Outbound search links for the quick-commerce platforms.
//!
//! Pure passthrough: the core builds the URL, the page surface opens it in
//! a new browsing context.

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SEARCH_QUERY: &str = "saffola nutripower";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPlatform {
    Blinkit,
    Zepto,
    SwiggyInstamart,
    BigBasket,
}

impl DeliveryPlatform {
    pub const ALL: [Self; 4] =
        [Self::Blinkit, Self::Zepto, Self::SwiggyInstamart, Self::BigBasket];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Blinkit => "Blinkit",
            Self::Zepto => "Zepto",
            Self::SwiggyInstamart => "Swiggy Instamart",
            Self::BigBasket => "BigBasket",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "blinkit" => Some(Self::Blinkit),
            "zepto" => Some(Self::Zepto),
            "instamart" | "swiggy instamart" | "swiggy-instamart" => Some(Self::SwiggyInstamart),
            "bigbasket" => Some(Self::BigBasket),
            _ => None,
        }
    }

    /// Build the platform's product-search URL for `query`.
    pub fn search_url(self, query: &str) -> Url {
        let (base, param) = match self {
            Self::Blinkit => ("https://blinkit.com/s/", "q"),
            Self::Zepto => ("https://www.zeptonow.com/search", "query"),
            Self::SwiggyInstamart => ("https://www.swiggy.com/instamart/search", "query"),
            Self::BigBasket => ("https://www.bigbasket.com/ps/", "q"),
        };

        let mut url = Url::parse(base).expect("platform base URLs are valid");
        {
            let mut pairs = url.query_pairs_mut();
            if self == Self::SwiggyInstamart {
                pairs.append_pair("custom_back", "true");
            }
            pairs.append_pair(param, query);
        }
        url
    }
}
