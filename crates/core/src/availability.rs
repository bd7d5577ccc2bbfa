//! Simulated delivery availability lookup.
//!
//! There is no real inventory API behind the storefront; a well-formed
//! pincode always comes back "available" on a pseudo-random 6-8 platform
//! subset. The RNG is passed in so callers (and tests) control determinism.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Platforms the product is listed on, in display order.
pub const PLATFORMS: [&str; 8] = [
    "Blinkit",
    "Zepto",
    "Swiggy Instamart",
    "BigBasket",
    "Amazon",
    "Flipkart",
    "Apollo Pharmacy",
    "Netmeds",
];

pub const INVALID_PINCODE_MESSAGE: &str = "Please enter a valid 6-digit pincode.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvailabilityOutcome {
    Available { pincode: String, platforms: Vec<String> },
    /// Display branch, not an error: the panel shows this message inline.
    InvalidPincode { message: String },
}

fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.bytes().all(|byte| byte.is_ascii_digit())
}

/// Run the simulated lookup. Valid input yields a prefix of [`PLATFORMS`]
/// between 6 and 8 entries long, so the result is duplicate-free by
/// construction.
pub fn check_availability<R: Rng>(pincode: &str, rng: &mut R) -> AvailabilityOutcome {
    let pincode = pincode.trim();
    if !is_valid_pincode(pincode) {
        return AvailabilityOutcome::InvalidPincode {
            message: INVALID_PINCODE_MESSAGE.to_string(),
        };
    }

    let count = rng.gen_range(6..=8);
    AvailabilityOutcome::Available {
        pincode: pincode.to_string(),
        platforms: PLATFORMS[..count].iter().map(|name| (*name).to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{check_availability, AvailabilityOutcome, INVALID_PINCODE_MESSAGE, PLATFORMS};

    #[test]
    fn malformed_pincodes_always_get_the_validation_message() {
        let mut rng = StdRng::seed_from_u64(7);
        for pincode in ["", "12345", "1234567", "12a456", "12 456", "-12345"] {
            let outcome = check_availability(pincode, &mut rng);
            assert_eq!(
                outcome,
                AvailabilityOutcome::InvalidPincode {
                    message: INVALID_PINCODE_MESSAGE.to_string()
                },
                "pincode `{pincode}` must be rejected"
            );
        }
    }

    #[test]
    fn valid_pincode_yields_six_to_eight_unique_platforms() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            match check_availability("560001", &mut rng) {
                AvailabilityOutcome::Available { pincode, platforms } => {
                    assert_eq!(pincode, "560001");
                    assert!((6..=8).contains(&platforms.len()));
                    let unique: HashSet<&String> = platforms.iter().collect();
                    assert_eq!(unique.len(), platforms.len());
                    for platform in &platforms {
                        assert!(PLATFORMS.contains(&platform.as_str()));
                    }
                }
                AvailabilityOutcome::InvalidPincode { .. } => {
                    panic!("valid pincode must never hit the validation branch")
                }
            }
        }
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            check_availability(" 110001 ", &mut rng),
            AvailabilityOutcome::Available { .. }
        ));
    }

    #[test]
    fn same_seed_gives_same_subset() {
        let first = check_availability("400050", &mut StdRng::seed_from_u64(9));
        let second = check_availability("400050", &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
