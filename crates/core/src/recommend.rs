//! Nutrition recommendation calculator.
//!
//! Pure functions over a fixed age-band x activity lookup table. Malformed
//! inputs fall back to defaults (age 25, moderate activity) rather than
//! failing, so the calculator is total.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductVariant;
use crate::config::ConfigError;

/// Grams of protein in one serving, constant across all three variants.
pub const PROTEIN_PER_SERVING_G: u32 = 12;

pub const DEFAULT_AGE: u32 = 25;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl std::str::FromStr for ActivityLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            other => Err(ConfigError::Validation(format!(
                "unsupported activity level `{other}` (expected low|moderate|high)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Under18,
    Adult18To49,
    Senior50Plus,
}

impl AgeBand {
    pub fn for_age(age: u32) -> Self {
        if age < 18 {
            Self::Under18
        } else if age < 50 {
            Self::Adult18To49
        } else {
            Self::Senior50Plus
        }
    }
}

/// Daily protein and calorie targets for one age band + activity cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNeeds {
    pub protein_g: u32,
    pub calories: u32,
}

impl DailyNeeds {
    /// Fixed lookup table. Activity is ignored for the under-18 band.
    pub fn lookup(band: AgeBand, activity: ActivityLevel) -> Self {
        use ActivityLevel::{High, Low, Moderate};
        match (band, activity) {
            (AgeBand::Under18, _) => Self { protein_g: 45, calories: 2_000 },
            (AgeBand::Adult18To49, Low) => Self { protein_g: 50, calories: 2_000 },
            (AgeBand::Adult18To49, Moderate) => Self { protein_g: 55, calories: 2_200 },
            (AgeBand::Adult18To49, High) => Self { protein_g: 65, calories: 2_400 },
            (AgeBand::Senior50Plus, Low) => Self { protein_g: 45, calories: 1_800 },
            (AgeBand::Senior50Plus, Moderate) => Self { protein_g: 50, calories: 2_000 },
            (AgeBand::Senior50Plus, High) => Self { protein_g: 60, calories: 2_200 },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub needs: DailyNeeds,
    pub servings: u32,
    pub coverage_percent: u32,
    pub ideal_variant: ProductVariant,
    pub best_times: &'static str,
}

/// Compute the calculator panel output. `None` inputs (absent or unparsable
/// form fields) take the documented defaults.
pub fn recommend(age: Option<u32>, activity: Option<ActivityLevel>) -> Recommendation {
    let age = age.unwrap_or(DEFAULT_AGE);
    let activity = activity.unwrap_or_default();
    let needs = DailyNeeds::lookup(AgeBand::for_age(age), activity);

    let servings = needs.protein_g.div_ceil(PROTEIN_PER_SERVING_G);
    // Round half away from zero, matching the site's Math.round on a
    // positive ratio.
    let coverage_percent =
        (f64::from(PROTEIN_PER_SERVING_G) / f64::from(needs.protein_g) * 100.0).round() as u32;

    let ideal_variant = if activity == ActivityLevel::High {
        ProductVariant::Powder
    } else if age < 18 {
        ProductVariant::Paste
    } else {
        ProductVariant::Mix
    };

    Recommendation {
        needs,
        servings,
        coverage_percent,
        ideal_variant,
        best_times: "Breakfast & Evening",
    }
}
