//! Product catalog and the learn-more modal lifecycle.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductVariant {
    Paste,
    Powder,
    Mix,
}

impl ProductVariant {
    pub const ALL: [Self; 3] = [Self::Paste, Self::Powder, Self::Mix];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Paste => "paste",
            Self::Powder => "powder",
            Self::Mix => "mix",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "paste" => Some(Self::Paste),
            // The storefront labels the powder pack "Mixture".
            "powder" | "mixture" => Some(Self::Powder),
            "mix" => Some(Self::Mix),
            _ => None,
        }
    }

    pub fn details(self) -> ProductDetails {
        match self {
            Self::Paste => ProductDetails {
                variant: self,
                title: "Saffola Nutripower Paste",
                description: "Perfect spreadable consistency for breads, rotis, and morning \
                              meals. Rich in healthy fats and natural nutrition from premium \
                              dry fruits.",
                features: &[
                    "Smooth texture perfect for spreading",
                    "Rich source of healthy fats from nuts",
                    "Great for breakfast and snacks",
                    "No artificial preservatives",
                    "Family-friendly portion size (400g)",
                ],
                usage: &[
                    "Spread on bread, roti, or crackers",
                    "Mix with warm water for instant drink",
                    "Add to smoothies for extra nutrition",
                    "Use in baking recipes",
                ],
            },
            Self::Powder => ProductDetails {
                variant: self,
                title: "Saffola Nutripower Mixture",
                description: "Premium powder blend that mixes instantly with milk, water, or \
                              smoothies. High protein content (12g per serving) for active \
                              lifestyles.",
                features: &[
                    "Instant mixing formula",
                    "12g protein per serving",
                    "Easy to digest",
                    "Versatile usage options",
                    "Concentrated nutrition (200g pack)",
                ],
                usage: &[
                    "Mix with milk for protein drink",
                    "Add to smoothies and shakes",
                    "Sprinkle on cereals and yogurt",
                    "Use in healthy baking",
                ],
            },
            Self::Mix => ProductDetails {
                variant: self,
                title: "Saffola Nutripower Dry Fruit Mix",
                description: "Ready-to-eat crunchy blend perfect for snacking. Natural energy \
                              boost with premium quality dry fruits and nuts.",
                features: &[
                    "Ready to eat convenience",
                    "Crunchy satisfying texture",
                    "Portable snacking option (150g)",
                    "Natural energy source",
                    "Premium quality ingredients",
                ],
                usage: &[
                    "Direct snacking anytime",
                    "Add to trail mixes",
                    "Top for yogurt and cereals",
                    "Office and travel snacking",
                ],
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    pub variant: ProductVariant,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub usage: &'static [&'static str],
}

/// Learn-more modal state. At most one modal is open at a time; opening a
/// different variant replaces the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ProductVariant),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    LearnMore(ProductVariant),
    ClosePressed,
    BackdropPressed,
    EscapePressed,
    /// Clicks inside the modal content bubble up but must not dismiss it.
    ContentPressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalOutcome {
    pub state: ModalState,
    /// Background scroll is locked exactly while a modal is open.
    pub scroll_locked: bool,
    pub changed: bool,
}

impl ModalState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn apply(self, event: ModalEvent) -> ModalOutcome {
        let next = match (self, event) {
            (_, ModalEvent::LearnMore(variant)) => Self::Open(variant),
            (Self::Open(_), ModalEvent::ClosePressed)
            | (Self::Open(_), ModalEvent::BackdropPressed)
            | (Self::Open(_), ModalEvent::EscapePressed) => Self::Closed,
            (state, _) => state,
        };
        ModalOutcome { state: next, scroll_locked: next.is_open(), changed: next != self }
    }
}
