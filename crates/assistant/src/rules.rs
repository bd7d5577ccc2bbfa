//! The ordered keyword rule table.
//!
//! Rule order is the priority order: the first rule with any trigger
//! substring present in the lowercased input wins, so a message mentioning
//! both "protein" and "recipe" gets the protein answer. The table is static
//! and total - unmatched input falls through to [`FALLBACK_REPLY`].

/// One (trigger set, canned reply) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseRule {
    /// Stable identifier used for tracking and tests.
    pub topic: &'static str,
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

pub const FALLBACK_REPLY: &str = "That's a great question! Nutripower provides complete \
    nutrition with premium dry fruits. For specific health advice, consult a nutritionist. \
    Would you like to know about our products, recipes, or nutritional benefits?";

/// Evaluated top to bottom; do not reorder without revisiting the
/// priority-sensitive tests.
pub const RULES: &[ResponseRule] = &[
    ResponseRule {
        topic: "greeting",
        triggers: &["hello", "hi", "hey"],
        reply: "Hello! I'm your Saffola Nutripower nutrition expert. I can help you with \
                product information, recipes, and nutrition advice. What would you like to know?",
    },
    ResponseRule {
        topic: "product_paste",
        triggers: &["paste"],
        reply: "Nutripower Paste is perfect for spreading on bread and rotis! It's smooth, \
                rich in healthy fats, and great for family breakfasts. Would you like to know \
                about its nutritional benefits?",
    },
    ResponseRule {
        topic: "product_powder",
        triggers: &["powder", "mixture"],
        reply: "Nutripower Powder is our most popular variant! Mix it with milk for a \
                protein-rich drink (12g per serving). It's perfect for smoothies, shakes, and \
                active lifestyles.",
    },
    ResponseRule {
        topic: "product_mix",
        triggers: &["mix", "snack"],
        reply: "Nutripower Mix is ready-to-eat and perfect for snacking! Crunchy, portable, \
                and gives you natural energy. Great for office, travel, or anytime snacking.",
    },
    ResponseRule {
        topic: "protein",
        triggers: &["protein"],
        reply: "All Nutripower variants provide 12g of high-quality protein per serving! This \
                covers about 20-25% of your daily protein needs and helps with muscle health \
                and satiety.",
    },
    ResponseRule {
        topic: "benefits",
        triggers: &["benefits", "nutrition"],
        reply: "Nutripower is rich in Omega-3 fatty acids, high protein (12g), natural fiber, \
                essential minerals, and antioxidants. Plus, it has zero preservatives - just \
                pure natural nutrition!",
    },
    ResponseRule {
        topic: "omega",
        triggers: &["omega"],
        reply: "Yes! Nutripower is rich in Omega-3 from walnuts and almonds. These support \
                brain health, improve cognitive function, and are great for heart health too.",
    },
    ResponseRule {
        topic: "recipes",
        triggers: &["recipe", "cook"],
        reply: "I have lots of recipe ideas! Try energy ladoos, smoothie bowls, protein \
                pancakes, or healthy cookies. Check our recipes section for step-by-step ideas!",
    },
    ResponseRule {
        topic: "breakfast",
        triggers: &["breakfast"],
        reply: "For breakfast, try: Nutripower smoothie bowl, protein pancakes, overnight \
                oats with paste, or simply mix powder with milk. All are quick, nutritious, \
                and delicious!",
    },
    ResponseRule {
        topic: "usage",
        triggers: &["how to use", "serving"],
        reply: "Use 20-30g (2-3 tbsp) per serving. Paste: spread on bread/roti. Powder: mix \
                with 200ml milk. Mix: eat directly or add to yogurt/cereals. Start with \
                smaller amounts for children.",
    },
    ResponseRule {
        topic: "children",
        triggers: &["children", "kids"],
        reply: "Nutripower is perfect for growing children! Start with 1-2 tbsp servings. The \
                paste is great for picky eaters, and powder makes milk more appealing. All \
                variants support healthy growth.",
    },
    ResponseRule {
        topic: "purchase",
        triggers: &["buy", "where", "price"],
        reply: "You can buy Nutripower on Blinkit, Zepto, Swiggy Instamart, BigBasket for \
                quick delivery. Also available on Amazon, Flipkart, and top pharmacies. \
                Available in 3 convenient variants!",
    },
    ResponseRule {
        topic: "weight",
        triggers: &["weight loss", "diet"],
        reply: "Nutripower supports weight management with high protein (increases satiety) \
                and healthy fats. Use powder in smoothies, paste instead of regular spreads, \
                or mix as a healthy snack.",
    },
    ResponseRule {
        topic: "diabetes",
        triggers: &["diabetes", "sugar"],
        reply: "Nutripower has no added sugars - sweetness comes naturally from dates. \
                However, for diabetes management, please consult your doctor about portion \
                sizes and how it fits your meal plan.",
    },
    ResponseRule {
        topic: "seniors",
        triggers: &["elderly", "senior"],
        reply: "Great for seniors! Easy to digest, provides essential nutrients for bone \
                health (calcium, magnesium), and the paste form is gentle on teeth. Perfect \
                for maintaining strength and energy.",
    },
    ResponseRule {
        topic: "storage",
        triggers: &["storage", "expire"],
        reply: "Store in a cool, dry place. After opening, refrigerate and use within 2-3 \
                months. Always use a clean, dry spoon. Check the packaging for exact expiry \
                dates.",
    },
    ResponseRule {
        topic: "comparison",
        triggers: &["difference", "which one"],
        reply: "Choose based on convenience: Paste for spreading, Powder for drinks, Mix for \
                snacking. All have same nutritional benefits! Paste is great for families, \
                Powder for active people, Mix for on-the-go.",
    },
    ResponseRule {
        topic: "mobile",
        triggers: &["mobile", "app"],
        reply: "This website is fully mobile-optimized! You can browse products, use the \
                nutrition calculator, check availability, and even chat with me on any \
                device. Works great on mobile!",
    },
];

/// Evaluate the rule table against a raw user message. Pure and total: any
/// input, including whitespace-only text, resolves to exactly one reply.
pub fn respond(raw: &str) -> &'static str {
    let message = raw.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|trigger| message.contains(trigger)))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK_REPLY)
}

/// Topic of the matched rule, or `None` for the fallback. Used for
/// interaction tracking.
pub fn matched_topic(raw: &str) -> Option<&'static str> {
    let message = raw.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|trigger| message.contains(trigger)))
        .map(|rule| rule.topic)
}

#[cfg(test)]
mod tests {
    use super::{matched_topic, respond, FALLBACK_REPLY, RULES};

    #[test]
    fn every_rule_has_triggers_and_a_reply() {
        for rule in RULES {
            assert!(!rule.triggers.is_empty(), "rule `{}` has no triggers", rule.topic);
            assert!(!rule.reply.is_empty(), "rule `{}` has no reply", rule.topic);
        }
    }

    #[test]
    fn respond_is_total_and_falls_back() {
        assert_eq!(respond("completely unrelated gibberish xyzzy"), FALLBACK_REPLY);
        assert_eq!(respond(""), FALLBACK_REPLY);
        assert_eq!(respond("   "), FALLBACK_REPLY);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(matched_topic("Tell me about PROTEIN"), Some("protein"));
        assert_eq!(matched_topic("HeLLo there"), Some("greeting"));
    }

    #[test]
    fn earlier_rules_win_over_later_ones() {
        // protein (rule 5) precedes recipes (rule 8).
        assert_eq!(matched_topic("a protein recipe please"), Some("protein"));
        // paste (rule 2) precedes protein (rule 5).
        assert_eq!(matched_topic("does the paste have protein?"), Some("product_paste"));
        // greeting outranks everything.
        assert_eq!(matched_topic("hi, where can i buy the powder?"), Some("greeting"));
        // powder/mixture precedes mix even though "mixture" contains "mix".
        assert_eq!(matched_topic("what is in the mixture?"), Some("product_powder"));
    }

    #[test]
    fn respond_is_deterministic() {
        let message = "is it good for kids and seniors?";
        assert_eq!(respond(message), respond(message));
        assert_eq!(matched_topic(message), Some("children"));
    }

    #[test]
    fn handles_twenty_plus_common_questions() {
        struct Case {
            text: &'static str,
            topic: Option<&'static str>,
        }

        let cases = [
            Case { text: "hello", topic: Some("greeting") },
            Case { text: "hey, quick question", topic: Some("greeting") },
            Case { text: "is the paste good for toast?", topic: Some("product_paste") },
            Case { text: "how do i prepare the powder?", topic: Some("product_powder") },
            Case { text: "looking for a travel snack", topic: Some("product_mix") },
            Case { text: "how much protein per serving?", topic: Some("protein") },
            Case { text: "what are the health benefits?", topic: Some("benefits") },
            Case { text: "nutrition facts please", topic: Some("benefits") },
            Case { text: "does it contain omega 3?", topic: Some("omega") },
            Case { text: "any recipe ideas?", topic: Some("recipes") },
            Case { text: "what can i cook with it?", topic: Some("recipes") },
            Case { text: "breakfast ideas?", topic: Some("breakfast") },
            Case { text: "how to use it daily?", topic: Some("usage") },
            Case { text: "is it safe for kids?", topic: Some("children") },
            Case { text: "where can i get it?", topic: Some("purchase") },
            Case { text: "what's the price?", topic: Some("purchase") },
            Case { text: "will it help my diet?", topic: Some("weight") },
            Case { text: "is there added sugar?", topic: Some("diabetes") },
            Case { text: "is it suitable for elderly parents?", topic: Some("seniors") },
            Case { text: "how long before it expires?", topic: Some("storage") },
            Case { text: "difference between variants?", topic: Some("comparison") },
            Case { text: "does the site work on mobile?", topic: Some("mobile") },
            Case { text: "tell me a joke", topic: None },
        ];

        for (index, case) in cases.iter().enumerate() {
            assert_eq!(
                matched_topic(case.text),
                case.topic,
                "case {index} (`{}`) matched the wrong rule",
                case.text
            );
            assert!(!respond(case.text).is_empty());
        }
    }
}
