/// Display icon derived from the free-text condition description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionIcon {
    Clear,
    Cloud,
    Rain,
    Snow,
    Thunder,
}

/// Keyword table, checked top to bottom; first substring match wins.
/// The order is fixed: "thunderstorm with rain" resolves to Rain because
/// "rain" is checked before "thunder".
const KEYWORDS: &[(&str, ConditionIcon)] = &[
    ("clear", ConditionIcon::Clear),
    ("cloud", ConditionIcon::Cloud),
    ("rain", ConditionIcon::Rain),
    ("snow", ConditionIcon::Snow),
    ("thunder", ConditionIcon::Thunder),
];

impl ConditionIcon {
    /// Pick an icon for a condition description, or `None` when no keyword
    /// matches (the description text is still rendered either way).
    pub fn for_description(description: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| description.contains(keyword))
            .map(|(_, icon)| *icon)
    }

    /// Terminal glyph for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            ConditionIcon::Clear => "☀",
            ConditionIcon::Cloud => "☁",
            ConditionIcon::Rain => "🌧",
            ConditionIcon::Snow => "❄",
            ConditionIcon::Thunder => "⛈",
        }
    }
}
