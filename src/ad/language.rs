use std::fmt;
use tracing::warn;

/// Output languages for generated ad copy, most widely spoken first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    Mandarin,
    Hindi,
    Arabic,
    Portuguese,
    Bengali,
    Russian,
    Japanese,
    German,
    French,
    Italian,
    Korean,
    Turkish,
    Vietnamese,
    Thai,
}

const ALL: [Language; 16] = [
    Language::English,
    Language::Spanish,
    Language::Mandarin,
    Language::Hindi,
    Language::Arabic,
    Language::Portuguese,
    Language::Bengali,
    Language::Russian,
    Language::Japanese,
    Language::German,
    Language::French,
    Language::Italian,
    Language::Korean,
    Language::Turkish,
    Language::Vietnamese,
    Language::Thai,
];

impl Language {
    pub fn all() -> &'static [Language] {
        &ALL
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Mandarin => "zh",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
            Language::Portuguese => "pt",
            Language::Bengali => "bn",
            Language::Russian => "ru",
            Language::Japanese => "ja",
            Language::German => "de",
            Language::French => "fr",
            Language::Italian => "it",
            Language::Korean => "ko",
            Language::Turkish => "tr",
            Language::Vietnamese => "vi",
            Language::Thai => "th",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Mandarin => "Mandarin Chinese",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
            Language::Portuguese => "Portuguese",
            Language::Bengali => "Bengali",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
            Language::German => "German",
            Language::French => "French",
            Language::Italian => "Italian",
            Language::Korean => "Korean",
            Language::Turkish => "Turkish",
            Language::Vietnamese => "Vietnamese",
            Language::Thai => "Thai",
        }
    }

    /// Look up by ISO code; unknown codes fall back to English
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        ALL.iter().copied().find(|l| l.code() == code).unwrap_or_else(|| {
            warn!(%code, "Unsupported language code, falling back to English");
            Language::English
        })
    }

    /// Look up by display name (case-insensitive) or ISO code
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim();
        ALL.iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| Self::from_code(wanted))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_size() {
        assert_eq!(Language::all().len(), 16);
        assert_eq!(Language::all()[0], Language::English);
        assert_eq!(Language::all()[15], Language::Thai);
    }

    #[test]
    fn test_code_round_trip() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), *lang);
            assert_eq!(Language::from_name(lang.name()), *lang);
        }
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(Language::from_code("xx"), Language::English);
        assert_eq!(Language::from_name("Klingon"), Language::English);
        assert_eq!(Language::from_name("mandarin chinese"), Language::Mandarin);
        assert_eq!(Language::from_name("JA"), Language::Japanese);
    }
}
