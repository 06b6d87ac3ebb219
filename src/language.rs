//! Static language catalog
//!
//! The six languages the concierge can speak. The catalog is fixed for the
//! lifetime of the process; both the widget (names, flags, greetings) and the
//! proxy (prompt language names) read from it.

use serde::Serialize;

/// A selectable chat language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO-style short code sent on the wire (`en`, `ar`, ...)
    pub code: &'static str,
    /// Name shown to the user, in the language itself
    #[serde(rename = "name")]
    pub display_name: &'static str,
    #[serde(rename = "flag")]
    pub flag_glyph: &'static str,
    /// Name used when instructing the model which language to answer in
    #[serde(skip)]
    pub english_name: &'static str,
    /// Canned assistant greeting shown right after selection
    #[serde(rename = "greeting")]
    pub greeting_text: &'static str,
}

const LANGUAGES: [Language; 6] = [
    Language {
        code: "en",
        display_name: "English",
        flag_glyph: "🇬🇧",
        english_name: "English",
        greeting_text: "Welcome to Dwntwna! I'm your AI travel assistant for Downtown Dubai.",
    },
    Language {
        code: "ar",
        display_name: "العربية",
        flag_glyph: "🇦🇪",
        english_name: "Arabic",
        greeting_text: "مرحباً بكم في دونتانا! أنا مساعدكم الذكي للسفر في وسط دبي.",
    },
    Language {
        code: "hi",
        display_name: "हिंदी",
        flag_glyph: "🇮🇳",
        english_name: "Hindi",
        greeting_text: "डाउनटाउन दुबई में आपका स्वागत है! मैं आपका AI यात्रा सहायक हूं।",
    },
    Language {
        code: "ur",
        display_name: "اردو",
        flag_glyph: "🇵🇰",
        english_name: "Urdu",
        greeting_text: "ڈاؤن ٹاؤن دبئی میں خوش آمدید! میں آپ کا AI سفری معاون ہوں۔",
    },
    Language {
        code: "zh",
        display_name: "中文",
        flag_glyph: "🇨🇳",
        english_name: "Chinese",
        greeting_text: "欢迎来到迪拜市中心！我是您的AI旅行助手。",
    },
    Language {
        code: "ru",
        display_name: "Русский",
        flag_glyph: "🇷🇺",
        english_name: "Russian",
        greeting_text: "Добро пожаловать в центр Дубая! Я ваш AI помощник по путешествиям.",
    },
];

/// Code used when the client never chose a language
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

impl Language {
    /// All languages, in selector order
    pub fn all() -> &'static [Language] {
        &LANGUAGES
    }

    pub fn from_code(code: &str) -> Option<&'static Language> {
        LANGUAGES.iter().find(|l| l.code == code)
    }

    /// Instruction recorded as the system entry of a fresh transcript
    pub fn system_directive(&self) -> String {
        format!(
            "User selected {name} as their preferred language. Always respond in {name} unless they specifically ask for another language.",
            name = self.display_name
        )
    }
}

/// Resolve the language name the model is told to answer in.
///
/// Unknown codes fall back to English.
pub fn prompt_language_name(code: &str) -> &'static str {
    Language::from_code(code).map_or("English", |l| l.english_name)
}
