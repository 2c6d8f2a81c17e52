//! Selectable target languages.

/// Target language labels offered in the header picker.
///
/// The label is passed to the audit prompt verbatim.
pub const TARGET_LANGUAGES: &[&str] = &[
    "Arabic",
    "Armenian",
    "Bassa",
    "Bengali",
    "Chichewa",
    "Chinese (Simplified)",
    "Chinese (Traditional Mandarin)",
    "English",
    "French",
    "Georgian",
    "Haitian Creole",
    "Hindi",
    "Hungarian",
    "Kazakh",
    "Kinyarwanda",
    "Kiswahili",
    "Kannada",
    "Luganda",
    "Manipuri",
    "Mongolian",
    "Nepali",
    "Oriya (Odia)",
    "Polish",
    "Portuguese",
    "Punjabi",
    "Romanian",
    "Rongmei",
    "Russian",
    "Sesotho",
    "Spanish",
    "Tagalog",
    "Tamil",
    "Telugu",
    "Thai",
    "Turkish",
    "Ukrainian",
    "Urdu",
    "Uzbek",
];

/// Language selected when nothing has been stored yet.
pub const DEFAULT_TARGET_LANGUAGE: &str = "Turkish";
