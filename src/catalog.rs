//! Static voice catalog mapping target languages to the server's synthetic voices.
//!
//! The dubbing server accepts either a full neural voice id (for example
//! `en-US-EmmaNeural`) or a bare gender keyword (`female`/`male`) that it
//! resolves itself. Languages missing from the table fall back to the two
//! generic keyword entries so a submission is always possible.

/// One selectable voice for a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceOption {
    /// Identifier sent to the server as `voice_id`.
    pub id: &'static str,
    /// Label shown in the voice selector.
    pub name: &'static str,
}

/// A supported target language and its ordered voice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// ISO-style language code sent as `target_language`.
    pub code: &'static str,
    /// Label shown in the language selector.
    pub label: &'static str,
    /// Voices offered for this language, in display order.
    pub voices: &'static [VoiceOption],
}

/// Language preselected at startup and restored by the clear control.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Fallback voices for language codes missing from [`SUPPORTED_LANGUAGES`].
pub const GENERIC_VOICES: &[VoiceOption] = &[
    VoiceOption {
        id: "female",
        name: "Standard Female",
    },
    VoiceOption {
        id: "male",
        name: "Standard Male",
    },
];

/// Languages the server ships tuned neural voices for, in selector order.
pub const SUPPORTED_LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry {
        code: "en",
        label: "English",
        voices: &[
            VoiceOption {
                id: "en-US-EmmaNeural",
                name: "Female",
            },
            VoiceOption {
                id: "en-US-AndrewNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "hi",
        label: "Hindi",
        voices: &[
            VoiceOption {
                id: "hi-IN-SwaraNeural",
                name: "Female",
            },
            VoiceOption {
                id: "hi-IN-MadhurNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "es",
        label: "Spanish",
        voices: &[
            VoiceOption {
                id: "es-MX-DaliaNeural",
                name: "Female",
            },
            VoiceOption {
                id: "es-MX-JorgeNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "ja",
        label: "Japanese",
        voices: &[
            VoiceOption {
                id: "ja-JP-NanamiNeural",
                name: "Female",
            },
            VoiceOption {
                id: "ja-JP-KeitaNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "fr",
        label: "French",
        voices: &[
            VoiceOption {
                id: "fr-FR-DeniseNeural",
                name: "Female",
            },
            VoiceOption {
                id: "fr-FR-HenriNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "de",
        label: "German",
        voices: &[
            VoiceOption {
                id: "de-DE-KatjaNeural",
                name: "Female",
            },
            VoiceOption {
                id: "de-DE-ConradNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "ta",
        label: "Tamil",
        voices: &[
            VoiceOption {
                id: "ta-IN-SaranyaNeural",
                name: "Female",
            },
            VoiceOption {
                id: "ta-IN-AnbuNeural",
                name: "Male",
            },
        ],
    },
    LanguageEntry {
        code: "ml",
        label: "Malayalam",
        voices: &[
            VoiceOption {
                id: "ml-IN-SobhanaNeural",
                name: "Female",
            },
            VoiceOption {
                id: "ml-IN-MidhunNeural",
                name: "Male",
            },
        ],
    },
];

/// Look up a supported language entry by code.
#[must_use]
pub fn language_entry(code: &str) -> Option<&'static LanguageEntry> {
    SUPPORTED_LANGUAGES.iter().find(|entry| entry.code == code)
}

/// Voices for `code`, falling back to [`GENERIC_VOICES`] for unknown codes.
#[must_use]
pub fn voices_for(code: &str) -> &'static [VoiceOption] {
    language_entry(code).map_or(GENERIC_VOICES, |entry| entry.voices)
}

/// Display label for `code`, or the code itself when unsupported.
#[must_use]
pub fn language_label(code: &str) -> &str {
    language_entry(code).map_or(code, |entry| entry.label)
}

/// Whether `voice_id` is offered for `code` (including the generic fallback).
#[must_use]
pub fn voice_available(code: &str, voice_id: &str) -> bool {
    voices_for(code).iter().any(|voice| voice.id == voice_id)
}
