//! Submission form state: field focus, selections, and request assembly.

use std::path::PathBuf;

use dubterm::api::{SubmissionRequest, VideoSource};
use dubterm::catalog::{self, VoiceOption, GENERIC_VOICES, SUPPORTED_LANGUAGES};

pub(crate) const MISSING_SOURCE_ERROR: &str = "Choose a video file or enter a video URL";

#[derive(Debug, Clone, Copy)]
enum Step {
    Forward,
    Back,
}

/// Move an index one place around a wrap-around list.
fn wrap_step(idx: usize, len: usize, step: Step) -> usize {
    if len == 0 {
        return 0;
    }
    match step {
        Step::Forward => (idx + 1) % len,
        Step::Back if idx == 0 => len - 1,
        Step::Back => idx - 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    VideoPath,
    VideoUrl,
    Language,
    Voice,
    Submit,
}

/// Tab order through the form.
pub(crate) const FORM_FIELDS: &[FormField] = &[
    FormField::VideoPath,
    FormField::VideoUrl,
    FormField::Language,
    FormField::Voice,
    FormField::Submit,
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum LanguageChoice {
    /// Index into [`SUPPORTED_LANGUAGES`].
    Listed(usize),
    /// Code outside the catalog, offered with the generic voice pair.
    Custom(String),
}

fn voices_for_choice(choice: &LanguageChoice) -> &'static [VoiceOption] {
    match choice {
        LanguageChoice::Listed(idx) => SUPPORTED_LANGUAGES
            .get(*idx)
            .map_or(GENERIC_VOICES, |entry| entry.voices),
        LanguageChoice::Custom(code) => catalog::voices_for(code),
    }
}

#[derive(Debug)]
pub(crate) struct FormState {
    pub(crate) video_path: String,
    pub(crate) video_url: String,
    pub(crate) focus: FormField,
    language: LanguageChoice,
    voice_idx: usize,
    default_language: LanguageChoice,
    default_voice_idx: usize,
}

impl FormState {
    /// Start from the configured language and voice, falling back to the first
    /// catalog entries when either is unknown.
    pub(crate) fn new(language_code: &str, voice_id: Option<&str>) -> Self {
        let language = SUPPORTED_LANGUAGES
            .iter()
            .position(|entry| entry.code == language_code)
            .map_or_else(
                || LanguageChoice::Custom(language_code.to_string()),
                LanguageChoice::Listed,
            );
        let voice_idx = voice_id
            .and_then(|id| {
                voices_for_choice(&language)
                    .iter()
                    .position(|voice| voice.id == id)
            })
            .unwrap_or(0);
        Self {
            video_path: String::new(),
            video_url: String::new(),
            focus: FormField::VideoPath,
            default_language: language.clone(),
            default_voice_idx: voice_idx,
            language,
            voice_idx,
        }
    }

    pub(crate) fn language_code(&self) -> &str {
        match &self.language {
            LanguageChoice::Listed(idx) => SUPPORTED_LANGUAGES
                .get(*idx)
                .map_or(catalog::DEFAULT_LANGUAGE, |entry| entry.code),
            LanguageChoice::Custom(code) => code,
        }
    }

    pub(crate) fn language_label(&self) -> &str {
        catalog::language_label(self.language_code())
    }

    pub(crate) fn voices(&self) -> &'static [VoiceOption] {
        voices_for_choice(&self.language)
    }

    pub(crate) fn voice(&self) -> VoiceOption {
        self.voices()
            .get(self.voice_idx)
            .copied()
            .unwrap_or(GENERIC_VOICES[0])
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.neighbor_field(Step::Forward);
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.neighbor_field(Step::Back);
    }

    fn neighbor_field(&self, step: Step) -> FormField {
        let at = FORM_FIELDS
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        FORM_FIELDS[wrap_step(at, FORM_FIELDS.len(), step)]
    }

    pub(crate) fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            FormField::VideoPath => self.video_path.push(c),
            FormField::VideoUrl => self.video_url.push(c),
            _ => {}
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.focus {
            FormField::VideoPath => {
                self.video_path.pop();
            }
            FormField::VideoUrl => {
                self.video_url.pop();
            }
            _ => {}
        }
    }

    /// Step the focused selector. Changing language restarts the voice list
    /// from its first entry.
    pub(crate) fn cycle_selection(&mut self, direction: i32) {
        let step = if direction >= 0 { Step::Forward } else { Step::Back };
        match self.focus {
            FormField::Language => {
                let next = match &self.language {
                    LanguageChoice::Listed(idx) => {
                        wrap_step(*idx, SUPPORTED_LANGUAGES.len(), step)
                    }
                    // Leaving a custom code lands on either end of the catalog.
                    LanguageChoice::Custom(_) => match step {
                        Step::Forward => 0,
                        Step::Back => SUPPORTED_LANGUAGES.len().saturating_sub(1),
                    },
                };
                self.language = LanguageChoice::Listed(next);
                self.voice_idx = 0;
            }
            FormField::Voice => {
                self.voice_idx = wrap_step(self.voice_idx, self.voices().len(), step);
            }
            _ => {}
        }
    }

    /// Reset to startup defaults, emptying both source fields.
    pub(crate) fn clear(&mut self) {
        self.video_path.clear();
        self.video_url.clear();
        self.language = self.default_language.clone();
        self.voice_idx = self.default_voice_idx;
        self.focus = FormField::VideoPath;
    }

    /// Assemble the submission, preferring a chosen file over a pasted URL.
    pub(crate) fn build_request(&self) -> Result<SubmissionRequest, &'static str> {
        let path = self.video_path.trim();
        let url = self.video_url.trim();
        let video = if !path.is_empty() {
            VideoSource::File(PathBuf::from(path))
        } else if !url.is_empty() {
            VideoSource::Url(url.to_string())
        } else {
            return Err(MISSING_SOURCE_ERROR);
        };
        Ok(SubmissionRequest {
            video,
            target_language: self.language_code().to_string(),
            voice_id: self.voice().id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_step_wraps_at_both_ends() {
        assert_eq!(wrap_step(2, 3, Step::Forward), 0);
        assert_eq!(wrap_step(0, 3, Step::Back), 2);
        assert_eq!(wrap_step(1, 3, Step::Forward), 2);
        assert_eq!(wrap_step(1, 3, Step::Back), 0);
    }

    #[test]
    fn wrap_step_tolerates_an_empty_list() {
        assert_eq!(wrap_step(5, 0, Step::Forward), 0);
        assert_eq!(wrap_step(0, 0, Step::Back), 0);
    }

    #[test]
    fn focus_cycles_through_every_field_and_wraps() {
        let mut form = FormState::new("en", None);
        let mut seen = Vec::new();
        for _ in 0..FORM_FIELDS.len() {
            seen.push(form.focus);
            form.focus_next();
        }
        assert_eq!(seen, FORM_FIELDS);
        assert_eq!(form.focus, FormField::VideoPath);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Submit);
    }

    #[test]
    fn text_entry_targets_only_the_focused_source_field() {
        let mut form = FormState::new("en", None);
        form.insert_char('a');
        form.insert_char('\u{1b}');
        form.focus_next();
        form.insert_char('b');
        form.focus_next();
        form.insert_char('c');
        assert_eq!(form.video_path, "a");
        assert_eq!(form.video_url, "b");
        form.focus_prev();
        form.backspace();
        assert_eq!(form.video_url, "");
    }

    #[test]
    fn changing_language_resets_the_voice_selection() {
        let mut form = FormState::new("en", Some("en-US-AndrewNeural"));
        assert_eq!(form.voice().id, "en-US-AndrewNeural");
        form.focus = FormField::Language;
        form.cycle_selection(1);
        assert_eq!(form.language_code(), "hi");
        assert_eq!(form.voice().id, "hi-IN-SwaraNeural");
    }

    #[test]
    fn voice_cycling_wraps_within_the_language_list() {
        let mut form = FormState::new("ja", None);
        form.focus = FormField::Voice;
        form.cycle_selection(1);
        assert_eq!(form.voice().id, "ja-JP-KeitaNeural");
        form.cycle_selection(1);
        assert_eq!(form.voice().id, "ja-JP-NanamiNeural");
        form.cycle_selection(-1);
        assert_eq!(form.voice().id, "ja-JP-KeitaNeural");
    }

    #[test]
    fn custom_language_gets_generic_voices_until_cycled_into_the_catalog() {
        let mut form = FormState::new("pt", None);
        assert_eq!(form.language_code(), "pt");
        assert_eq!(form.voice().id, "female");
        form.focus = FormField::Language;
        form.cycle_selection(-1);
        assert_eq!(form.language_code(), "ml");
    }

    #[test]
    fn clear_restores_startup_defaults() {
        let mut form = FormState::new("es", Some("es-MX-JorgeNeural"));
        form.video_path.push_str("/tmp/clip.mp4");
        form.video_url.push_str("https://example.com/v.mp4");
        form.focus = FormField::Language;
        form.cycle_selection(1);
        form.clear();
        assert_eq!(form.video_path, "");
        assert_eq!(form.video_url, "");
        assert_eq!(form.language_code(), "es");
        assert_eq!(form.voice().id, "es-MX-JorgeNeural");
        assert_eq!(form.focus, FormField::VideoPath);
    }

    #[test]
    fn build_request_prefers_the_file_over_the_url() {
        let mut form = FormState::new("en", None);
        form.video_path = " /tmp/clip.mp4 ".to_string();
        form.video_url = "https://example.com/v.mp4".to_string();
        let request = form.build_request().expect("request");
        assert_eq!(
            request.video,
            VideoSource::File(PathBuf::from("/tmp/clip.mp4"))
        );
        assert_eq!(request.target_language, "en");
        assert_eq!(request.voice_id, "en-US-EmmaNeural");
    }

    #[test]
    fn build_request_uses_the_url_when_no_file_is_set() {
        let mut form = FormState::new("hi", None);
        form.video_url = "https://example.com/v.mp4".to_string();
        let request = form.build_request().expect("request");
        assert_eq!(
            request.video,
            VideoSource::Url("https://example.com/v.mp4".to_string())
        );
    }

    #[test]
    fn build_request_rejects_an_empty_form() {
        let mut form = FormState::new("en", None);
        form.video_path = "   ".to_string();
        assert_eq!(form.build_request().unwrap_err(), MISSING_SOURCE_ERROR);
    }
}
