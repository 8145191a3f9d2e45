//! Typing effect that cycles through a list of phrases

use std::time::Duration;

use crate::error::EffectsError;

/// Delay between typed characters
pub const TYPE_DELAY: Duration = Duration::from_millis(100);

/// Pause after a phrase is fully erased, before the next one starts
pub const NEXT_PHRASE_DELAY: Duration = Duration::from_millis(500);

/// Default hold time for a fully typed phrase
pub const DEFAULT_WAIT: Duration = Duration::from_millis(3000);

#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_index: usize,
    /// Characters of the current phrase currently shown
    shown: usize,
    text: String,
    deleting: bool,
    wait: Duration,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, wait: Duration) -> Result<Self, EffectsError> {
        if phrases.is_empty() {
            return Err(EffectsError::NoPhrases);
        }
        Ok(Self {
            phrases,
            phrase_index: 0,
            shown: 0,
            text: String::new(),
            deleting: false,
            wait,
        })
    }

    /// Phrases given as a JSON array of strings, e.g. `["Engineer", "Designer"]`
    pub fn from_json(json: &str, wait: Duration) -> Result<Self, EffectsError> {
        let phrases: Vec<String> = serde_json::from_str(json)?;
        Self::new(phrases, wait)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Index into the phrase list, wrapping
    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.phrase_index % self.phrases.len()]
    }

    /// Type or erase one character and return the delay before the next tick
    pub fn tick(&mut self) -> Duration {
        let full_len = self.current_phrase().chars().count();

        if self.deleting {
            self.shown = self.shown.saturating_sub(1);
        } else {
            self.shown = (self.shown + 1).min(full_len);
        }
        self.text = self.current_phrase().chars().take(self.shown).collect();

        if !self.deleting && self.shown == full_len {
            self.deleting = true;
            self.wait
        } else if self.deleting && self.shown == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            NEXT_PHRASE_DELAY
        } else if self.deleting {
            TYPE_DELAY / 2
        } else {
            TYPE_DELAY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_types_holds_erases_and_advances() {
        let mut tw = Typewriter::from_json(r#"["ab", "c"]"#, ms(2000)).unwrap();

        assert_eq!((tw.tick(), tw.text()), (ms(100), "a"));
        assert_eq!((tw.tick(), tw.text()), (ms(2000), "ab"));
        assert!(tw.is_deleting());
        assert_eq!((tw.tick(), tw.text()), (ms(50), "a"));
        assert_eq!((tw.tick(), tw.text()), (ms(500), ""));
        assert!(!tw.is_deleting());
        assert_eq!(tw.current_phrase(), "c");

        assert_eq!((tw.tick(), tw.text()), (ms(2000), "c"));
        tw.tick();
        assert_eq!(tw.current_phrase(), "ab");
    }

    #[test]
    fn test_multibyte_phrases_type_per_char() {
        let mut tw = Typewriter::new(vec!["héllo".to_string()], DEFAULT_WAIT).unwrap();
        tw.tick();
        tw.tick();
        assert_eq!(tw.text(), "hé");
    }

    #[test]
    fn test_empty_phrase_still_cycles() {
        let mut tw = Typewriter::new(vec![String::new(), "x".to_string()], ms(10)).unwrap();
        assert_eq!(tw.tick(), ms(10));
        assert_eq!(tw.tick(), NEXT_PHRASE_DELAY);
        assert_eq!(tw.current_phrase(), "x");
    }

    #[test]
    fn test_rejects_empty_list_and_bad_json() {
        assert!(matches!(
            Typewriter::new(Vec::new(), DEFAULT_WAIT),
            Err(EffectsError::NoPhrases)
        ));
        assert!(matches!(
            Typewriter::from_json("not json", DEFAULT_WAIT),
            Err(EffectsError::Json(_))
        ));
    }
}
