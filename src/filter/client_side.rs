// Client-side filter — the classifier with the mode policy applied.

use tracing::debug;

use super::classifier::ViolationClassifier;
use super::result::FilterResult;
use crate::mode::Mode;

/// Local, synchronous content filter. Never performs I/O.
#[derive(Debug, Clone)]
pub struct ClientSideFilter {
    classifier: ViolationClassifier,
}

impl ClientSideFilter {
    pub fn new(classifier: ViolationClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &ViolationClassifier {
        &self.classifier
    }

    /// Submission gate. Modes that don't apply client filtering pass
    /// everything without looking at the text.
    pub fn filter_content(&self, text: &str, mode: Mode) -> FilterResult {
        if !mode.applies_client_filtering() {
            return FilterResult::allowed();
        }

        let result = FilterResult::from_classification(self.classifier.classify(text));
        if !result.is_allowed() {
            debug!(
                mode = mode.api_value(),
                detected = result.detected_words().len(),
                "Client-side filter rejected content"
            );
        }
        result
    }

    /// Mode-independent check for live typing feedback.
    pub fn check_profanity(&self, text: &str) -> FilterResult {
        FilterResult::from_classification(self.classifier.classify(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::violation::ViolationType;
    use crate::filter::words::ProfanityList;
    use std::sync::Arc;

    fn filter() -> ClientSideFilter {
        let list = Arc::new(ProfanityList::new(["badword"]));
        ClientSideFilter::new(ViolationClassifier::new(list))
    }

    #[test]
    fn test_shine_rejects_listed_word() {
        let result = filter().filter_content("what a badword", Mode::Shine);
        assert!(!result.is_allowed());
        assert_eq!(result.primary_violation(), Some(ViolationType::Profanity));
        assert_eq!(result.detected_words(), ["badword".to_string()]);
    }

    #[test]
    fn test_shadow_allows_listed_word() {
        let result = filter().filter_content("what a badword", Mode::Shadow);
        assert_eq!(result, FilterResult::allowed());
    }

    #[test]
    fn test_clean_text_allowed_in_both_modes() {
        let f = filter();
        for mode in [Mode::Shine, Mode::Shadow] {
            assert_eq!(f.filter_content("this is clean text", mode), FilterResult::allowed());
        }
    }

    #[test]
    fn test_check_profanity_ignores_mode() {
        let result = filter().check_profanity("badword");
        assert!(!result.is_allowed());
        assert_eq!(result.detected_words(), ["badword".to_string()]);
    }
}
