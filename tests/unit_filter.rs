// Unit tests for the client-side filter through the public service API.
//
// Covers the mode exemption, the mode-independence of check_profanity,
// whole-word boundaries, and idempotent list updates — all local, no
// moderation service involved.

use std::sync::Arc;

use shinegate::filter::words::ProfanityList;
use shinegate::moderation::retry::RetryPolicy;
use shinegate::moderation::traits::AllowAllClient;
use shinegate::{ContentFilterService, FilterResult, Mode, ViolationType};

const MODES: [Mode; 2] = [Mode::Shine, Mode::Shadow];

fn service(words: &[&str]) -> ContentFilterService {
    ContentFilterService::new(
        Arc::new(AllowAllClient),
        Arc::new(ProfanityList::new(words.iter().copied())),
        RetryPolicy::default(),
    )
}

const CLEAN_TEXTS: &[&str] = &[
    "this is clean text",
    "",
    "   ",
    "Good morning! How's everyone doing?",
    "the badwordsmith forged a sword",
    "émojis 🎉 and ünïcödé are fine",
];

const DIRTY_TEXTS: &[&str] = &[
    "badword",
    "you BADWORD!",
    "well...badword, honestly",
    "line one\nbadword\tline two",
    "«badword»",
];

#[test]
fn clean_text_is_allowed_in_every_mode() {
    let svc = service(&["badword"]);
    for text in CLEAN_TEXTS {
        for mode in MODES {
            let result = svc.filter_content(text, mode);
            assert_eq!(result, FilterResult::allowed(), "{text:?} in {mode}");
            assert!(result.violations().is_empty());
        }
    }
}

#[test]
fn listed_word_is_rejected_in_shine() {
    let svc = service(&["badword"]);
    for text in DIRTY_TEXTS {
        let result = svc.filter_content(text, Mode::Shine);
        assert!(!result.is_allowed(), "{text:?} should be rejected");
        assert!(result.violations().contains(&ViolationType::Profanity));
        assert!(
            result.detected_words().contains(&"badword".to_string()),
            "{text:?} -> {:?}",
            result.detected_words()
        );
    }
}

#[test]
fn listed_word_is_allowed_in_shadow() {
    let svc = service(&["badword"]);
    for text in DIRTY_TEXTS {
        assert_eq!(
            svc.filter_content(text, Mode::Shadow),
            FilterResult::allowed(),
            "{text:?} should pass in Shadow"
        );
    }
}

#[test]
fn check_profanity_is_mode_independent() {
    let svc = service(&["badword"]);
    for text in CLEAN_TEXTS.iter().chain(DIRTY_TEXTS) {
        let shine = svc.filter_content(text, Mode::Shine);
        let direct = svc.check_profanity(text);
        // check_profanity always runs the classifier, so it matches Shine's view
        assert_eq!(direct, shine, "{text:?}");
    }
    assert!(!svc.check_profanity("badword").is_allowed());
}

#[test]
fn check_profanity_flags_text_that_shadow_lets_through() {
    let svc = service(&["badword"]);
    for text in DIRTY_TEXTS {
        assert!(svc.filter_content(text, Mode::Shadow).is_allowed(), "{text:?}");
        let direct = svc.check_profanity(text);
        assert!(!direct.is_allowed(), "{text:?}");
        assert_eq!(direct.detected_words(), ["badword".to_string()]);
    }
}

#[test]
fn embedded_word_is_not_a_false_positive() {
    let svc = service(&["ass", "hell"]);
    for text in ["classic", "assessment", "hello", "shell", "Massachusetts"] {
        assert!(svc.check_profanity(text).is_allowed(), "{text:?}");
    }
}

#[test]
fn punctuated_word_is_not_a_false_negative() {
    let svc = service(&["ass", "hell"]);
    for text in ["what the hell?", "HELL.", "(ass)", "ass-kicking"] {
        assert!(!svc.check_profanity(text).is_allowed(), "{text:?}");
    }

    let svc = ContentFilterService::new(
        Arc::new(AllowAllClient),
        Arc::new(ProfanityList::with_defaults()),
        RetryPolicy::default(),
    );
    for text in [
        "for fuck's sake",
        "that\u{2019}s shit\u{2019}s fault",
        "this is shit.anyway",
        "bullshit_lol",
    ] {
        assert!(!svc.filter_content(text, Mode::Shine).is_allowed(), "{text:?}");
    }
    assert!(svc.filter_content("the shitake's price", Mode::Shine).is_allowed());
}

#[test]
fn update_with_present_word_is_a_noop() {
    let svc = service(&["badword"]);
    let before: Vec<FilterResult> = DIRTY_TEXTS
        .iter()
        .chain(CLEAN_TEXTS)
        .map(|t| svc.filter_content(t, Mode::Shine))
        .collect();

    assert_eq!(svc.update_profanity_list(["badword", "BadWord", " badword "]), 0);

    let after: Vec<FilterResult> = DIRTY_TEXTS
        .iter()
        .chain(CLEAN_TEXTS)
        .map(|t| svc.filter_content(t, Mode::Shine))
        .collect();
    assert_eq!(before, after);
    assert_eq!(svc.profanity_list().len(), 1);
}

#[test]
fn update_takes_effect_immediately() {
    let svc = service(&[]);
    assert!(svc.filter_content("gnarly dude", Mode::Shine).is_allowed());

    assert_eq!(svc.update_profanity_list(vec!["gnarly".to_string()]), 1);

    let result = svc.filter_content("gnarly dude", Mode::Shine);
    assert_eq!(result.detected_words(), ["gnarly".to_string()]);
}

#[test]
fn multiple_listed_words_are_all_reported() {
    let svc = service(&["badword", "worse"]);
    let result = svc.filter_content("worse and badword and worse", Mode::Shine);
    assert_eq!(
        result.detected_words(),
        ["worse".to_string(), "badword".to_string()]
    );
    assert_eq!(result.violations().len(), 1);
}
