// Verdict label rules.
//
// Rules are checked top to bottom and the first rule with any token present
// (case-insensitive substring) decides the label. Fake-leaning tokens come
// first, so a reply mentioning both "false" and "verified" is labelled
// Potential Fake. That precedence is deliberate and pending product review;
// reorder LABEL_RULES to change it.
//
// Plain substring search means "true" also fires inside "untrue" and "real"
// inside "really"; only the fake-first order keeps "not true" on the fake side.

use truthscope_common::Verdict;

/// One ordered rule: any of `tokens` in the text yields `verdict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRule {
    pub tokens: &'static [&'static str],
    pub verdict: Verdict,
}

pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        tokens: &[
            "fake",
            "false",
            "not true",
            "misleading",
            "fabricated",
            "no evidence",
            "unverified",
            "incorrect",
        ],
        verdict: Verdict::PotentialFake,
    },
    LabelRule {
        tokens: &[
            "real",
            "true",
            "verified",
            "confirmed",
            "accurate",
            "substantiated",
            "supported",
            "yes",
        ],
        verdict: Verdict::VerifiedReal,
    },
];

/// Label for `text` under [`LABEL_RULES`]; [`Verdict::Unverified`] when no
/// rule fires.
pub fn derive_label(text: &str) -> Verdict {
    derive_label_with(LABEL_RULES, text)
}

/// Label for `text` under an explicit rule list.
pub fn derive_label_with(rules: &[LabelRule], text: &str) -> Verdict {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.tokens.iter().any(|t| lower.contains(t)))
        .map(|rule| rule.verdict)
        .unwrap_or(Verdict::Unverified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn false_and_misleading_is_potential_fake() {
        assert_eq!(derive_label("This claim is false and misleading."), Verdict::PotentialFake);
    }

    #[test]
    fn fake_tokens_win_over_real_tokens() {
        assert_eq!(
            derive_label("Verified Real? No. The figure is false."),
            Verdict::PotentialFake
        );
    }

    #[test]
    fn confirmed_is_verified_real() {
        assert_eq!(
            derive_label("Verified Real. Reuters and the BBC confirmed the figure."),
            Verdict::VerifiedReal
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(derive_label("LIKELY FAKE"), Verdict::PotentialFake);
        assert_eq!(derive_label("ACCURATE"), Verdict::VerifiedReal);
    }

    #[test]
    fn no_tokens_is_unverified() {
        assert_eq!(derive_label("The sources disagree on the date."), Verdict::Unverified);
        assert_eq!(derive_label(""), Verdict::Unverified);
    }

    #[test]
    fn not_configured_message_is_unverified() {
        assert_eq!(
            derive_label("⚠ OpenAI client not available or OPENAI_API_KEY not set."),
            Verdict::Unverified
        );
    }

    #[test]
    fn unverified_counts_as_fake_leaning() {
        assert_eq!(derive_label("Unverified: no outlet reports this."), Verdict::PotentialFake);
    }

    #[test]
    fn same_text_same_label() {
        let text = "Mostly accurate, though one number is unverified.";
        let first = derive_label(text);
        for _ in 0..10 {
            assert_eq!(derive_label(text), first);
        }
    }

    #[test]
    fn reordering_rules_flips_the_tie_break() {
        let real_first = [LABEL_RULES[1], LABEL_RULES[0]];
        let text = "Some of this is false, the rest is verified.";
        assert_eq!(derive_label_with(LABEL_RULES, text), Verdict::PotentialFake);
        assert_eq!(derive_label_with(&real_first, text), Verdict::VerifiedReal);
    }
}
