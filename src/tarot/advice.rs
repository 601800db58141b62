use std::{collections::HashMap, sync::LazyLock};

use super::deck::TarotCard;
use crate::locale::Locale;

const PRACTICAL_SUFFIX: &str = "Choose one small, concrete action today that puts this into practice.";
const DEFAULT_FOCUS: &str = "clarity and balance";

/// Curated advice for one card. At least one language is always filled in.
#[derive(Debug, Clone, Copy)]
struct AdviceEntry {
    en: Option<&'static str>,
    ko: Option<&'static str>,
}

const fn both(en: &'static str, ko: &'static str) -> AdviceEntry {
    AdviceEntry { en: Some(en), ko: Some(ko) }
}

static CURATED: LazyLock<HashMap<&'static str, AdviceEntry>> = LazyLock::new(|| {
    HashMap::from([
        (
            "The Magician",
            both(
                "Gather your tools and start; you already have what this needs.",
                "필요한 도구는 이미 손에 있습니다. 지금 바로 시작해 보세요.",
            ),
        ),
        (
            "The High Priestess",
            both(
                "Pause before answering and let your intuition speak first.",
                "대답하기 전에 잠시 멈추고 직감의 목소리를 먼저 들어 보세요.",
            ),
        ),
        (
            "The Empress",
            both(
                "Nurture what you want to grow, starting with yourself.",
                "키우고 싶은 것을 정성껏 돌보세요. 그 시작은 나 자신입니다.",
            ),
        ),
        (
            "The Emperor",
            both(
                "Set one clear boundary and hold it calmly.",
                "분명한 경계 하나를 정하고 차분하게 지켜 나가세요.",
            ),
        ),
        (
            "The Hierophant",
            both(
                "Seek out someone experienced and ask for their guidance.",
                "경험 많은 사람에게 조언을 구해 보세요.",
            ),
        ),
        (
            "The Chariot",
            both(
                "Pick a single direction and commit your energy to it.",
                "한 방향을 정하고 에너지를 그곳에 집중하세요.",
            ),
        ),
        (
            "Strength",
            both(
                "Meet the situation with patience rather than force.",
                "힘으로 밀어붙이기보다 인내심으로 상황을 마주하세요.",
            ),
        ),
        (
            "The Hermit",
            both(
                "Take quiet time alone to hear your own answer.",
                "혼자만의 조용한 시간을 가지며 스스로의 답을 찾아보세요.",
            ),
        ),
        (
            "Wheel of Fortune",
            both(
                "Stay flexible; the turn in circumstances is an opening.",
                "유연함을 유지하세요. 상황의 변화가 곧 기회입니다.",
            ),
        ),
        (
            "Justice",
            both(
                "Act honestly and accept the consequences with grace.",
                "정직하게 행동하고 그 결과를 담담히 받아들이세요.",
            ),
        ),
        (
            "The Hanged Man",
            both(
                "Let go of the need to control this and look from another angle.",
                "통제하려는 마음을 내려놓고 다른 각도에서 바라보세요.",
            ),
        ),
        (
            "Temperance",
            both(
                "Find the middle way and move at a steady pace.",
                "중용을 찾고 꾸준한 속도로 나아가세요.",
            ),
        ),
        (
            "The Devil",
            both(
                "Name the habit that holds you and loosen its grip one step at a time.",
                "나를 붙잡는 습관을 인정하고 한 걸음씩 벗어나세요.",
            ),
        ),
        (
            "The Tower",
            both(
                "Let the false structure fall and rebuild on honest ground.",
                "무너지는 것을 붙잡지 말고 진실한 토대 위에 다시 세우세요.",
            ),
        ),
        (
            "The Moon",
            both(
                "Move slowly until the picture is clear, and verify before trusting.",
                "상황이 분명해질 때까지 천천히 움직이고, 믿기 전에 확인하세요.",
            ),
        ),
        (
            "The Sun",
            both(
                "Share your good news and let others enjoy the warmth with you.",
                "좋은 소식을 나누고 주변 사람들과 기쁨을 함께하세요.",
            ),
        ),
        (
            "Judgement",
            both(
                "Review the past honestly, forgive, and answer the call.",
                "지난 일을 솔직하게 돌아보고 용서한 뒤 새로운 부름에 응답하세요.",
            ),
        ),
        (
            "The World",
            both(
                "Celebrate the finish and take the lessons into your next chapter.",
                "마무리를 축하하고 그 교훈을 다음 장으로 가져가세요.",
            ),
        ),
        (
            "Ace of Cups",
            AdviceEntry {
                en: Some("Open your heart to a new feeling or connection."),
                ko: None,
            },
        ),
        (
            "Three of Swords",
            AdviceEntry {
                en: None,
                ko: Some("아픔을 외면하지 말고 충분히 느낀 뒤 흘려보내세요."),
            },
        ),
        (
            "Ten of Pentacles",
            both(
                "Invest in what will last for the people you care about.",
                "소중한 사람들을 위해 오래 남을 것에 투자하세요.",
            ),
        ),
    ])
});

/// Curated advice for `name`: Korean when requested and available, otherwise English,
/// otherwise whichever text the entry has. `None` only when the card is not curated.
pub fn get_card_advice_localized(name: &str, locale: Locale) -> Option<String> {
    let entry = CURATED.get(name)?;
    let preferred = if locale.is_korean() { entry.ko } else { None };
    preferred
        .or(entry.en)
        .or(entry.ko)
        .map(str::to_string)
}

/// Resolve advice for a drawn card. Always returns non-empty text.
pub fn get_card_advice(card: &TarotCard, is_reversed: bool, locale: Locale) -> String {
    let meaning = card.meaning(is_reversed);

    if let Some(advice) = meaning
        .advice
        .as_deref()
        .filter(|advice| !advice.trim().is_empty())
    {
        return advice.to_string();
    }

    if let Some(advice) = get_card_advice_localized(&card.name, locale) {
        return advice;
    }

    let keywords = meaning
        .keywords
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(", ");
    let first_sentence = meaning.meaning.split('.').next().unwrap_or_default().trim();

    let lead = if first_sentence.is_empty() {
        let focus = if keywords.is_empty() { DEFAULT_FOCUS } else { keywords.as_str() };
        format!("Focus on {focus}.")
    } else if keywords.is_empty() {
        format!("{first_sentence}.")
    } else {
        format!("{keywords}: {first_sentence}.")
    };

    collapse_whitespace(&format!("{lead} {PRACTICAL_SUFFIX}"))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarot::deck::{CardMeaning, deck, find_card};

    fn card_with(meaning: CardMeaning) -> TarotCard {
        let mut card = find_card("Two of Wands").expect("card").clone();
        card.upright = meaning;
        card
    }

    #[test]
    fn authored_advice_wins() {
        let fool = find_card("The Fool").expect("card");
        let advice = get_card_advice(fool, false, Locale::Ko);
        assert_eq!(advice, fool.upright.advice.clone().expect("authored"));
    }

    #[test]
    fn blank_authored_advice_falls_through() {
        let card = card_with(CardMeaning {
            keywords: vec!["choice".into()],
            meaning: "Two paths.".into(),
            advice: Some("   ".into()),
        });
        assert!(get_card_advice(&card, false, Locale::En).starts_with("choice: Two paths."));
    }

    #[test]
    fn curated_table_respects_locale() {
        let hermit = find_card("The Hermit").expect("card");
        assert_eq!(
            get_card_advice(hermit, true, Locale::Ko),
            "혼자만의 조용한 시간을 가지며 스스로의 답을 찾아보세요."
        );
        assert_eq!(
            get_card_advice(hermit, false, Locale::En),
            "Take quiet time alone to hear your own answer."
        );
    }

    #[test]
    fn localized_lookup_falls_back_across_languages() {
        assert_eq!(
            get_card_advice_localized("Ace of Cups", Locale::Ko).as_deref(),
            Some("Open your heart to a new feeling or connection.")
        );
        assert_eq!(
            get_card_advice_localized("Three of Swords", Locale::En).as_deref(),
            Some("아픔을 외면하지 말고 충분히 느낀 뒤 흘려보내세요.")
        );
        assert!(get_card_advice_localized("Five of Wands", Locale::En).is_none());
        assert!(get_card_advice_localized("the hermit", Locale::En).is_none());
    }

    #[test]
    fn synthesizes_from_keywords_and_first_sentence() {
        let card = card_with(CardMeaning {
            keywords: vec!["alpha".into(), "beta".into(), "gamma".into()],
            meaning: "First   part\nof it. Second part.".into(),
            advice: None,
        });
        assert_eq!(
            get_card_advice(&card, false, Locale::En),
            format!("alpha, beta: First part of it. {PRACTICAL_SUFFIX}")
        );
    }

    #[test]
    fn synthesizes_focus_line_when_meaning_is_empty() {
        let card = card_with(CardMeaning {
            keywords: vec![],
            meaning: String::new(),
            advice: None,
        });
        assert_eq!(
            get_card_advice(&card, false, Locale::Ko),
            format!("Focus on clarity and balance. {PRACTICAL_SUFFIX}")
        );

        let card = card_with(CardMeaning {
            keywords: vec!["rest".into()],
            meaning: ". trailing".into(),
            advice: None,
        });
        assert_eq!(
            get_card_advice(&card, false, Locale::En),
            format!("Focus on rest. {PRACTICAL_SUFFIX}")
        );
    }

    #[test]
    fn every_card_gets_advice_in_every_locale() {
        for card in deck() {
            for reversed in [false, true] {
                for locale in [Locale::En, Locale::Ko, Locale::parse("fr")] {
                    let advice = get_card_advice(card, reversed, locale);
                    assert!(!advice.trim().is_empty(), "{} {reversed}", card.name);
                }
            }
        }
    }

    #[test]
    fn curated_entries_are_never_blank() {
        for (name, entry) in CURATED.iter() {
            assert!(entry.en.is_some() || entry.ko.is_some(), "{name}");
            assert!(find_card(name).is_some(), "{name}");
        }
    }
}
