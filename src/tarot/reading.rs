use std::collections::HashMap;

use chrono::DateTime;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use super::{
    advice::get_card_advice,
    deck::{Arcana, Suit, TarotCard, deck},
    spread::Spread,
};
use crate::locale::Locale;

#[derive(Debug, Clone, Serialize)]
pub struct DrawnCard {
    pub card: &'static TarotCard,
    pub reversed: bool,
    pub position: &'static str,
    pub position_ko: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInsight {
    pub position: String,
    pub card_name: String,
    pub is_reversed: bool,
    pub insight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub overall_message: String,
    pub guidance: String,
    #[serde(default)]
    pub card_insights: Vec<CardInsight>,
}

/// Draw one distinct card per spread position, each with a random orientation.
pub fn draw_cards<R: RngCore + ?Sized>(spread: &Spread, rng: &mut R) -> Vec<DrawnCard> {
    let cards = deck();
    let mut order: Vec<usize> = (0..cards.len()).collect();
    let count = spread.card_count().min(order.len());

    // Partial Fisher-Yates: only the first `count` slots are shuffled.
    for i in 0..count {
        let remaining = (order.len() - i) as u32;
        let j = i + (rng.next_u32() % remaining) as usize;
        order.swap(i, j);
    }

    spread
        .positions
        .iter()
        .zip(&order[..count])
        .map(|(position, &index)| DrawnCard {
            card: &cards[index],
            reversed: rng.next_u32() & 1 == 1,
            position: position.label,
            position_ko: position.label_ko,
        })
        .collect()
}

pub fn interpret(question: &str, drawn: &[DrawnCard], locale: Locale) -> Interpretation {
    let card_insights: Vec<CardInsight> = drawn
        .iter()
        .map(|drawn| {
            let name = locale.pick(&drawn.card.name, &drawn.card.name_ko);
            let orientation = match (drawn.reversed, locale) {
                (false, Locale::En) => "upright",
                (true, Locale::En) => "reversed",
                (false, Locale::Ko) => "정방향",
                (true, Locale::Ko) => "역방향",
            };
            CardInsight {
                position: locale.pick(drawn.position, drawn.position_ko).to_string(),
                card_name: name.to_string(),
                is_reversed: drawn.reversed,
                insight: format!(
                    "{name} ({orientation}): {}",
                    get_card_advice(drawn.card, drawn.reversed, locale)
                ),
            }
        })
        .collect();

    let guidance = drawn
        .first()
        .map(|first| get_card_advice(first.card, first.reversed, locale))
        .unwrap_or_default();

    Interpretation {
        overall_message: overall_message(question, drawn, locale),
        guidance,
        card_insights,
    }
}

fn overall_message(question: &str, drawn: &[DrawnCard], locale: Locale) -> String {
    let question = question.trim();
    let majors = drawn
        .iter()
        .filter(|drawn| drawn.card.arcana == Arcana::Major)
        .count();
    let reversed = drawn.iter().filter(|drawn| drawn.reversed).count();

    let mut parts = Vec::new();

    if !question.is_empty() {
        parts.push(match locale {
            Locale::En => format!("On \"{question}\":"),
            Locale::Ko => format!("\"{question}\"에 대하여:"),
        });
    }

    if drawn.is_empty() {
        parts.push(
            locale
                .pick("No cards were drawn.", "뽑힌 카드가 없습니다.")
                .to_string(),
        );
        return parts.join(" ");
    }

    if majors * 2 >= drawn.len() {
        parts.push(
            locale
                .pick(
                    "Major forces are at work; this is a significant moment.",
                    "메이저 아르카나가 많이 나왔습니다. 중요한 전환의 시기입니다.",
                )
                .to_string(),
        );
    }

    if let Some(suit) = dominant_suit(drawn) {
        parts.push(match locale {
            Locale::En => format!("The cards lean toward {}.", suit.theme()),
            Locale::Ko => format!("카드는 {}에 무게를 두고 있습니다.", suit.theme_ko()),
        });
    }

    parts.push(if reversed * 2 > drawn.len() {
        locale
            .pick(
                "Many cards are reversed, so inner blocks deserve attention first.",
                "역방향 카드가 많으니 먼저 내면의 걸림돌을 살펴보세요.",
            )
            .to_string()
    } else {
        locale
            .pick(
                "The overall flow is open and moving forward.",
                "전체적인 흐름이 열려 있고 앞으로 나아가고 있습니다.",
            )
            .to_string()
    });

    parts.join(" ")
}

fn dominant_suit(drawn: &[DrawnCard]) -> Option<Suit> {
    let mut counts: HashMap<Suit, usize> = HashMap::new();
    for suit in drawn.iter().filter_map(|drawn| drawn.card.suit) {
        *counts.entry(suit).or_default() += 1;
    }

    let (&suit, &count) = counts
        .iter()
        .max_by_key(|(suit, count)| (**count, std::cmp::Reverse(suit_rank(**suit))))?;
    (count >= 2).then_some(suit)
}

fn suit_rank(suit: Suit) -> usize {
    Suit::ALL
        .iter()
        .position(|candidate| *candidate == suit)
        .unwrap_or_default()
}

/// Render a saved reading timestamp (epoch milliseconds, UTC).
pub fn format_reading_date(timestamp_ms: i64, locale: Locale) -> String {
    let Some(moment) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return String::new();
    };
    let pattern = locale.pick("%Y-%m-%d %H:%M", "%Y년 %m월 %d일 %H:%M");
    moment.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarot::{deck::find_card, spread::find_spread};
    use std::collections::HashSet;

    /// Deterministic xorshift generator for repeatable draws.
    struct StepRng(u64);

    impl RngCore for StepRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn drawn(name: &str, reversed: bool) -> DrawnCard {
        DrawnCard {
            card: find_card(name).expect("card"),
            reversed,
            position: "Past",
            position_ko: "과거",
        }
    }

    #[test]
    fn draws_distinct_cards_for_every_position() {
        let spread = find_spread("celtic-cross").expect("spread");
        let mut rng = StepRng(0x9E37_79B9_7F4A_7C15);
        let cards = draw_cards(spread, &mut rng);

        assert_eq!(cards.len(), 10);
        let names: HashSet<_> = cards.iter().map(|drawn| drawn.card.name.as_str()).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(cards[0].position, "Present");
        assert_eq!(cards[9].position, "Outcome");
    }

    #[test]
    fn same_seed_draws_same_cards() {
        let spread = find_spread("three-card").expect("spread");
        let first: Vec<_> = draw_cards(spread, &mut StepRng(42))
            .into_iter()
            .map(|drawn| (drawn.card.name.clone(), drawn.reversed))
            .collect();
        let second: Vec<_> = draw_cards(spread, &mut StepRng(42))
            .into_iter()
            .map(|drawn| (drawn.card.name.clone(), drawn.reversed))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn interpretation_uses_first_card_for_guidance() {
        let cards = vec![drawn("The Hermit", false), drawn("Two of Cups", true)];
        let reading = interpret("Will it work out?", &cards, Locale::En);

        assert_eq!(reading.guidance, "Take quiet time alone to hear your own answer.");
        assert_eq!(reading.card_insights.len(), 2);
        assert_eq!(reading.card_insights[1].card_name, "Two of Cups");
        assert!(reading.card_insights[1].is_reversed);
        assert!(reading.card_insights[1].insight.starts_with("Two of Cups (reversed): "));
        assert!(reading.overall_message.starts_with("On \"Will it work out?\":"));
    }

    #[test]
    fn interpretation_is_localized() {
        let cards = vec![drawn("Ace of Cups", false), drawn("Three of Cups", false)];
        let reading = interpret("", &cards, Locale::Ko);

        assert_eq!(reading.card_insights[0].position, "과거");
        assert_eq!(reading.card_insights[0].card_name, "컵 에이스");
        assert!(reading.card_insights[0].insight.starts_with("컵 에이스 (정방향): "));
        assert!(reading.overall_message.contains("감정과 관계"));
    }

    #[test]
    fn empty_draw_still_produces_a_message() {
        let reading = interpret("", &[], Locale::En);
        assert_eq!(reading.overall_message, "No cards were drawn.");
        assert!(reading.guidance.is_empty());
    }

    #[test]
    fn formats_dates_per_locale() {
        let ms = 1_700_000_000_000;
        assert_eq!(format_reading_date(ms, Locale::En), "2023-11-14 22:13");
        assert_eq!(format_reading_date(ms, Locale::Ko), "2023년 11월 14일 22:13");
        assert_eq!(format_reading_date(i64::MAX, Locale::En), "");
    }
}
