use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
        }
    }

    pub fn name_ko(&self) -> &'static str {
        match self {
            Suit::Wands => "완드",
            Suit::Cups => "컵",
            Suit::Swords => "검",
            Suit::Pentacles => "펜타클",
        }
    }

    pub fn theme(&self) -> &'static str {
        match self {
            Suit::Wands => "passion and ambition",
            Suit::Cups => "emotions and relationships",
            Suit::Swords => "thought and truth",
            Suit::Pentacles => "work and material life",
        }
    }

    pub fn theme_ko(&self) -> &'static str {
        match self {
            Suit::Wands => "열정과 도전",
            Suit::Cups => "감정과 관계",
            Suit::Swords => "생각과 진실",
            Suit::Pentacles => "일과 현실적인 삶",
        }
    }
}

/// Keywords, interpretation and optional authored advice for one orientation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardMeaning {
    pub keywords: Vec<String>,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TarotCard {
    pub name: String,
    pub name_ko: String,
    pub arcana: Arcana,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    pub upright: CardMeaning,
    pub reversed: CardMeaning,
}

impl TarotCard {
    pub fn meaning(&self, reversed: bool) -> &CardMeaning {
        if reversed { &self.reversed } else { &self.upright }
    }
}

struct MajorEntry {
    name: &'static str,
    name_ko: &'static str,
    upright: (&'static [&'static str], &'static str),
    reversed: (&'static [&'static str], &'static str),
    advice: Option<(&'static str, &'static str)>,
}

const MAJOR_ARCANA: [MajorEntry; 22] = [
    MajorEntry {
        name: "The Fool",
        name_ko: "바보",
        upright: (
            &["new beginnings", "spontaneity", "faith"],
            "A leap into the unknown with an open heart. Trust the journey even without a map.",
        ),
        reversed: (
            &["recklessness", "hesitation", "naivety"],
            "Carelessness or fear is holding the first step back. Look before you leap, but do leap.",
        ),
        advice: Some((
            "Say yes to the new path, and pack just enough caution for the road.",
            "Look carefully at the ground beneath you before the next step.",
        )),
    },
    MajorEntry {
        name: "The Magician",
        name_ko: "마법사",
        upright: (
            &["willpower", "skill", "manifestation"],
            "Every tool you need is already on the table. Focused intent turns ideas into results.",
        ),
        reversed: (
            &["manipulation", "untapped talent", "scattered focus"],
            "Talent is being wasted or misdirected. Check whether your methods match your intentions.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The High Priestess",
        name_ko: "여사제",
        upright: (
            &["intuition", "mystery", "inner voice"],
            "Answers lie beneath the surface. Quiet listening reveals what logic cannot.",
        ),
        reversed: (
            &["secrets", "disconnection", "ignored intuition"],
            "You are tuning out your own inner knowing. Hidden agendas may be at play.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Empress",
        name_ko: "여황제",
        upright: (
            &["abundance", "nurturing", "creativity"],
            "Growth flourishes under patient care. Let yourself receive as well as give.",
        ),
        reversed: (
            &["dependence", "creative block", "neglect"],
            "Care has turned into smothering or self-neglect. Tend your own garden first.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Emperor",
        name_ko: "황제",
        upright: (
            &["structure", "authority", "stability"],
            "Order and clear boundaries create safety. Lead with steady responsibility.",
        ),
        reversed: (
            &["rigidity", "domination", "lack of discipline"],
            "Control has become either too tight or too loose. Rebuild fair structure.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Hierophant",
        name_ko: "교황",
        upright: (
            &["tradition", "guidance", "shared values"],
            "Established wisdom and mentors offer a reliable path. Learn from those before you.",
        ),
        reversed: (
            &["rebellion", "dogma", "unconventional paths"],
            "Old rules no longer fit. Question convention without discarding its lessons.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Lovers",
        name_ko: "연인",
        upright: (
            &["love", "union", "alignment"],
            "A meaningful bond asks for a wholehearted choice. Values and desire align.",
        ),
        reversed: (
            &["disharmony", "misalignment", "temptation"],
            "A relationship or decision is out of balance. Re-examine what you truly value.",
        ),
        advice: Some((
            "Choose with your whole heart, and let your values cast the deciding vote.",
            "Name the value you have been compromising, and decide whether it is negotiable.",
        )),
    },
    MajorEntry {
        name: "The Chariot",
        name_ko: "전차",
        upright: (
            &["determination", "victory", "control"],
            "Opposing forces are harnessed toward one goal. Momentum favors the disciplined.",
        ),
        reversed: (
            &["loss of direction", "aggression", "scattered effort"],
            "You are pulled in too many directions. Regain the reins before pushing harder.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "Strength",
        name_ko: "힘",
        upright: (
            &["courage", "compassion", "patience"],
            "Gentle strength tames what force cannot. Quiet confidence wins the day.",
        ),
        reversed: (
            &["self-doubt", "impatience", "raw emotion"],
            "Inner doubt or unchecked emotion is draining your power. Be kind to yourself.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Hermit",
        name_ko: "은둔자",
        upright: (
            &["introspection", "solitude", "inner guidance"],
            "Step back from the noise to find your own light. Solitude brings clarity.",
        ),
        reversed: (
            &["isolation", "loneliness", "withdrawal"],
            "Retreat has turned into isolation. Reconnect with people who steady you.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "Wheel of Fortune",
        name_ko: "운명의 수레바퀴",
        upright: (
            &["cycles", "turning point", "luck"],
            "Circumstances are shifting in your favor. Ride the turn rather than resisting it.",
        ),
        reversed: (
            &["setbacks", "resistance to change", "bad luck"],
            "The wheel is turning down for now. What goes down will rise again.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "Justice",
        name_ko: "정의",
        upright: (
            &["fairness", "truth", "accountability"],
            "Cause and effect are in plain view. Honest choices bring balanced outcomes.",
        ),
        reversed: (
            &["unfairness", "dishonesty", "avoidance"],
            "Something is out of balance or unacknowledged. Own your part to restore it.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Hanged Man",
        name_ko: "매달린 사람",
        upright: (
            &["surrender", "new perspective", "pause"],
            "Letting go reveals a view you could not see before. The pause is productive.",
        ),
        reversed: (
            &["stalling", "martyrdom", "indecision"],
            "Waiting has become avoidance. Decide what you are truly holding on for.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "Death",
        name_ko: "죽음",
        upright: (
            &["endings", "transformation", "release"],
            "One chapter closes so another can begin. Endings clear space for renewal.",
        ),
        reversed: (
            &["resistance", "stagnation", "fear of change"],
            "Clinging to what is over delays your renewal. Let the old form go.",
        ),
        advice: Some((
            "Let what has ended be finished; grieve it, thank it, and make room.",
            "Identify the one thing you keep reviving out of fear, and release it.",
        )),
    },
    MajorEntry {
        name: "Temperance",
        name_ko: "절제",
        upright: (
            &["balance", "moderation", "patience"],
            "Blending opposites with patience creates something whole. Find the middle way.",
        ),
        reversed: (
            &["excess", "imbalance", "haste"],
            "Extremes are pulling you off center. Slow down and recalibrate.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Devil",
        name_ko: "악마",
        upright: (
            &["attachment", "temptation", "shadow"],
            "Habits or bonds hold more power than they should. The chains are looser than they look.",
        ),
        reversed: (
            &["release", "breaking free", "reclaiming power"],
            "You are loosening an unhealthy hold. Keep choosing freedom.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Tower",
        name_ko: "탑",
        upright: (
            &["upheaval", "revelation", "sudden change"],
            "False structures collapse to reveal the truth. Disruption clears the ground.",
        ),
        reversed: (
            &["averted disaster", "fear of change", "delayed collapse"],
            "You are bracing against a necessary change. Controlled rebuilding is still possible.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Star",
        name_ko: "별",
        upright: (
            &["hope", "renewal", "inspiration"],
            "After the storm comes healing light. Trust that you are being restored.",
        ),
        reversed: (
            &["discouragement", "faithlessness", "disconnection"],
            "Hope feels distant right now. Small acts of faith rekindle it.",
        ),
        advice: Some((
            "Keep your hope visible: write down the wish and take one step toward it.",
            "Reach for one small source of light today instead of waiting for a sign.",
        )),
    },
    MajorEntry {
        name: "The Moon",
        name_ko: "달",
        upright: (
            &["illusion", "intuition", "uncertainty"],
            "Not everything is as it seems. Move carefully and let intuition light the path.",
        ),
        reversed: (
            &["clarity", "released fear", "truth revealed"],
            "Confusion is lifting and hidden truths surface. Trust what becomes clear.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The Sun",
        name_ko: "태양",
        upright: (
            &["joy", "success", "vitality"],
            "Warmth and clarity shine on everything. Celebrate and share your light.",
        ),
        reversed: (
            &["temporary gloom", "overconfidence", "delayed success"],
            "Joy is dimmed but not gone. Adjust expectations and keep going.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "Judgement",
        name_ko: "심판",
        upright: (
            &["awakening", "reckoning", "renewal"],
            "A calling asks you to rise. Reflect honestly and answer it.",
        ),
        reversed: (
            &["self-doubt", "harsh self-judgement", "ignored calling"],
            "Fear of judgement keeps you from moving on. Forgive yourself and listen.",
        ),
        advice: None,
    },
    MajorEntry {
        name: "The World",
        name_ko: "세계",
        upright: (
            &["completion", "integration", "fulfillment"],
            "A cycle reaches its meaningful end. Celebrate how far you have come.",
        ),
        reversed: (
            &["incompletion", "loose ends", "delays"],
            "The finish line is near but something is unfinished. Tie up loose ends.",
        ),
        advice: None,
    },
];

struct RankEntry {
    name: &'static str,
    name_ko: &'static str,
    upright: (&'static [&'static str], &'static str),
    reversed: (&'static [&'static str], &'static str),
}

const RANKS: [RankEntry; 14] = [
    RankEntry {
        name: "Ace",
        name_ko: "에이스",
        upright: (&["new beginnings", "potential"], "A fresh opportunity is opening"),
        reversed: (&["delays", "blocked start"], "The opportunity needs more preparation"),
    },
    RankEntry {
        name: "Two",
        name_ko: "2",
        upright: (&["choice", "balance"], "Two paths ask to be weighed"),
        reversed: (&["indecision", "imbalance"], "Avoiding the choice keeps things off balance"),
    },
    RankEntry {
        name: "Three",
        name_ko: "3",
        upright: (&["growth", "collaboration"], "Early efforts begin to expand with others"),
        reversed: (&["setbacks", "miscommunication"], "Plans stall when people are not aligned"),
    },
    RankEntry {
        name: "Four",
        name_ko: "4",
        upright: (&["stability", "rest"], "A solid foundation invites you to pause"),
        reversed: (&["stagnation", "restlessness"], "Comfort is sliding into stagnation"),
    },
    RankEntry {
        name: "Five",
        name_ko: "5",
        upright: (&["conflict", "loss"], "Friction and disappointment test your resolve"),
        reversed: (&["recovery", "release"], "The worst of the conflict is passing"),
    },
    RankEntry {
        name: "Six",
        name_ko: "6",
        upright: (&["harmony", "generosity"], "Support flows and balance returns"),
        reversed: (&["nostalgia", "uneven giving"], "Giving and receiving have become lopsided"),
    },
    RankEntry {
        name: "Seven",
        name_ko: "7",
        upright: (&["perseverance", "assessment"], "Hold your ground and measure your progress"),
        reversed: (&["doubt", "distraction"], "Doubt is scattering your defenses"),
    },
    RankEntry {
        name: "Eight",
        name_ko: "8",
        upright: (&["movement", "mastery"], "Things accelerate as skill builds"),
        reversed: (&["frustration", "scattered energy"], "Effort is spread too thin to land"),
    },
    RankEntry {
        name: "Nine",
        name_ko: "9",
        upright: (&["resilience", "near completion"], "You are close to the finish line"),
        reversed: (&["exhaustion", "anxiety"], "Worry is wearing down your reserves"),
    },
    RankEntry {
        name: "Ten",
        name_ko: "10",
        upright: (&["completion", "culmination"], "A cycle reaches its fullest expression"),
        reversed: (&["burden", "overextension"], "You are carrying more than your share"),
    },
    RankEntry {
        name: "Page",
        name_ko: "페이지",
        upright: (&["curiosity", "message"], "A curious beginner brings news"),
        reversed: (&["immaturity", "unwelcome news"], "Enthusiasm lacks follow-through"),
    },
    RankEntry {
        name: "Knight",
        name_ko: "나이트",
        upright: (&["action", "pursuit"], "Bold pursuit moves things forward"),
        reversed: (&["haste", "recklessness"], "Charging ahead without a plan causes spills"),
    },
    RankEntry {
        name: "Queen",
        name_ko: "퀸",
        upright: (&["nurturing", "inner mastery"], "Mature care holds the space steady"),
        reversed: (&["insecurity", "dependence"], "Care turns inward into insecurity"),
    },
    RankEntry {
        name: "King",
        name_ko: "킹",
        upright: (&["leadership", "authority"], "Experienced command sets the direction"),
        reversed: (&["rigidity", "control"], "Authority hardens into control"),
    },
];

static DECK: LazyLock<Vec<TarotCard>> = LazyLock::new(build_deck);

/// The full 78-card deck: 22 major arcana followed by the four minor suits.
pub fn deck() -> &'static [TarotCard] {
    &DECK
}

/// Case-insensitive lookup by English card name.
pub fn find_card(name: &str) -> Option<&'static TarotCard> {
    let name = name.trim();
    deck()
        .iter()
        .find(|card| card.name.eq_ignore_ascii_case(name))
}

fn build_deck() -> Vec<TarotCard> {
    let majors = MAJOR_ARCANA.iter().map(|entry| TarotCard {
        name: entry.name.to_string(),
        name_ko: entry.name_ko.to_string(),
        arcana: Arcana::Major,
        suit: None,
        upright: meaning(entry.upright, entry.advice.map(|(upright, _)| upright)),
        reversed: meaning(entry.reversed, entry.advice.map(|(_, reversed)| reversed)),
    });

    let minors = Suit::ALL.into_iter().flat_map(|suit| {
        RANKS.iter().map(move |rank| TarotCard {
            name: format!("{} of {}", rank.name, suit.name()),
            name_ko: format!("{} {}", suit.name_ko(), rank.name_ko),
            arcana: Arcana::Minor,
            suit: Some(suit),
            upright: minor_meaning(rank.upright, suit),
            reversed: minor_meaning(rank.reversed, suit),
        })
    });

    majors.chain(minors).collect()
}

fn meaning(
    (keywords, text): (&'static [&'static str], &'static str),
    advice: Option<&'static str>,
) -> CardMeaning {
    CardMeaning {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        meaning: text.to_string(),
        advice: advice.map(str::to_string),
    }
}

fn minor_meaning((keywords, note): (&'static [&'static str], &'static str), suit: Suit) -> CardMeaning {
    CardMeaning {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        meaning: format!("{note} in matters of {}. Watch how this shows up day to day.", suit.theme()),
        advice: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deck_has_78_unique_cards() {
        assert_eq!(deck().len(), 78);
        let names: HashSet<_> = deck().iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names.len(), 78);
        assert_eq!(
            deck().iter().filter(|card| card.arcana == Arcana::Major).count(),
            22
        );
    }

    #[test]
    fn finds_cards_case_insensitively() {
        let card = find_card("queen of cups").expect("card");
        assert_eq!(card.name, "Queen of Cups");
        assert_eq!(card.name_ko, "컵 퀸");
        assert_eq!(card.suit, Some(Suit::Cups));
        assert!(find_card("The Jester").is_none());
    }

    #[test]
    fn every_orientation_has_keywords_and_meaning() {
        for card in deck() {
            for reversed in [false, true] {
                let meaning = card.meaning(reversed);
                assert!(!meaning.keywords.is_empty(), "{}", card.name);
                assert!(!meaning.meaning.is_empty(), "{}", card.name);
            }
        }
    }
}
