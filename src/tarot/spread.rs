use serde::Serialize;

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Position {
    pub label: &'static str,
    pub label_ko: &'static str,
}

impl Position {
    const fn new(label: &'static str, label_ko: &'static str) -> Self {
        Self { label, label_ko }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Spread {
    pub id: &'static str,
    pub title: &'static str,
    pub title_ko: &'static str,
    pub positions: &'static [Position],
}

impl Spread {
    pub fn card_count(&self) -> usize {
        self.positions.len()
    }

    pub fn localized_title(&self, locale: Locale) -> &'static str {
        locale.pick(self.title, self.title_ko)
    }
}

pub const SPREADS: [Spread; 4] = [
    Spread {
        id: "single",
        title: "Single Card",
        title_ko: "원 카드",
        positions: &[Position::new("Message", "메시지")],
    },
    Spread {
        id: "three-card",
        title: "Past, Present, Future",
        title_ko: "과거, 현재, 미래",
        positions: &[
            Position::new("Past", "과거"),
            Position::new("Present", "현재"),
            Position::new("Future", "미래"),
        ],
    },
    Spread {
        id: "relationship",
        title: "Relationship",
        title_ko: "관계",
        positions: &[
            Position::new("You", "나"),
            Position::new("Partner", "상대방"),
            Position::new("Connection", "두 사람의 연결"),
            Position::new("Challenge", "과제"),
            Position::new("Outcome", "결과"),
        ],
    },
    Spread {
        id: "celtic-cross",
        title: "Celtic Cross",
        title_ko: "켈틱 크로스",
        positions: &[
            Position::new("Present", "현재"),
            Position::new("Challenge", "장애물"),
            Position::new("Foundation", "근본"),
            Position::new("Recent Past", "가까운 과거"),
            Position::new("Crown", "목표"),
            Position::new("Near Future", "가까운 미래"),
            Position::new("Self", "자신"),
            Position::new("Environment", "주변 환경"),
            Position::new("Hopes and Fears", "희망과 두려움"),
            Position::new("Outcome", "결과"),
        ],
    },
];

pub fn spreads() -> &'static [Spread] {
    &SPREADS
}

pub fn find_spread(id: &str) -> Option<&'static Spread> {
    SPREADS.iter().find(|spread| spread.id == id.trim())
}
