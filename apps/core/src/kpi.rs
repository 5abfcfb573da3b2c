use serde::Serialize;

use crate::animation::CounterAnimation;
use crate::palette::{self, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub title: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
    pub accent: Rgb,
}

pub const KPI_CARDS: [KpiCard; 4] = [
    KpiCard {
        title: "Total production",
        value: "1234 MW",
        detail: "+5.2% vs yesterday",
        accent: palette::CYAN,
    },
    KpiCard {
        title: "Installed capacity",
        value: "28.5 GW",
        detail: "7 regions",
        accent: palette::PURPLE,
    },
    KpiCard {
        title: "Network usage",
        value: "87%",
        detail: "64% capacity available",
        accent: palette::PINK,
    },
    KpiCard {
        title: "Solar performance",
        value: "79%",
        detail: "342 MW right now",
        accent: palette::ORANGE,
    },
];

/// Byte range of the first run of ASCII digits in `text`.
fn first_digits(text: &str) -> Option<(usize, usize)> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let len = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - start);
    Some((start, start + len))
}

/// First integer in `text`, ignoring any sign or fraction.
pub fn first_integer(text: &str) -> Option<i64> {
    let (start, end) = first_digits(text)?;
    text[start..end].parse().ok()
}

/// Replaces the first integer of `text` with `value`.
pub fn with_counter(text: &str, value: i64) -> String {
    match first_digits(text) {
        Some((start, end)) => format!("{}{value}{}", &text[..start], &text[end..]),
        None => text.to_string(),
    }
}

/// The KPI strip: animated values plus the card that has focus.
#[derive(Debug, Clone)]
pub struct KpiBoard {
    cards: Vec<KpiCard>,
    counters: Vec<Option<CounterAnimation>>,
    focused: Option<usize>,
}

impl Default for KpiBoard {
    fn default() -> Self {
        Self::new(KPI_CARDS.to_vec())
    }
}

impl KpiBoard {
    pub fn new(cards: Vec<KpiCard>) -> Self {
        let counters = cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                first_integer(card.value).map(|target| CounterAnimation::new(index, target))
            })
            .collect();
        Self {
            cards,
            counters,
            focused: None,
        }
    }

    pub fn cards(&self) -> &[KpiCard] {
        &self.cards
    }

    /// Restarts every counter from zero.
    pub fn restart(&mut self) {
        *self = Self {
            focused: self.focused,
            ..Self::new(std::mem::take(&mut self.cards))
        };
    }

    pub fn tick(&mut self, now_ms: f64) {
        for counter in self.counters.iter_mut().flatten() {
            counter.advance(now_ms);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.counters
            .iter()
            .flatten()
            .any(|counter| !counter.is_finished())
    }

    /// Text shown for card `index`; cards without a number are static.
    pub fn display(&self, index: usize) -> String {
        let Some(card) = self.cards.get(index) else {
            return String::new();
        };
        match self.counters.get(index).copied().flatten() {
            Some(counter) => with_counter(card.value, counter.value()),
            None => card.value.to_string(),
        }
    }

    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focus_next(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.focused = Some(self.focused.map_or(0, |index| (index + 1) % len));
    }

    pub fn focus_previous(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.focused = Some(
            self.focused
                .map_or(len - 1, |index| if index == 0 { len - 1 } else { index - 1 }),
        );
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }
}
