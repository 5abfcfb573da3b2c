use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn inverted(self) -> Self {
        Self(255 - self.0, 255 - self.1, 255 - self.2)
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

pub const CYAN: Rgb = Rgb(0x00, 0xd4, 0xff);
pub const PINK: Rgb = Rgb(0xff, 0x4d, 0x7d);
pub const PURPLE: Rgb = Rgb(0x9d, 0x5b, 0xff);
pub const GREEN: Rgb = Rgb(0x00, 0xff, 0x7f);
pub const ORANGE: Rgb = Rgb(0xff, 0xa5, 0x00);
pub const BLUE: Rgb = Rgb(0x4a, 0x9e, 0xff);
pub const RED: Rgb = Rgb(0xff, 0x33, 0x33);
pub const YELLOW: Rgb = Rgb(0xff, 0xdd, 0x00);

pub const BACKGROUND: Rgb = Rgb(0x0f, 0x1b, 0x3d);
pub const MUTED: Rgb = Rgb(0xa0, 0xae, 0xc0);
pub const BORDER: Rgb = Rgb(0x2d, 0x3e, 0x6f);
pub const PANEL: Rgb = Rgb(0x1e, 0x2e, 0x5f);
pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

/// Shared, read-only series palette.
pub const SERIES: [Rgb; 5] = [CYAN, PINK, PURPLE, GREEN, ORANGE];

/// Energy-source ordering used by the category charts.
pub const SOURCES: [Rgb; 5] = [ORANGE, CYAN, PURPLE, GREEN, PINK];

pub const fn cycle(index: usize) -> Rgb {
    SERIES[index % SERIES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around_the_series_palette() {
        assert_eq!(cycle(0), CYAN);
        assert_eq!(cycle(4), ORANGE);
        assert_eq!(cycle(5), CYAN);
    }

    #[test]
    fn hex_and_inversion() {
        assert_eq!(CYAN.hex(), "#00d4ff");
        assert_eq!(CYAN.inverted(), Rgb(0xff, 0x2b, 0x00));
        assert_eq!(WHITE.inverted().inverted(), WHITE);
    }
}
