use std::fmt;
use std::str::FromStr;

use crate::utils::SimulationError;

/// The palette particles are drawn from.
///
/// Colors are only rule-matching keys inside the engine; the RGB triple exists so frames can
/// be recorded and replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
    ];

    /// Lower-case name, as written in recipes.
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
        }
    }

    /// # Examples
    /// ```
    /// use particle_life::particles::Color;
    ///
    /// assert_eq!(Color::Magenta.rgb(), [255, 0, 255]);
    /// assert_eq!(Color::from_rgb([255, 0, 255]), Some(Color::Magenta));
    /// ```
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Black => [0, 0, 0],
            Color::White => [255, 255, 255],
            Color::Red => [255, 0, 0],
            Color::Green => [0, 255, 0],
            Color::Blue => [0, 0, 255],
            Color::Yellow => [255, 255, 0],
            Color::Magenta => [255, 0, 255],
            Color::Cyan => [0, 255, 255],
        }
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.rgb() == rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SimulationError::UnknownColor(s.to_string()))
    }
}
