//! Recipe files describe a world to simulate, one command per line:
//!
//! ```text
//! # comments start with a hash
//! window 800 600
//! friction 0.2
//! particles red 1000
//! particles blue 500
//! rule red blue 3.5 40 0.4
//! ```
//!
//! `window <width> <height>` must come first and appear exactly once. `particles <color>
//! <amount>` scatters particles at random, and `rule <source> <target> <near> <far> <peak>`
//! adds a force rule.
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::particles::{Color, Rule, RuleSet};
use crate::utils::SimulationError;

/// One parsed recipe command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecipeStep {
    Window { width: i32, height: i32 },
    Friction(f32),
    Particles { color: Color, amount: usize },
    Rule(Rule),
}

/// A parsed recipe; steps are kept in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    steps: Vec<RecipeStep>,
}

impl Recipe {
    /// Parses recipe text, collecting every error before failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_life::recipes::{Recipe, RecipeStep};
    ///
    /// let recipe = Recipe::parse("window 200 100\nfriction 0.1\nrule red red 5 15 0.5\n").unwrap();
    /// assert_eq!(recipe.steps()[0], RecipeStep::Window { width: 200, height: 100 });
    /// assert_eq!(recipe.board_size(), Some((200, 100)));
    /// assert_eq!(recipe.rules().len(), 1);
    ///
    /// assert!(Recipe::parse("friction 0.1\nwindow 200 100\n").is_err());
    /// ```
    ///
    /// # Errors
    /// Returns `SimulationError::InvalidRecipe` listing one message per bad line.
    pub fn parse(text: &str) -> Result<Self, SimulationError> {
        let mut steps = Vec::new();
        let mut errors = Vec::new();
        let mut seen_window = false;

        for (number, line) in text.lines().enumerate() {
            let number = number + 1;
            if line.trim_start().starts_with('#') {
                continue;
            }
            let words: Vec<&str> = line.split_whitespace().collect();
            let Some(&command) = words.first() else {
                continue;
            };

            if !seen_window && command != "window" {
                errors.push(format!("line {}: recipe must start with a `window` command", number));
                break;
            }
            if seen_window && command == "window" {
                errors.push(format!("line {}: recipe must only have one `window` command", number));
                break;
            }

            let step = match command {
                "window" => {
                    seen_window = true;
                    parse_window(&words)
                }
                "friction" => parse_friction(&words),
                "particles" => parse_particles(&words),
                "rule" => parse_rule(&words),
                other => Err(format!("unknown command \"{}\"", other)),
            };

            match step {
                Ok(step) => steps.push(step),
                Err(message) => errors.push(format!("line {}: {}", number, message)),
            }
        }

        if !seen_window && errors.is_empty() {
            errors.push("recipe must contain a `window` command".to_string());
        }

        if errors.is_empty() {
            Ok(Recipe { steps })
        } else {
            Err(SimulationError::InvalidRecipe(errors))
        }
    }

    /// Reads and parses a recipe file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path)?;
        Recipe::parse(&text)
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn board_size(&self) -> Option<(i32, i32)> {
        self.steps.iter().find_map(|step| match step {
            RecipeStep::Window { width, height } => Some((*width, *height)),
            _ => None,
        })
    }

    /// The last `friction` command, if any.
    pub fn friction(&self) -> Option<f32> {
        self.steps.iter().rev().find_map(|step| match step {
            RecipeStep::Friction(value) => Some(*value),
            _ => None,
        })
    }

    /// All `rule` commands, in order.
    pub fn rules(&self) -> RuleSet {
        self.steps
            .iter()
            .filter_map(|step| match step {
                RecipeStep::Rule(rule) => Some(*rule),
                _ => None,
            })
            .collect()
    }

    /// `(color, amount)` for every `particles` command, in order.
    pub fn populations(&self) -> impl Iterator<Item = (Color, usize)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            RecipeStep::Particles { color, amount } => Some((*color, *amount)),
            _ => None,
        })
    }
}

impl FromStr for Recipe {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recipe::parse(s)
    }
}

fn expect_arguments(words: &[&str], expected: usize) -> Result<(), String> {
    if words.len() != expected + 1 {
        return Err(format!(
            "invalid number of arguments for `{}` ({} expected)",
            words[0], expected
        ));
    }
    Ok(())
}

fn parse_color(word: &str) -> Result<Color, String> {
    word.parse::<Color>().map_err(|e| e.to_string())
}

fn parse_float(word: &str) -> Result<f32, String> {
    word.parse::<f32>()
        .map_err(|_| format!("\"{}\" is not a floating point number", word))
}

fn parse_int(word: &str) -> Result<i32, String> {
    word.parse::<i32>()
        .map_err(|_| format!("\"{}\" is not a valid integer number", word))
}

fn parse_window(words: &[&str]) -> Result<RecipeStep, String> {
    expect_arguments(words, 2)?;
    Ok(RecipeStep::Window {
        width: parse_int(words[1])?,
        height: parse_int(words[2])?,
    })
}

fn parse_friction(words: &[&str]) -> Result<RecipeStep, String> {
    expect_arguments(words, 1)?;
    Ok(RecipeStep::Friction(parse_float(words[1])?))
}

fn parse_particles(words: &[&str]) -> Result<RecipeStep, String> {
    expect_arguments(words, 2)?;
    let color = parse_color(words[1])?;
    let amount = words[2]
        .parse::<usize>()
        .map_err(|_| format!("\"{}\" is not a valid non-negative integer", words[2]))?;
    Ok(RecipeStep::Particles { color, amount })
}

fn parse_rule(words: &[&str]) -> Result<RecipeStep, String> {
    expect_arguments(words, 5)?;
    Ok(RecipeStep::Rule(Rule::new(
        parse_color(words[1])?,
        parse_color(words[2])?,
        parse_float(words[3])?,
        parse_float(words[4])?,
        parse_float(words[5])?,
    )))
}
