use log::warn;

use crate::particles::{Color, Particle};

/// A directed, color-keyed force profile.
///
/// Between `near_cutoff` and `far_cutoff` the force falls linearly from `peak` to zero; below
/// `near_cutoff` it turns strongly repulsive. Rules are not validated when built: a rule with
/// `far_cutoff < near_cutoff` is accepted and still evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub source: Color,
    pub target: Color,
    pub near_cutoff: f32,
    pub far_cutoff: f32,
    pub peak: f32,
}

impl Rule {
    pub fn new(source: Color, target: Color, near_cutoff: f32, far_cutoff: f32, peak: f32) -> Self {
        Rule { source, target, near_cutoff, far_cutoff, peak }
    }

    /// True if this rule acts on `subject` because of `other`.
    ///
    /// # Examples
    /// ```
    /// use particle_life::particles::{Color, Particle, Rule};
    ///
    /// let rule = Rule::new(Color::Red, Color::Blue, 2.0, 10.0, 0.3);
    /// let red = Particle::at_rest((1.0, 1.0), Color::Red);
    /// let blue = Particle::at_rest((2.0, 2.0), Color::Blue);
    /// assert!(rule.applies_to(&red, &blue));
    /// assert!(!rule.applies_to(&blue, &red));
    /// ```
    pub fn applies_to(&self, subject: &Particle, other: &Particle) -> bool {
        self.source == subject.color && self.target == other.color
    }

    /// `near_cutoff <= far_cutoff` and every parameter finite.
    pub fn is_well_formed(&self) -> bool {
        self.near_cutoff.is_finite()
            && self.far_cutoff.is_finite()
            && self.peak.is_finite()
            && self.near_cutoff <= self.far_cutoff
    }
}

/// The ordered, read-only collection of rules a simulation runs with.
///
/// Every matching rule applies to a pair; there is no first-match precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// Appends a rule. Malformed rules are kept but logged.
    pub fn add_rule(&mut self, rule: Rule) {
        if !rule.is_well_formed() {
            warn!(
                "Rule {} -> {} has cutoffs ({}, {}) and peak {}; evaluating it anyway",
                rule.source, rule.target, rule.near_cutoff, rule.far_cutoff, rule.peak
            );
        }
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules whose source color is `color`, in insertion order.
    pub fn rules_from(&self, color: Color) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |rule| rule.source == color)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.add_rule(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
