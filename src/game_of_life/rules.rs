//! Rule sets deciding the next state of a cell

use super::error::{BoardError, BoardResult, RuleParseError};
use std::fmt;
use std::str::FromStr;

/// Maximum number of living neighbors in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// Interface between the board engine and the rules of an automaton.
///
/// Implementations are stateless: `apply` must return the same answer for the
/// same inputs no matter how often or in which order it is called.
pub trait RuleSet: fmt::Debug + Send + Sync {
    /// Human-readable name of the rule set
    fn name(&self) -> &str;

    /// Compute the next state of a cell from its current state and the number
    /// of living cells in its Moore neighborhood.
    ///
    /// `neighbor_count` must be in `0..=8`; implementations return `false`
    /// for larger counts rather than panicking. Use [`RuleSet::next_state`]
    /// when the count comes from an untrusted source.
    fn apply(&self, is_alive: bool, neighbor_count: u8) -> bool;

    /// Checked variant of [`RuleSet::apply`].
    fn next_state(&self, is_alive: bool, neighbor_count: u8) -> BoardResult<bool> {
        if !is_valid_neighbor_count(neighbor_count) {
            return Err(BoardError::InvalidNeighborCount(neighbor_count));
        }
        Ok(self.apply(is_alive, neighbor_count))
    }
}

/// Check if a neighbor count is valid (0-8)
pub fn is_valid_neighbor_count(count: u8) -> bool {
    count <= MAX_NEIGHBORS
}

/// Conway's Game of Life (B3/S23)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conway;

impl RuleSet for Conway {
    fn name(&self) -> &str {
        "Conway's Rules"
    }

    fn apply(&self, is_alive: bool, neighbor_count: u8) -> bool {
        match (is_alive, neighbor_count) {
            (true, 2) | (true, 3) | (false, 3) => true, // Survive or birth
            _ => false,
        }
    }
}

/// HighLife (B36/S23): Conway's rules plus birth on six neighbors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighLife;

impl RuleSet for HighLife {
    fn name(&self) -> &str {
        "HighLife"
    }

    fn apply(&self, is_alive: bool, neighbor_count: u8) -> bool {
        match (is_alive, neighbor_count) {
            (true, 2 | 3) | (false, 3 | 6) => true,
            _ => false,
        }
    }
}

/// Any outer-totalistic rule on the Moore neighborhood, written in `B/S`
/// notation such as `B3/S23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeLike {
    notation: String,
    birth: [bool; 9],
    survival: [bool; 9],
}

impl LifeLike {
    /// Build a rule from the neighbor counts that cause birth and survival.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, RuleParseError> {
        let mut birth_table = [false; 9];
        let mut survival_table = [false; 9];
        for (counts, table) in [(birth, &mut birth_table), (survival, &mut survival_table)] {
            for &count in counts {
                if !is_valid_neighbor_count(count) {
                    return Err(RuleParseError::CountOutOfRange(count));
                }
                table[count as usize] = true;
            }
        }
        Ok(Self::from_tables(birth_table, survival_table))
    }

    fn from_tables(birth: [bool; 9], survival: [bool; 9]) -> Self {
        let digits = |table: &[bool; 9]| -> String {
            table
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(count, _)| char::from(b'0' + count as u8))
                .collect()
        };
        let notation = format!("B{}/S{}", digits(&birth), digits(&survival));
        Self { notation, birth, survival }
    }

    /// Neighbor counts that bring a dead cell to life
    pub fn birth_counts(&self) -> Vec<u8> {
        counts_of(&self.birth)
    }

    /// Neighbor counts that keep a living cell alive
    pub fn survival_counts(&self) -> Vec<u8> {
        counts_of(&self.survival)
    }
}

fn counts_of(table: &[bool; 9]) -> Vec<u8> {
    (0..=MAX_NEIGHBORS).filter(|&count| table[count as usize]).collect()
}

impl RuleSet for LifeLike {
    fn name(&self) -> &str {
        &self.notation
    }

    /// Counts above 8 are a caller error and are treated as dead, the same
    /// as the fixed rule sets.
    fn apply(&self, is_alive: bool, neighbor_count: u8) -> bool {
        let table = if is_alive { &self.survival } else { &self.birth };
        table.get(neighbor_count as usize).copied().unwrap_or(false)
    }
}

impl FromStr for LifeLike {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::MalformedNotation(s.to_string());

        let (birth_part, survival_part) = s.trim().split_once('/').ok_or_else(malformed)?;
        let birth_digits = birth_part
            .strip_prefix(['B', 'b'])
            .ok_or_else(malformed)?;
        let survival_digits = survival_part
            .strip_prefix(['S', 's'])
            .ok_or_else(malformed)?;

        let parse_table = |digits: &str| -> Result<[bool; 9], RuleParseError> {
            let mut table = [false; 9];
            for ch in digits.chars() {
                match ch.to_digit(10) {
                    Some(count) if count <= MAX_NEIGHBORS as u32 => table[count as usize] = true,
                    _ => return Err(RuleParseError::InvalidDigit(ch)),
                }
            }
            Ok(table)
        };

        Ok(Self::from_tables(
            parse_table(birth_digits)?,
            parse_table(survival_digits)?,
        ))
    }
}

/// Names accepted by [`rule_set_from_name`] besides raw `B/S` notation
pub fn available_rule_sets() -> Vec<(&'static str, &'static str)> {
    vec![
        ("conway", "B3/S23 - Conway's Game of Life"),
        ("highlife", "B36/S23 - HighLife, with replicators"),
    ]
}

/// Select a rule set by name (`conway`, `highlife`) or by `B/S` notation.
pub fn rule_set_from_name(name: &str) -> Result<Box<dyn RuleSet>, RuleParseError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "conway" | "life" => Ok(Box::new(Conway)),
        "highlife" | "high_life" => Ok(Box::new(HighLife)),
        _ if name.contains('/') => Ok(Box::new(name.parse::<LifeLike>()?)),
        _ => Err(RuleParseError::UnknownRule(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_rule_table() {
        let rules = Conway;
        for count in 0..=8 {
            assert_eq!(rules.apply(false, count), count == 3, "dead cell, {} neighbors", count);
            assert_eq!(
                rules.apply(true, count),
                count == 2 || count == 3,
                "live cell, {} neighbors",
                count
            );
        }
        assert_eq!(rules.name(), "Conway's Rules");
    }

    #[test]
    fn test_conway_named_cases() {
        let rules = Conway;
        assert!(!rules.apply(false, 0)); // No-op
        assert!(rules.apply(false, 3)); // Comes to life
        assert!(!rules.apply(true, 1)); // Lonely
        assert!(!rules.apply(true, 4)); // Overcrowded
        assert!(!rules.apply(true, 7));
    }

    #[test]
    fn test_highlife_births_on_six() {
        assert!(HighLife.apply(false, 6));
        assert!(HighLife.apply(false, 3));
        assert!(!HighLife.apply(true, 6));
        assert!(HighLife.apply(true, 2));
    }

    #[test]
    fn test_next_state_rejects_out_of_range_counts() {
        assert!(matches!(
            Conway.next_state(true, 9),
            Err(BoardError::InvalidNeighborCount(9))
        ));
        assert!(Conway.next_state(false, 3).unwrap());

        let rules: LifeLike = "B3/S23".parse().unwrap();
        for alive in [false, true] {
            assert!(matches!(
                rules.next_state(alive, 9),
                Err(BoardError::InvalidNeighborCount(9))
            ));
        }
        assert!(rules.next_state(true, 2).unwrap());
        // Unchecked path answers dead for any count past 8
        let permissive: LifeLike = "B012345678/S012345678".parse().unwrap();
        for alive in [false, true] {
            assert!(!permissive.apply(alive, 9));
            assert!(!permissive.apply(alive, u8::MAX));
        }
        assert!(matches!(
            HighLife.next_state(false, 200),
            Err(BoardError::InvalidNeighborCount(200))
        ));
    }

    #[test]
    fn test_life_like_matches_conway() {
        let rules: LifeLike = "B3/S23".parse().unwrap();
        for count in 0..=8 {
            for alive in [false, true] {
                assert_eq!(rules.apply(alive, count), Conway.apply(alive, count));
            }
        }
        assert_eq!(rules.name(), "B3/S23");
        assert_eq!(rules.birth_counts(), vec![3]);
        assert_eq!(rules.survival_counts(), vec![2, 3]);
    }

    #[test]
    fn test_life_like_notation_is_normalized() {
        let rules: LifeLike = "b63/s32".parse().unwrap();
        assert_eq!(rules.name(), "B36/S23");

        let seeds: LifeLike = "B2/S".parse().unwrap();
        assert!(seeds.survival_counts().is_empty());
        assert!(!seeds.apply(true, 2));
        assert!(seeds.apply(false, 2));
    }

    #[test]
    fn test_life_like_rejects_bad_notation() {
        assert!(matches!(
            "B39/S23".parse::<LifeLike>(),
            Err(RuleParseError::InvalidDigit('9'))
        ));
        assert!(matches!(
            "3/23".parse::<LifeLike>(),
            Err(RuleParseError::MalformedNotation(_))
        ));
        assert!("B3S23".parse::<LifeLike>().is_err());
        assert!(LifeLike::new(&[9], &[]).is_err());
    }

    #[test]
    fn test_rule_set_selection() {
        assert_eq!(rule_set_from_name("conway").unwrap().name(), "Conway's Rules");
        assert_eq!(rule_set_from_name("HighLife").unwrap().name(), "HighLife");
        assert_eq!(rule_set_from_name("B36/S23").unwrap().name(), "B36/S23");
        assert!(matches!(
            rule_set_from_name("wireworld"),
            Err(RuleParseError::UnknownRule(_))
        ));
        assert_eq!(available_rule_sets().len(), 2);
    }
}
