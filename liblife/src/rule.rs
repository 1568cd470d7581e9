use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::RuleParseError;

/// Largest possible neighbor count in the Moore neighborhood.
pub const MAX_NEIGHBORS: usize = 8;

/// A totalistic birth/survival rule, written as a rulestring like `B3/S23`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    /// Builds a rule, sorting and deduplicating the counts.
    pub fn new(
        birth: impl IntoIterator<Item = usize>,
        survive: impl IntoIterator<Item = usize>,
    ) -> Self {
        fn normalized(counts: impl IntoIterator<Item = usize>) -> Vec<usize> {
            let mut counts: Vec<usize> = counts.into_iter().collect();
            counts.sort_unstable();
            counts.dedup();
            counts
        }

        Self {
            birth: normalized(birth),
            survive: normalized(survive),
        }
    }

    /// Decides whether a cell is alive in the next generation.
    pub fn next_alive(&self, alive: bool, alive_neighbor_count: usize) -> bool {
        if alive {
            self.survive.contains(&alive_neighbor_count)
        } else {
            self.birth.contains(&alive_neighbor_count)
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for count in &self.birth {
            write!(f, "{count}")?;
        }

        write!(f, "/S")?;
        for count in &self.survive {
            write!(f, "{count}")?;
        }

        Ok(())
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut birth = None;
        let mut survive = None;

        for part in s.trim().split('/') {
            let mut chars = part.chars();

            let (letter, slot) = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => ('B', &mut birth),
                Some('S') => ('S', &mut survive),
                _ => return Err(RuleParseError::BadPart(part.to_owned())),
            };

            if slot.is_some() {
                return Err(RuleParseError::DuplicatePart(letter));
            }

            let counts = chars
                .map(|c| {
                    c.to_digit(10)
                        .map(|digit| digit as usize)
                        .filter(|count| *count <= MAX_NEIGHBORS)
                        .ok_or(RuleParseError::BadCount(c))
                })
                .collect::<Result<Vec<_>, _>>()?;

            *slot = Some(counts);
        }

        let birth = birth.ok_or(RuleParseError::MissingPart('B'))?;
        let survive = survive.ok_or(RuleParseError::MissingPart('S'))?;

        Ok(Self::new(birth, survive))
    }
}

impl TryFrom<String> for Rule {
    type Error = RuleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use crate::error::RuleParseError;

    #[test]
    fn test_default_is_conway() {
        let rule = Rule::default();
        assert_eq!(rule.to_string(), "B3/S23");
        assert_eq!("B3/S23".parse::<Rule>(), Ok(rule.clone()));

        assert!(rule.next_alive(true, 2));
        assert!(rule.next_alive(true, 3));
        assert!(!rule.next_alive(true, 1));
        assert!(!rule.next_alive(true, 4));
        assert!(rule.next_alive(false, 3));
        assert!(!rule.next_alive(false, 2));
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("s23/b36".parse::<Rule>(), Ok(Rule::new([3, 6], [2, 3])));
        assert_eq!("B/S".parse::<Rule>(), Ok(Rule::new([0usize; 0], [0usize; 0])));
        assert_eq!("B63/S32".parse::<Rule>().unwrap().to_string(), "B36/S23");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("B3".parse::<Rule>(), Err(RuleParseError::MissingPart('S')));
        assert_eq!("S23".parse::<Rule>(), Err(RuleParseError::MissingPart('B')));
        assert_eq!(
            "B3/B4/S23".parse::<Rule>(),
            Err(RuleParseError::DuplicatePart('B'))
        );
        assert_eq!("B9/S23".parse::<Rule>(), Err(RuleParseError::BadCount('9')));
        assert_eq!("B3/Sx".parse::<Rule>(), Err(RuleParseError::BadCount('x')));
        assert_eq!(
            "B3/23".parse::<Rule>(),
            Err(RuleParseError::BadPart("23".to_owned()))
        );
    }

    #[test]
    fn test_serde_as_rulestring() {
        let json = serde_json::to_string(&Rule::new([3, 6], [2, 3])).unwrap();
        assert_eq!(json, "\"B36/S23\"");

        let rule: Rule = serde_json::from_str("\"B2/S\"").unwrap();
        assert_eq!(rule, Rule::new([2], [0usize; 0]));
        assert!(serde_json::from_str::<Rule>("\"nonsense\"").is_err());
    }
}
