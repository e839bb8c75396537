//! Addressing nodes by position.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Position of a node in a taxonomy: one child index per level, from the top.
///
/// Stored 0-based; written and parsed 1-based and dot-separated (`2.1` is the
/// first child of the second top-level node), which is how `tree --paths`
/// labels nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of the top-level node at `index`.
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of this node's child at `index`.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", index + 1)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPathSyntax(s.to_string());
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        trimmed
            .split('.')
            .map(|part| match part.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n - 1),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", vec![0])]
    #[case("2.1", vec![1, 0])]
    #[case(" 3.10.2 ", vec![2, 9, 1])]
    fn given_dotted_one_based_text_when_parsing_then_zero_based_indices(
        #[case] text: &str,
        #[case] indices: Vec<usize>,
    ) {
        let path: NodePath = text.parse().unwrap();
        assert_eq!(path.indices(), indices.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("1..2")]
    #[case("1.x")]
    #[case("-1")]
    fn given_malformed_text_when_parsing_then_syntax_error(#[case] text: &str) {
        let err = text.parse::<NodePath>().unwrap_err();
        assert_eq!(err, DomainError::InvalidPathSyntax(text.to_string()));
    }

    #[test]
    fn given_path_when_displayed_then_round_trips_through_parse() {
        let path = NodePath::top(1).child(0).child(4);
        assert_eq!(path.to_string(), "2.1.5");
        assert_eq!(path.to_string().parse::<NodePath>().unwrap(), path);
    }
}
