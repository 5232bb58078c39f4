//! Label to rank maps for ordered categories.

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, TableError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrdinalRepr {
    order: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ranks: Option<Vec<i64>>,
}

/// Ranks of an ordinal column.
///
/// `order` lists the labels from lowest to highest. Ranks default to the
/// position in `order`; explicit ranks may have gaps but must grow strictly
/// along `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrdinalRepr", into = "OrdinalRepr")]
pub struct OrdinalMap {
    order: Vec<String>,
    ranks: Vec<i64>,
}

impl OrdinalMap {
    /// Map with ranks `0..n` in the given order.
    pub fn new<I, S>(order: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = order.into_iter().map(Into::into).collect();
        let ranks = (0..order.len() as i64).collect();
        Self::with_ranks(order, ranks)
    }

    pub fn with_ranks(order: Vec<String>, ranks: Vec<i64>) -> Result<Self, TableError> {
        if order.is_empty() {
            return Err(TableError::Empty);
        }
        if order.len() != ranks.len() {
            return Err(TableError::RankCountMismatch {
                labels: order.len(),
                ranks: ranks.len(),
            });
        }
        for (i, label) in order.iter().enumerate() {
            if order[..i].contains(label) {
                return Err(TableError::DuplicateLabel(label.clone()));
            }
            if i > 0 && ranks[i] <= ranks[i - 1] {
                return Err(TableError::NotIncreasing {
                    label: label.clone(),
                });
            }
        }
        Ok(Self { order, ranks })
    }

    /// Labels from lowest to highest.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.order.iter().any(|l| l == label)
    }

    pub fn rank(&self, column: &str, label: &str) -> Result<i64, EncodeError> {
        self.order
            .iter()
            .position(|l| l == label)
            .map(|i| self.ranks[i])
            .ok_or_else(|| EncodeError::UnknownCategory {
                column: column.to_string(),
                value: label.to_string(),
            })
    }

    /// Whether the ranks of `expected` (lowest first) strictly increase.
    ///
    /// Labels missing from the map make the answer `false`.
    pub fn is_monotonic_over(&self, expected: &[&str]) -> bool {
        let ranks: Option<Vec<i64>> = expected
            .iter()
            .map(|l| self.rank("", l).ok())
            .collect();
        match ranks {
            Some(r) => r.windows(2).all(|w| w[0] < w[1]),
            None => false,
        }
    }
}

impl TryFrom<OrdinalRepr> for OrdinalMap {
    type Error = TableError;

    fn try_from(repr: OrdinalRepr) -> Result<Self, Self::Error> {
        match repr.ranks {
            Some(ranks) => Self::with_ranks(repr.order, ranks),
            None => Self::new(repr.order),
        }
    }
}

impl From<OrdinalMap> for OrdinalRepr {
    fn from(map: OrdinalMap) -> Self {
        OrdinalRepr {
            order: map.order,
            ranks: Some(map.ranks),
        }
    }
}
