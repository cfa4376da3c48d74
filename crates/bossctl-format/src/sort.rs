//! Multi-key ordering: `Field,-Other.Field,+Third`.

use crate::error::{Error, Result};
use crate::field::resolve;
use bossctl_types::{FieldPath, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub path: FieldPath,
    pub direction: Direction,
}

impl SortKey {
    fn parse(src: &str) -> Result<Self> {
        let key = src.trim();
        let (direction, body) = match key.chars().next() {
            None => return Err(Error::SortSpec("empty key".to_string())),
            Some('-') => (Direction::Descending, &key[1..]),
            Some('+') => (Direction::Ascending, &key[1..]),
            Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '.' => {
                (Direction::Ascending, key)
            }
            Some(c) => {
                return Err(Error::SortSpec(format!(
                    "unknown direction marker '{}' in '{}'",
                    c, key
                )));
            }
        };

        if body.trim().is_empty() {
            return Err(Error::SortSpec(format!("key '{}' names no field", key)));
        }

        let path = FieldPath::parse(body).map_err(|e| Error::SortSpec(e.to_string()))?;
        Ok(Self { path, direction })
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ord = compare_resolved(resolve(a, &self.path), resolve(b, &self.path));
        match self.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// Missing sorts first; numbers compare numerically, everything else by string.
///
/// A number is ranked below any non-numeric string so the comparison stays a
/// total order when a column mixes both.
fn compare_resolved(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let (a, b) = (a.to_string(), b.to_string());
            match (parse_number(&a), parse_number(&b)) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(&b),
            }
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// A compiled order-by specification. The empty spec leaves order untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn parse(src: &str) -> Result<Self> {
        if src.trim().is_empty() {
            return Ok(Self::default());
        }

        let keys = src
            .split(',')
            .map(SortKey::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Single stable pass over all keys; ties keep their original order.
    pub fn sort(&self, rows: &mut [Value]) {
        if self.is_empty() || rows.len() < 2 {
            return;
        }
        rows.sort_by(|a, b| self.compare(a, b));
    }
}
