//! Row filter expressions: `Field=VALUE AND Other.Field!=VALUE`.
//!
//! Clauses are joined by the word `AND` (any case) or by `,`. Every clause
//! compares the string form of the resolved field against the literal; there is
//! no typed or ordered comparison. `~` and `!~` match a regular expression.

use crate::error::{Error, Result};
use crate::field::resolve;
use bossctl_types::{FieldPath, Value};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static CONJUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+|,").expect("conjunction regex"));

static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_.]+)\s*(==|!=|!~|=|~)\s*(.*?)\s*$").expect("clause regex")
});

#[derive(Debug, Clone)]
enum Op {
    Eq,
    Ne,
    Match(Regex),
    NotMatch(Regex),
}

impl Op {
    fn is_negated(&self) -> bool {
        matches!(self, Op::Ne | Op::NotMatch(_))
    }
}

#[derive(Debug, Clone)]
struct Clause {
    path: FieldPath,
    op: Op,
    literal: String,
}

impl Clause {
    fn parse(src: &str) -> Result<Self> {
        if src.trim().is_empty() {
            return Err(Error::FilterSyntax("empty clause".to_string()));
        }

        let caps = CLAUSE_RE.captures(src).ok_or_else(|| {
            Error::FilterSyntax(format!(
                "clause '{}' must look like FIELD=VALUE, FIELD!=VALUE, FIELD~REGEX or FIELD!~REGEX",
                src.trim()
            ))
        })?;

        let path = FieldPath::parse(&caps[1]).map_err(|e| Error::FilterSyntax(e.to_string()))?;
        let literal = caps[3].to_string();

        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                Error::FilterSyntax(format!("bad regular expression '{}': {}", pattern, e))
            })
        };

        let op = match &caps[2] {
            "=" | "==" => Op::Eq,
            "!=" => Op::Ne,
            "~" => Op::Match(compile(&literal)?),
            "!~" => Op::NotMatch(compile(&literal)?),
            other => {
                return Err(Error::FilterSyntax(format!("unknown operator '{}'", other)));
            }
        };

        Ok(Self { path, op, literal })
    }

    fn matches(&self, row: &Value) -> bool {
        match resolve(row, &self.path) {
            Some(value) => {
                let text = value.to_string();
                match &self.op {
                    Op::Eq => text == self.literal,
                    Op::Ne => text != self.literal,
                    Op::Match(re) => re.is_match(&text),
                    Op::NotMatch(re) => !re.is_match(&text),
                }
            }
            // A missing field only satisfies "is not <absent>".
            None => self.op.is_negated() && self.literal.is_empty(),
        }
    }
}

/// Split on conjunctions, except for a `,` inside the `{..}` or `[..]` of a
/// regular expression clause, e.g. `Id~^onu-[0-9]{1,2}$`.
fn split_clauses(src: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut start = 0;
    for sep in CONJUNCTION_RE.find_iter(src) {
        let clause = &src[start..sep.start()];
        if sep.as_str() == "," && clause.contains('~') && bracket_depth(clause) > 0 {
            continue;
        }
        clauses.push(clause);
        start = sep.end();
    }
    clauses.push(&src[start..]);
    clauses
}

fn bracket_depth(src: &str) -> i32 {
    let mut depth = 0;
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' | '[' => depth += 1,
            '}' | ']' => depth -= 1,
            _ => {}
        }
    }
    depth
}

/// A compiled filter expression. The empty filter keeps every row.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn parse(src: &str) -> Result<Self> {
        if src.trim().is_empty() {
            return Ok(Self::default());
        }

        let clauses = split_clauses(src)
            .into_iter()
            .map(Clause::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { clauses })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.clauses.iter().all(|clause| clause.matches(row))
    }

    /// Keep matching rows, preserving their relative order.
    pub fn apply(&self, rows: Vec<Value>) -> Vec<Value> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter()
            .filter(|row| {
                let keep = self.matches(row);
                if !keep {
                    trace!(row = %row, "dropped by filter");
                }
                keep
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bossctl_types::{EnumValue, Fields, Record};

    fn row(id: &str, state: &str) -> Value {
        Value::Record(Fields::new().with("Id", id).with("State", state))
    }

    fn ids(rows: &[Value]) -> Vec<String> {
        rows.iter()
            .map(|r| r.fields().get("Id").map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_equality_keeps_matching_rows() {
        let filter = Filter::parse("State=ACTIVE").unwrap();
        let kept = filter.apply(vec![row("a", "ACTIVE"), row("b", "DOWN")]);
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn test_conjunction_forms() {
        let rows = vec![row("a", "ACTIVE"), row("b", "ACTIVE"), row("c", "DOWN")];
        for src in [
            "State=ACTIVE AND Id!=a",
            "State = ACTIVE and Id != a",
            "State=ACTIVE,Id!=a",
        ] {
            let kept = Filter::parse(src).unwrap().apply(rows.clone());
            assert_eq!(ids(&kept), vec!["b"], "filter {:?}", src);
        }
    }

    #[test]
    fn test_comparison_uses_string_form() {
        let rec = Value::Record(
            Fields::new()
                .with("PortNo", 42u32)
                .with(
                    "AdminState",
                    EnumValue {
                        name: "ENABLED",
                        number: 3,
                    },
                ),
        );
        assert!(Filter::parse("PortNo=42").unwrap().matches(&rec));
        assert!(Filter::parse("AdminState==ENABLED").unwrap().matches(&rec));
        assert!(!Filter::parse("AdminState=3").unwrap().matches(&rec));
    }

    #[test]
    fn test_missing_field_semantics() {
        let rec = row("a", "ACTIVE");
        assert!(!Filter::parse("Reason=x").unwrap().matches(&rec));
        assert!(!Filter::parse("Reason!=x").unwrap().matches(&rec));
        assert!(Filter::parse("Reason!=").unwrap().matches(&rec));
        assert!(!Filter::parse("Reason=").unwrap().matches(&rec));
    }

    #[test]
    fn test_null_field_is_empty_string() {
        let rec = Value::Record(Fields::new().with("Reason", Value::Null));
        assert!(Filter::parse("Reason=").unwrap().matches(&rec));
        assert!(Filter::parse("Reason!=x").unwrap().matches(&rec));
    }

    #[test]
    fn test_regex_clauses() {
        let rows = vec![row("olt-1", "ACTIVE"), row("onu-7", "ACTIVE")];
        let kept = Filter::parse("Id~^olt").unwrap().apply(rows.clone());
        assert_eq!(ids(&kept), vec!["olt-1"]);
        let kept = Filter::parse("Id!~^olt").unwrap().apply(rows);
        assert_eq!(ids(&kept), vec!["onu-7"]);
    }

    #[test]
    fn test_commas_inside_regex_are_not_separators() {
        let rows = vec![row("olt-1", "ACTIVE"), row("onu-10", "ACTIVE"), row("onu-123", "DOWN")];

        let kept = Filter::parse("Id~^onu-[0-9]{1,2}$").unwrap().apply(rows.clone());
        assert_eq!(ids(&kept), vec!["onu-10"]);

        let kept = Filter::parse("Id~^o[n,l]u?-[0-9]{1,3}$,State=DOWN")
            .unwrap()
            .apply(rows.clone());
        assert_eq!(ids(&kept), vec!["onu-123"]);

        let kept = Filter::parse(r"Id~^onu-\[?[0-9]{2,},State=ACTIVE").unwrap().apply(rows);
        assert_eq!(ids(&kept), vec!["onu-10"]);
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = Filter::parse("   ").unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&Value::Null));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["State", "State=ACTIVE,,Id=a", "=ACTIVE", "Sta-te=1", "Id~(", "A.=1"] {
            let err = Filter::parse(bad).unwrap_err();
            assert!(matches!(err, Error::FilterSyntax(_)), "{:?} -> {:?}", bad, err);
        }
    }
}
