//! Field path resolution against dynamically shaped values.
//!
//! Rules, applied segment by segment:
//! - a record is searched for the segment by exact, case-sensitive name;
//! - a list met mid-path is traversed through its first element, unless the
//!   segment is a number, which selects that index;
//! - a null (nil pointer, unset optional) ends the walk and resolves to null;
//! - anything else (scalar, missing name, empty list) is not found.

use bossctl_types::{FieldPath, Value};

/// Resolve `path` against `root`. `None` means the field does not exist,
/// which is distinct from a field that exists and is null.
pub fn resolve<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        if current.is_null() {
            return Some(current);
        }
        current = step(current, segment)?;
    }
    Some(current)
}

/// Mutable twin of [`resolve`], same traversal rules.
pub fn resolve_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        if current.is_null() {
            return Some(current);
        }
        current = step_mut(current, segment)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Record(fields) => fields.get(segment),
        Value::List(items) => match segment.parse::<usize>() {
            Ok(index) => items.get(index),
            Err(_) => match items.first()? {
                Value::Record(fields) => fields.get(segment),
                _ => None,
            },
        },
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Record(fields) => fields.get_mut(segment),
        Value::List(items) => match segment.parse::<usize>() {
            Ok(index) => items.get_mut(index),
            Err(_) => match items.first_mut()? {
                Value::Record(fields) => fields.get_mut(segment),
                _ => None,
            },
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bossctl_types::Fields;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    fn pm_configs() -> Value {
        let metric = |name: &str| Fields::new().with("Name", name).with("Enabled", true);
        Value::Record(
            Fields::new()
                .with("DefaultFreq", 50u32)
                .with("Metrics", vec![metric("rx_bytes"), metric("tx_bytes")])
                .with("Groups", Vec::<Fields>::new())
                .with("Response", Value::Null),
        )
    }

    #[test]
    fn test_resolve_nested_and_top_level() {
        let v = pm_configs();
        assert_eq!(resolve(&v, &path("DefaultFreq")), Some(&Value::Uint(50)));
    }

    #[test]
    fn test_list_mid_path_uses_first_element() {
        let v = pm_configs();
        assert_eq!(
            resolve(&v, &path("Metrics.Name")),
            Some(&Value::from("rx_bytes"))
        );
    }

    #[test]
    fn test_numeric_segment_indexes_list() {
        let v = pm_configs();
        assert_eq!(
            resolve(&v, &path("Metrics.1.Name")),
            Some(&Value::from("tx_bytes"))
        );
        assert_eq!(resolve(&v, &path("Metrics.7.Name")), None);
    }

    #[test]
    fn test_empty_list_mid_path_is_not_found() {
        let v = pm_configs();
        assert_eq!(resolve(&v, &path("Groups.GroupName")), None);
    }

    #[test]
    fn test_null_is_present_not_missing() {
        let v = pm_configs();
        assert_eq!(resolve(&v, &path("Response")), Some(&Value::Null));
        assert_eq!(
            resolve(&v, &path("Response.ErrReason")),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_missing_and_case_mismatch_not_found() {
        let v = pm_configs();
        assert_eq!(resolve(&v, &path("defaultFreq")), None);
        assert_eq!(resolve(&v, &path("Nope")), None);
        assert_eq!(resolve(&v, &path("DefaultFreq.Inner")), None);
    }

    #[test]
    fn test_resolve_mut_updates_in_place() {
        let mut v = pm_configs();
        if let Some(slot) = resolve_mut(&mut v, &path("Metrics.Name")) {
            *slot = Value::from("renamed");
        }
        assert_eq!(
            resolve(&v, &path("Metrics.0.Name")),
            Some(&Value::from("renamed"))
        );
    }
}
