use crate::field::resolve_mut;
use bossctl_types::{FieldPath, Value};

pub const ELLIPSIS: char = '…';

/// Shorten `text` to at most `max_len` characters, marking the cut with `…`.
///
/// `max_len == 0` means no limit.
pub fn truncate(text: &str, max_len: usize) -> Option<String> {
    if max_len == 0 || text.chars().count() <= max_len {
        return None;
    }
    let mut truncated: String = text.chars().take(max_len - 1).collect();
    truncated.push(ELLIPSIS);
    Some(truncated)
}

/// Shortens the display-name column of table rows.
#[derive(Debug, Clone)]
pub struct NameTruncator {
    field: FieldPath,
    limit: usize,
}

impl NameTruncator {
    pub fn new(field: FieldPath, limit: usize) -> Self {
        Self { field, limit }
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Truncate the designated field of `row` in place. Rows without the field,
    /// or whose field is not a string, are left alone.
    pub fn apply(&self, row: &mut Value) {
        if !self.is_enabled() {
            return;
        }
        if let Some(Value::Str(name)) = resolve_mut(row, &self.field)
            && let Some(short) = truncate(name, self.limit)
        {
            *name = short;
        }
    }
}
