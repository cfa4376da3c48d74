use crate::value::{Fields, Value};

// NOTE: Field Provider Contract
//
// Results rendered by bossctl come from many unrelated message types. Instead of
// reflecting over them at runtime, every type the renderer can see exposes its
// fields by name through `Record::fields()`. Field names use the exported
// (PascalCase) spelling the format strings refer to, e.g. `{{.SerialNumber}}`.

/// A value the result renderer can inspect by field name.
pub trait Record {
    /// Every field of this record, in declaration order.
    fn fields(&self) -> Fields;

    /// The value the renderer walks. Records are wrapped as `Value::Record`.
    fn to_value(&self) -> Value {
        Value::Record(self.fields())
    }

    /// Complete set of top-level field names this type can ever expose.
    ///
    /// `None` means the shape is not known up front (untyped payloads), so no
    /// field reference can be rejected before rendering.
    fn declared_fields() -> Option<Vec<String>>
    where
        Self: Sized,
    {
        None
    }
}

impl Record for Fields {
    fn fields(&self) -> Fields {
        self.clone()
    }
}

impl Record for Value {
    fn fields(&self) -> Fields {
        match self {
            Value::Record(fields) => fields.clone(),
            _ => Fields::new(),
        }
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

/// Declared field names of a record type, taken from its default instance.
pub fn declared_from_default<R: Record + Default>() -> Vec<String> {
    R::default().fields().names().map(str::to_string).collect()
}

/// Result data handed to the renderer: one record or a homogeneous list.
#[derive(Debug, Clone, PartialEq)]
pub enum Data<R> {
    One(R),
    Many(Vec<R>),
}

impl<R> Data<R> {
    pub fn is_many(&self) -> bool {
        matches!(self, Data::Many(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Data::One(_) => 1,
            Data::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<T>(self, mut f: impl FnMut(R) -> T) -> Data<T> {
        match self {
            Data::One(item) => Data::One(f(item)),
            Data::Many(items) => Data::Many(items.into_iter().map(f).collect()),
        }
    }
}

impl<R> From<Vec<R>> for Data<R> {
    fn from(items: Vec<R>) -> Self {
        Data::Many(items)
    }
}
