//! Functions callable from format strings, e.g. `{{gosince .LastCommunication}}`.

use bossctl_types::Value;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Per-render inputs available to every function call.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    pub now: DateTime<Utc>,
}

pub type FuncImpl = dyn Fn(&[Value], &CallContext) -> Value + Send + Sync;

pub struct Func {
    arity: usize,
    call: Box<FuncImpl>,
}

impl Func {
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn call(&self, args: &[Value], ctx: &CallContext) -> Value {
        (self.call)(args, ctx)
    }
}

/// Named function table handed to the template compiler and executor.
pub struct FuncTable {
    funcs: BTreeMap<String, Func>,
}

impl FuncTable {
    /// A table with no functions at all.
    pub fn empty() -> Self {
        Self {
            funcs: BTreeMap::new(),
        }
    }

    /// The standard library: `since`, `gosince`, `timestamp`, `enum`, `yesno`,
    /// `humanbytes`, `upper`, `lower` and `json`.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table
            .register("since", 1, |args, ctx| {
                with_timestamp(&args[0], |ts| format_relative_time(ts, ctx.now))
            })
            .register("gosince", 1, |args, ctx| {
                with_timestamp(&args[0], |ts| format_go_duration(ctx.now - ts))
            })
            .register("timestamp", 1, |args, _| {
                with_timestamp(&args[0], |ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            })
            .register("enum", 1, |args, _| match &args[0] {
                Value::Enum(e) => Value::Str(e.name.to_string()),
                other => other.clone(),
            })
            .register("yesno", 1, |args, _| {
                Value::from(if args[0].is_truthy() { "yes" } else { "no" })
            })
            .register("humanbytes", 1, |args, _| match args[0].as_f64() {
                Some(n) => Value::Str(format_bytes(n)),
                None => args[0].clone(),
            })
            .register("upper", 1, |args, _| {
                Value::Str(args[0].to_string().to_uppercase())
            })
            .register("lower", 1, |args, _| {
                Value::Str(args[0].to_string().to_lowercase())
            })
            .register("json", 1, |args, _| {
                Value::Str(serde_json::to_string(&args[0]).unwrap_or_default())
            });
        table
    }

    pub fn register<F>(&mut self, name: &str, arity: usize, f: F) -> &mut Self
    where
        F: Fn(&[Value], &CallContext) -> Value + Send + Sync + 'static,
    {
        self.funcs.insert(
            name.to_string(),
            Func {
                arity,
                call: Box::new(f),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&Func> {
        self.funcs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }
}

impl Default for FuncTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FuncTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Apply `f` to a timestamp argument; anything else passes through unchanged.
fn with_timestamp(arg: &Value, f: impl FnOnce(DateTime<Utc>) -> String) -> Value {
    match arg.as_timestamp() {
        Some(ts) => Value::Str(f(ts)),
        None => arg.clone(),
    }
}

/// Relative age: "just now", "5 min ago", "yesterday", "3 weeks ago".
pub fn format_relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    let seconds = duration.num_seconds();
    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        ago(days, "day")
    } else if days < 30 {
        ago(days / 7, "week")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Elapsed time as "1h2m3s" / "4m0s" / "12s", truncated to whole seconds.
pub fn format_go_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

/// Byte count with binary units: "512 B", "1.5 KiB", "3.0 MiB".
pub fn format_bytes(count: f64) -> String {
    const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

    if count.abs() < 1024.0 {
        return format!("{} B", count);
    }

    let mut value = count;
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
