//! Format-string templates: `table{{.Id}}\t{{.Type}}`.
//!
//! A leading `table` keyword asks for a header line. Header labels come from
//! the first field referenced by each top-level action, uppercased.

pub mod funcs;
mod parse;

use crate::error::{Error, Result};
use crate::field::resolve;
use bossctl_types::{FieldPath, Value};
use funcs::{CallContext, FuncTable};
use parse::{Node, Operand, Pipeline};
use std::fmt::Write;

const TABLE_PREFIX: &str = "table";

/// A compiled format string.
#[derive(Debug, Clone)]
pub struct Template {
    table: bool,
    nodes: Vec<Node>,
}

impl Template {
    /// Compile `format`, resolving function names against `funcs`.
    pub fn compile(format: &str, funcs: &FuncTable) -> Result<Self> {
        let (table, body) = match format.strip_prefix(TABLE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, format),
        };
        let nodes = parse::parse(body, funcs)?;
        Ok(Self { table, nodes })
    }

    /// The one-action template `{{.<field>}}`, used for quiet output.
    pub fn single_field(field: &FieldPath) -> Self {
        Self {
            table: false,
            nodes: vec![Node::Action(Pipeline {
                commands: vec![parse::Command {
                    func: None,
                    args: vec![Operand::Field(field.clone())],
                }],
            })],
        }
    }

    pub fn is_table(&self) -> bool {
        self.table
    }

    /// Column labels, one per top-level action that references a field.
    pub fn header_labels(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Action(pipeline) => pipeline.fields().next().map(FieldPath::header_label),
                _ => None,
            })
            .collect()
    }

    /// Tab-joined header line, present only for `table` templates.
    pub fn header(&self) -> Option<String> {
        self.table.then(|| self.header_labels().join("\t"))
    }

    /// Field paths evaluated against the row itself (not inside `range`).
    pub fn row_fields(&self) -> Vec<&FieldPath> {
        let mut out = Vec::new();
        collect_row_fields(&self.nodes, &mut out);
        out
    }

    /// Reject references whose first segment is not among `declared`.
    pub fn check_fields(&self, declared: &[String]) -> Result<()> {
        for path in self.row_fields() {
            if !declared.iter().any(|name| name == path.first()) {
                return Err(Error::FieldResolution(format!(
                    "can't evaluate field {} (known fields: {})",
                    path.first(),
                    declared.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Execute the body once against `row`. Missing fields render empty.
    pub fn execute(&self, row: &Value, funcs: &FuncTable, ctx: &CallContext) -> String {
        let mut out = String::new();
        Executor { funcs, ctx }.nodes(&self.nodes, row, &mut out);
        out
    }
}

fn collect_row_fields<'a>(nodes: &'a [Node], out: &mut Vec<&'a FieldPath>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Action(pipeline) => out.extend(pipeline.fields()),
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                out.extend(cond.fields());
                collect_row_fields(then, out);
                collect_row_fields(otherwise, out);
            }
            Node::Range {
                over, otherwise, ..
            } => {
                out.extend(over.fields());
                collect_row_fields(otherwise, out);
            }
        }
    }
}

struct Executor<'a> {
    funcs: &'a FuncTable,
    ctx: &'a CallContext,
}

impl Executor<'_> {
    fn nodes(&self, nodes: &[Node], scope: &Value, out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Action(pipeline) => {
                    if let Some(value) = self.pipeline(pipeline, scope) {
                        let _ = write!(out, "{}", value);
                    }
                }
                Node::If {
                    cond,
                    then,
                    otherwise,
                } => {
                    let truthy = self
                        .pipeline(cond, scope)
                        .is_some_and(|v| v.is_truthy());
                    self.nodes(if truthy { then } else { otherwise }, scope, out);
                }
                Node::Range {
                    over,
                    body,
                    otherwise,
                } => match self.pipeline(over, scope) {
                    Some(Value::List(items)) if !items.is_empty() => {
                        for item in &items {
                            self.nodes(body, item, out);
                        }
                    }
                    Some(Value::Record(fields)) if !fields.is_empty() => {
                        for (_, item) in fields.iter() {
                            self.nodes(body, item, out);
                        }
                    }
                    _ => self.nodes(otherwise, scope, out),
                },
            }
        }
    }

    /// `None` when any referenced field is missing; the action then renders
    /// nothing.
    fn pipeline(&self, pipeline: &Pipeline, scope: &Value) -> Option<Value> {
        let mut piped: Option<Value> = None;

        for command in &pipeline.commands {
            let mut args = command
                .args
                .iter()
                .map(|op| operand(op, scope))
                .collect::<Option<Vec<_>>>()?;
            if let Some(prev) = piped.take() {
                args.push(prev);
            }

            let value = match &command.func {
                Some(name) => self.funcs.get(name)?.call(&args, self.ctx),
                None => args.into_iter().next()?,
            };
            piped = Some(value);
        }

        piped
    }
}

fn operand(op: &Operand, scope: &Value) -> Option<Value> {
    match op {
        Operand::Dot => Some(scope.clone()),
        Operand::Field(path) => resolve(scope, path).cloned(),
        Operand::Literal(value) => Some(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bossctl_types::Fields;
    use chrono::{TimeZone, Utc};

    fn ctx() -> CallContext {
        CallContext {
            now: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    fn render(format: &str, row: &Value) -> String {
        let funcs = FuncTable::standard();
        Template::compile(format, &funcs)
            .unwrap()
            .execute(row, &funcs, &ctx())
    }

    fn device() -> Value {
        let peer = |id: &str| Fields::new().with("DeviceId", id).with("PortNo", 1u32);
        Value::Record(
            Fields::new()
                .with("Id", "olt-1")
                .with("Type", "openolt")
                .with("Root", true)
                .with("Reason", Value::Null)
                .with("Peers", vec![peer("onu-1"), peer("onu-2")])
                .with("ImageState", Fields::new().with("Version", "2.1")),
        )
    }

    #[test]
    fn test_table_header_labels() {
        let funcs = FuncTable::standard();
        let t = Template::compile(
            "table{{.Id}}\t{{ .Type | upper }}\t{{.ImageState.Version}}\t{{ \"-\" }}",
            &funcs,
        )
        .unwrap();
        assert!(t.is_table());
        assert_eq!(t.header().as_deref(), Some("ID\tTYPE\tIMAGESTATE.VERSION"));

        let plain = Template::compile("{{.Id}}", &funcs).unwrap();
        assert_eq!(plain.header(), None);
    }

    #[test]
    fn test_execute_cells() {
        assert_eq!(
            render("{{.Id}}\t{{.Type | upper}}\t{{.ImageState.Version}}", &device()),
            "olt-1\tOPENOLT\t2.1"
        );
    }

    #[test]
    fn test_missing_and_null_render_empty() {
        assert_eq!(render("[{{.Reason}}][{{.Nope}}]", &device()), "[][]");
        assert_eq!(render("[{{upper .Nope}}]", &device()), "[]");
    }

    #[test]
    fn test_if_and_range() {
        assert_eq!(
            render("{{if .Root}}root{{else}}child{{end}}", &device()),
            "root"
        );
        assert_eq!(
            render("{{range .Peers}}{{.DeviceId}};{{end}}", &device()),
            "onu-1;onu-2;"
        );
        assert_eq!(
            render("{{range .Nope}}x{{else}}none{{end}}", &device()),
            "none"
        );
    }

    #[test]
    fn test_multiline_with_trim() {
        let out = render("ID: {{.Id}}\n  TYPE: {{.Type -}}\n", &device());
        assert_eq!(out, "ID: olt-1\n  TYPE: openolt");
    }

    #[test]
    fn test_check_fields() {
        let funcs = FuncTable::standard();
        let declared: Vec<String> = ["Id", "Type", "Peers"].iter().map(|s| s.to_string()).collect();

        let ok = Template::compile("{{.Id}}{{range .Peers}}{{.DeviceId}}{{end}}", &funcs).unwrap();
        assert!(ok.check_fields(&declared).is_ok());

        let bad = Template::compile("{{.Id}}\t{{.Colour}}", &funcs).unwrap();
        let err = bad.check_fields(&declared).unwrap_err();
        assert!(matches!(err, Error::FieldResolution(ref m) if m.contains("Colour")));
    }

    #[test]
    fn test_single_field() {
        let t = Template::single_field(&FieldPath::parse("Id").unwrap());
        assert!(!t.is_table());
        assert_eq!(t.execute(&device(), &FuncTable::empty(), &ctx()), "olt-1");
    }
}
