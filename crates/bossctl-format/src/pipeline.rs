use crate::encode::{Encoding, encode};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::presentation::{OutputAs, PresentationSpec};
use crate::sort::SortSpec;
use crate::template::Template;
use crate::template::funcs::{CallContext, FuncTable};
use crate::truncate::NameTruncator;
use bossctl_types::{Data, FieldPath, Record, Value};
use chrono::{DateTime, Utc};
use tracing::debug;

// NOTE: Render Order
//
// filter -> sort -> truncate -> render, always. Every user-supplied string
// (filter, order, format) is compiled before the first row is touched, so a
// typo in any of them fails the invocation without printing a partial table.
// Truncation only shapes table cells; JSON/YAML always carry full values.

/// Turns result data plus a presentation spec into output text.
#[derive(Debug)]
pub struct ResultPipeline {
    funcs: FuncTable,
    now: DateTime<Utc>,
}

impl Default for ResultPipeline {
    fn default() -> Self {
        Self::new(FuncTable::standard())
    }
}

impl ResultPipeline {
    pub fn new(funcs: FuncTable) -> Self {
        Self {
            funcs,
            now: Utc::now(),
        }
    }

    /// Pin the clock used by time functions such as `since`.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn funcs(&self) -> &FuncTable {
        &self.funcs
    }

    pub fn render<R: Record>(&self, data: &Data<R>, spec: &PresentationSpec) -> Result<String> {
        let stages = Stages::compile::<R>(spec, &self.funcs)?;

        let (mut rows, many) = match data {
            Data::One(record) => (vec![record.to_value()], false),
            Data::Many(records) => (records.iter().map(|r| r.to_value()).collect(), true),
        };

        if many {
            let total = rows.len();
            rows = stages.filter.apply(rows);
            debug!(total, kept = rows.len(), "filter");

            stages.sort.sort(&mut rows);
            debug!(keys = stages.sort.keys().len(), "sort");
        }

        if let Some(truncator) = stages.truncator.as_ref().filter(|t| t.is_enabled()) {
            rows.iter_mut().for_each(|row| truncator.apply(row));
            debug!(rows = rows.len(), limit = spec.name_limit, "truncate");
        }

        let out = match stages.template {
            Some(template) => self.execute(&template, &rows),
            None => {
                let encoding = match spec.output_as {
                    OutputAs::Yaml => Encoding::Yaml,
                    _ => Encoding::Json,
                };
                let value = if many {
                    Value::List(rows)
                } else {
                    rows.pop().unwrap_or_default()
                };
                encode(&value, encoding)?
            }
        };
        debug!(output_as = %spec.output_as, bytes = out.len(), "render");

        Ok(out)
    }

    fn execute(&self, template: &Template, rows: &[Value]) -> String {
        let ctx = CallContext { now: self.now };
        let mut out = String::new();

        if let Some(header) = template.header() {
            out.push_str(&header);
            out.push('\n');
        }
        for row in rows {
            out.push_str(&template.execute(row, &self.funcs, &ctx));
            out.push('\n');
        }
        out
    }
}

/// Everything compiled from the presentation spec up front.
struct Stages {
    filter: Filter,
    sort: SortSpec,
    truncator: Option<NameTruncator>,
    template: Option<Template>,
}

impl Stages {
    fn compile<R: Record>(spec: &PresentationSpec, funcs: &FuncTable) -> Result<Self> {
        let filter = Filter::parse(&spec.filter)?;
        let sort = SortSpec::parse(&spec.order_by)?;

        let (template, truncator) = match spec.output_as {
            OutputAs::Table => {
                let template = Template::compile(&spec.format, funcs)?;
                let name_field = FieldPath::parse(&spec.name_field).map_err(|e| {
                    Error::InvalidOptions(format!("name column: {}", e))
                })?;
                (
                    Some(template),
                    Some(NameTruncator::new(name_field, spec.name_limit)),
                )
            }
            OutputAs::Quiet => {
                let field = FieldPath::parse(&spec.quiet_field)
                    .map_err(|e| Error::TemplateCompile(e.to_string()))?;
                (Some(Template::single_field(&field)), None)
            }
            OutputAs::Json | OutputAs::Yaml => (None, None),
        };

        if let (Some(template), Some(declared)) = (&template, R::declared_fields()) {
            template.check_fields(&declared)?;
        }

        Ok(Self {
            filter,
            sort,
            truncator,
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bossctl_types::Fields;
    use chrono::TimeZone;

    fn pipeline() -> ResultPipeline {
        ResultPipeline::default().with_now(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap())
    }

    fn ids(ids: &[&str]) -> Data<Fields> {
        Data::Many(ids.iter().map(|id| Fields::new().with("Id", *id)).collect())
    }

    fn spec(output_as: OutputAs) -> PresentationSpec {
        PresentationSpec {
            format: "table{{.Id}}".to_string(),
            output_as,
            ..Default::default()
        }
    }

    #[test]
    fn test_quiet_sorted() {
        let spec = PresentationSpec {
            order_by: "-Id".to_string(),
            ..spec(OutputAs::Quiet)
        };
        let out = pipeline().render(&ids(&["1", "10", "2"]), &spec).unwrap();
        assert_eq!(out, "10\n2\n1\n");
    }

    #[test]
    fn test_table_header_once() {
        let out = pipeline().render(&ids(&["a", "b"]), &spec(OutputAs::Table)).unwrap();
        assert_eq!(out, "ID\na\nb\n");

        let out = pipeline().render(&ids(&[]), &spec(OutputAs::Table)).unwrap();
        assert_eq!(out, "ID\n");
    }

    #[test]
    fn test_scalar_renders_once_without_filtering() {
        let data = Data::One(Fields::new().with("Id", "x"));
        let spec = PresentationSpec {
            filter: "Id=nope".to_string(),
            ..spec(OutputAs::Table)
        };
        assert_eq!(pipeline().render(&data, &spec).unwrap(), "ID\nx\n");
    }

    #[test]
    fn test_compile_errors_surface_before_rows() {
        let bad_filter = PresentationSpec {
            filter: "Id".to_string(),
            ..spec(OutputAs::Json)
        };
        assert!(matches!(
            pipeline().render(&ids(&["a"]), &bad_filter),
            Err(Error::FilterSyntax(_))
        ));

        let bad_order = PresentationSpec {
            order_by: "*Id".to_string(),
            ..spec(OutputAs::Table)
        };
        assert!(matches!(
            pipeline().render(&ids(&["a"]), &bad_order),
            Err(Error::SortSpec(_))
        ));
    }

    #[test]
    fn test_json_ignores_truncation() {
        let data = Data::Many(vec![Fields::new().with("Name", "abcdefgh")]);
        let spec = PresentationSpec {
            name_limit: 3,
            ..spec(OutputAs::Json)
        };
        let out = pipeline().render(&data, &spec).unwrap();
        assert!(out.contains("abcdefgh"), "{}", out);
    }
}
