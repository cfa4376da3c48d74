//! Result rendering for bossctl.
//!
//! Takes the records returned by a command plus a [`PresentationSpec`] and
//! produces the text that goes to stdout:
//!
//! ```text
//! Data<R: Record> -> filter -> sort -> truncate names -> template | JSON | YAML
//! ```
//!
//! ```
//! use bossctl_format::{OutputAs, PresentationSpec, ResultPipeline};
//! use bossctl_types::{Data, Fields};
//!
//! let data = Data::Many(vec![
//!     Fields::new().with("Id", "1"),
//!     Fields::new().with("Id", "10"),
//!     Fields::new().with("Id", "2"),
//! ]);
//! let spec = PresentationSpec {
//!     order_by: "-Id".to_string(),
//!     output_as: OutputAs::Quiet,
//!     ..Default::default()
//! };
//! let out = ResultPipeline::default().render(&data, &spec).unwrap();
//! assert_eq!(out, "10\n2\n1\n");
//! ```

pub mod encode;
pub mod error;
pub mod field;
pub mod filter;
pub mod pipeline;
pub mod presentation;
pub mod sort;
pub mod template;
pub mod truncate;

pub use encode::{Encoding, encode};
pub use error::{Error, Result};
pub use field::{resolve, resolve_mut};
pub use filter::Filter;
pub use pipeline::ResultPipeline;
pub use presentation::{
    CommandDefaults, OptionSource, OutputAs, Overrides, PresentationSpec, unescape_format,
};
pub use sort::{Direction, SortKey, SortSpec};
pub use template::Template;
pub use template::funcs::{CallContext, FuncTable};
pub use truncate::NameTruncator;
