//! Generate R plotting scripts from typed chart parameters and render them
//! through an external R interpreter.
//!
//! ```no_run
//! use rplot::{fields, Chart, Fields, LinePlot, RProcess, Value};
//!
//! let mut plot = LinePlot::new(fields! { "path" => "/tmp/out.png", "type" => Value::sym("png") })?;
//! plot.add_series(Value::from(vec![1, 3, 2, 5, 4]), None, Fields::new())?;
//! plot.add_title(Value::sym("top"), Value::from("Measurements"), Fields::new())?;
//! plot.render(&mut RProcess)?;
//! # Ok::<(), rplot::PlotError>(())
//! ```

pub mod domain;
pub mod error;
pub mod params;
pub mod persistence;
pub mod plot;
pub mod rscript;

pub use error::{PlotError, PlotResult};
pub use params::{Fields, Value};
pub use plot::{
    AnyChart, BarPlot, Chart, ChartDescription, ChartKind, Histogram, LinePlot, RProcess, Renderer,
};
pub use rscript::{Command, Literal, Number};
