//! Chart assembly: documents, series bookkeeping, and the rendering seam.

pub mod bar;
pub mod description;
pub mod document;
pub mod histogram;
pub mod line;
pub mod renderer;
pub mod series;

pub use bar::BarPlot;
pub use description::{AnyChart, ChartDescription, ChartKind};
pub use document::{Category, CommandBuckets, DocumentState, PlotDocument};
pub use histogram::Histogram;
pub use line::{LinePlot, RangeSpec};
pub use renderer::{RProcess, Renderer};
pub use series::Series;

use crate::error::PlotResult;
use crate::params::value::{Fields, Value};

/// Behaviour shared by every chart kind.
///
/// Implementors provide the document and the final command list; annotations
/// and rendering come for free.
pub trait Chart {
    fn document(&self) -> &PlotDocument;

    fn document_mut(&mut self) -> &mut PlotDocument;

    /// Final commands, built on a copy of the accumulated ones.
    fn assemble(&self) -> PlotResult<CommandBuckets>;

    fn add_title(&mut self, position: Value, title: Value, options: Fields) -> PlotResult<()> {
        self.document_mut().add_title(position, title, options)
    }

    fn add_legend(&mut self, position: Value, names: Value, options: Fields) -> PlotResult<()> {
        self.document_mut().add_legend(position, names, options)
    }

    fn add_text(&mut self, text: Value, location: Value, options: Fields) -> PlotResult<()> {
        self.document_mut().add_text(text, location, options)
    }

    fn add_reference_line(&mut self, options: Fields) -> PlotResult<()> {
        self.document_mut().add_reference_line(options)
    }

    fn add_line(&mut self, options: Fields) -> PlotResult<()> {
        self.document_mut().add_line(options)
    }

    fn add_axis(&mut self, options: Fields) -> PlotResult<()> {
        self.document_mut().add_axis(options)
    }

    /// The script `render` would write, without writing or running it.
    fn script(&self) -> PlotResult<String> {
        Ok(self.assemble()?.to_script())
    }

    /// Persist and execute the script, returning the interpreter's output.
    fn render(&mut self, renderer: &mut dyn Renderer) -> PlotResult<String> {
        let commands = self.assemble()?;
        self.document_mut().emit(&commands, renderer)
    }
}
