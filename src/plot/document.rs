//! Command accumulation shared by every chart kind.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::{PlotError, PlotResult};
use crate::params::commands::{Abline, Axis, CommandSchema, Legend, Lines, Output, Par, Text, Title};
use crate::params::value::{Fields, Value};
use crate::plot::renderer::Renderer;
use crate::plot::series::{Series, DEFAULT_SERIES_COLOR};
use crate::rscript::{Command, Number};

/// Script file used when the document args name none.
pub const DEFAULT_SCRIPT_PATH: &str = "/tmp/r-tmp-plot";
/// Interpreter used when the document args name none.
pub const DEFAULT_INTERPRETER: &str = "R";

/// Buckets a command can land in, in script order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Output = 0,
    GlobalStyle,
    PlotFrame,
    ReferenceLines,
    Lines,
    Legends,
    Titles,
    Axes,
    TextAnnotations,
    Points,
}

impl Category {
    pub const ORDER: [Category; 10] = [
        Category::Output,
        Category::GlobalStyle,
        Category::PlotFrame,
        Category::ReferenceLines,
        Category::Lines,
        Category::Legends,
        Category::Titles,
        Category::Axes,
        Category::TextAnnotations,
        Category::Points,
    ];
}

/// Commands grouped by category; call order is kept inside each bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuckets([Vec<Command>; 10]);

impl CommandBuckets {
    pub fn push(&mut self, category: Category, command: Command) {
        self.0[category as usize].push(command);
    }

    pub fn get(&self, category: Category) -> &[Command] {
        &self.0[category as usize]
    }

    /// All commands in script order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.0.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One command per line.
    pub fn to_script(&self) -> String {
        self.iter().map(Command::to_r).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Only the output and global style commands exist.
    Empty,
    Accumulating,
    Rendered,
}

/// Document args, accumulated commands and series of one chart.
#[derive(Debug, Clone)]
pub struct PlotDocument {
    args: Fields,
    commands: CommandBuckets,
    series: Vec<Series>,
    state: DocumentState,
    script_path: PathBuf,
    interpreter_path: String,
}

impl PlotDocument {
    /// Validate `args` and seed the output and global style commands.
    pub fn new(args: Fields) -> PlotResult<Self> {
        let script_path = PathBuf::from(args.text("script_path")?.unwrap_or(DEFAULT_SCRIPT_PATH));
        let interpreter_path = args
            .text("interpreter_path")?
            .unwrap_or(DEFAULT_INTERPRETER)
            .to_string();

        let mut commands = CommandBuckets::default();
        commands.push(Category::Output, Output.build(&args)?);
        commands.push(Category::GlobalStyle, Par.build(&args)?);

        Ok(Self {
            args,
            commands,
            series: Vec::new(),
            state: DocumentState::Empty,
            script_path,
            interpreter_path,
        })
    }

    pub fn args(&self) -> &Fields {
        &self.args
    }

    pub fn commands(&self) -> &CommandBuckets {
        &self.commands
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    pub fn interpreter_path(&self) -> &str {
        &self.interpreter_path
    }

    pub fn ensure_open(&self) -> PlotResult<()> {
        if self.state == DocumentState::Rendered {
            return Err(PlotError::state("the chart has already been rendered"));
        }
        Ok(())
    }

    /// Build `input` with `schema` and append it to `category`.
    ///
    /// Nothing is recorded when the build fails.
    pub fn push_command(
        &mut self,
        category: Category,
        schema: &dyn CommandSchema,
        input: &Fields,
    ) -> PlotResult<()> {
        self.ensure_open()?;
        let command = schema.build(input)?;
        self.commands.push(category, command);
        self.state = DocumentState::Accumulating;
        Ok(())
    }

    pub fn add_title(&mut self, position: Value, title: Value, options: Fields) -> PlotResult<()> {
        let input = Fields::new()
            .with("position", position)
            .with("title", title)
            .merged(&options);
        self.push_command(Category::Titles, &Title, &input)
    }

    pub fn add_legend(&mut self, position: Value, names: Value, options: Fields) -> PlotResult<()> {
        let input = Fields::new()
            .with("position", position)
            .with("name", names)
            .merged(&options);
        self.push_command(Category::Legends, &Legend, &input)
    }

    pub fn add_text(&mut self, text: Value, location: Value, options: Fields) -> PlotResult<()> {
        let input = Fields::new()
            .with("text", text)
            .with("location", location)
            .merged(&options);
        self.push_command(Category::TextAnnotations, &Text, &input)
    }

    pub fn add_reference_line(&mut self, options: Fields) -> PlotResult<()> {
        self.push_command(Category::ReferenceLines, &Abline, &options)
    }

    pub fn add_line(&mut self, options: Fields) -> PlotResult<()> {
        self.push_command(Category::Lines, &Lines, &options)
    }

    pub fn add_axis(&mut self, options: Fields) -> PlotResult<()> {
        self.push_command(Category::Axes, &Axis, &options)
    }

    /// Record a series. `x` defaults to the indices of `y`.
    ///
    /// Options get `color` black and `name` `series[<index>]` unless they set them.
    pub fn push_series(&mut self, y: Value, x: Option<Value>, options: Fields) -> PlotResult<&Series> {
        self.ensure_open()?;
        let y = y.to_numbers("y")?;
        if y.is_empty() {
            return Err(PlotError::validation("y", "a series needs at least one value"));
        }
        let x = match x {
            Some(x) => {
                let x = x.to_numbers("x")?;
                if x.len() != y.len() {
                    return Err(PlotError::validation(
                        "x",
                        format!("has {} values but y has {}", x.len(), y.len()),
                    ));
                }
                x
            }
            None => (0..y.len() as i64).map(Number::Int).collect(),
        };

        let mut options = options;
        options.set_default("color", Value::sym(DEFAULT_SERIES_COLOR));
        options.set_default("name", format!("series[{}]", self.series.len()));

        self.series.push(Series { x, y, options });
        self.state = DocumentState::Accumulating;
        Ok(&self.series[self.series.len() - 1])
    }

    /// Persist `commands` as a script and run it.
    pub fn emit(&mut self, commands: &CommandBuckets, renderer: &mut dyn Renderer) -> PlotResult<String> {
        let script = commands.to_script();
        info!(
            "rendering {} commands through {}",
            commands.len(),
            self.interpreter_path
        );
        renderer.persist(&script, &self.script_path)?;
        let output = renderer.execute(&self.interpreter_path, &self.script_path)?;
        self.state = DocumentState::Rendered;
        Ok(output)
    }
}
