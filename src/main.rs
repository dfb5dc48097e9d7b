use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rplot::persistence::config::load_settings;
use rplot::{Chart, ChartDescription, RProcess};

#[derive(Parser)]
#[command(name = "rplot", about = "Render a chart description through R")]
struct Cli {
    /// Chart description file (TOML)
    input: PathBuf,
    /// Print the generated script instead of running it
    #[arg(long)]
    dry_run: bool,
    /// Interpreter command, overriding settings and the description
    #[arg(long)]
    interpreter: Option<String>,
    /// Where to write the script before running it
    #[arg(long)]
    script_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let mut description = ChartDescription::from_toml(&source)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    load_settings().apply_to(&mut description.document);
    if let Some(interpreter) = cli.interpreter {
        description
            .document
            .insert("interpreter_path".to_string(), toml::Value::String(interpreter));
    }
    if let Some(path) = cli.script_path {
        description.document.insert(
            "script_path".to_string(),
            toml::Value::String(path.to_string_lossy().into_owned()),
        );
    }

    let mut chart = description
        .build()
        .with_context(|| format!("invalid chart in {}", cli.input.display()))?;

    if cli.dry_run {
        println!("{}", chart.script()?);
        return Ok(());
    }

    let output = chart.render(&mut RProcess).context("rendering failed")?;
    print!("{}", output);
    Ok(())
}
