//! mdltoobj command-line entrypoint.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mdltoobj_core::{Material, Model};
use mdltoobj_io::{ConversionSession, ObjWriteOptions};
use serde::Serialize;
use tracing::{error, info};

/// Convert an STK/MDL file into a Wavefront OBJ file and its MTL library.
#[derive(Parser, Debug)]
#[command(name = "mdltoobj", version, about)]
struct Cli {
    /// MDL file to convert.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output path; `.obj` and `.mtl` are derived from it. Defaults to the input path.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Digits after the decimal point in emitted numbers
    #[arg(long, default_value = "6")]
    precision: usize,

    /// Write `map_Ka` lines without the literal `\n` token
    #[arg(long)]
    clean_texture_lines: bool,

    /// Print a JSON summary of the parsed models to stdout
    #[arg(long)]
    summary: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn write_options(&self) -> ObjWriteOptions {
        let options = ObjWriteOptions::default().with_precision(self.precision);
        if self.clean_texture_lines {
            options.with_clean_texture_lines()
        } else {
            options
        }
    }
}

#[derive(Serialize)]
struct ModelSummary<'a> {
    name: &'a str,
    vertices: usize,
    uvs: usize,
    faces: usize,
    smooth_shading: bool,
    material: &'a Material,
}

impl<'a> From<&'a Model> for ModelSummary<'a> {
    fn from(model: &'a Model) -> Self {
        Self {
            name: &model.name,
            vertices: model.vertex_count(),
            uvs: model.uv_count(),
            faces: model.face_count(),
            smooth_shading: model.smooth_shading,
            material: &model.material,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut session = ConversionSession::new();
    session
        .open_mdl_file(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    if cli.summary {
        let summaries: Vec<ModelSummary> = session.models().iter().map(ModelSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    let paths = session
        .save_obj_file(cli.output.as_deref(), &cli.write_options())
        .context("failed to write OBJ/MTL output")?;
    info!(
        obj = %paths.obj.display(),
        mtl = %paths.mtl.display(),
        models = session.models().len(),
        "Conversion finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
