mod sink;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Report};

use floorsketch::outline::ManualOutline;
use floorsketch::{
    ArtifactSink, Floorplan, FloorplanConfig, FloorplanError, FloorplanSource, SourceKind,
    generate_floorplan, load_vertices,
};
use sink::DirectorySink;

#[derive(Parser)]
#[command(name = "floorsketch", version, about = "Render room scans as 2D SVG floorplans")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory the SVG and its metadata are written to
    #[arg(short, long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// JSON file overriding render and hull settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Structured RoomPlan export (JSON)
    Document { input: PathBuf },
    /// Raw scan mesh: Wavefront OBJ or a JSON vertex array
    Mesh { input: PathBuf },
    /// Manually traced outline: {"points": [{"x": .., "y": ..}], "scale": ..}
    Outline {
        input: PathBuf,
        /// Overrides the scale stored in the file
        #[arg(long)]
        scale: Option<f64>,
    },
}

impl Command {
    fn input(&self) -> &Path {
        match self {
            Command::Document { input }
            | Command::Mesh { input }
            | Command::Outline { input, .. } => input,
        }
    }

    fn kind(&self) -> SourceKind {
        match self {
            Command::Document { .. } => SourceKind::Roomplan,
            Command::Mesh { .. } => SourceKind::Mesh,
            Command::Outline { .. } => SourceKind::Outline,
        }
    }

    /// Turn already-read input text into a pipeline source
    fn source(&self, name: &str, text: String) -> Result<FloorplanSource, FloorplanError> {
        Ok(match self {
            Command::Document { .. } => FloorplanSource::Json {
                name: name.to_string(),
                text,
            },
            Command::Mesh { .. } => FloorplanSource::Vertices(load_vertices(name, &text)?),
            Command::Outline { scale, .. } => {
                let outline = ManualOutline::from_json_str(name, &text)?;
                FloorplanSource::Outline {
                    points: outline.points(),
                    scale: scale.unwrap_or(outline.scale),
                }
            }
        })
    }
}

fn main() -> miette::Result<()> {
    // Logs go to stderr; stdout only carries the summary line
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = read(path)?;
            FloorplanConfig::from_json_str(&path.display().to_string(), &text)?
        }
        None => FloorplanConfig::default(),
    };

    let input = args.command.input();
    let name = input.display().to_string();
    let text = read(input)?;

    let floorplan = match args.command.source(&name, text) {
        Ok(source) => generate_floorplan(&source, &config),
        Err(err) => {
            tracing::error!(input = %name, error = %err, "could not read input, using fallback");
            let floorplan = Floorplan::fallback(args.command.kind(), &err);
            eprintln!("{:?}", Report::new(err));
            floorplan
        }
    };

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "floorplan".to_string());
    let mut sink = DirectorySink::new(&args.out_dir, stem);
    let handle = sink.persist(floorplan.to_artifact())?;
    sink.write_metadata(&floorplan.metadata)?;

    if floorplan.metadata.fallback {
        let reason = floorplan.metadata.error.as_deref().unwrap_or("unknown error");
        println!("{handle}: fallback drawing ({reason})");
    } else {
        let canvas = floorplan.metadata.canvas;
        println!("{handle}: {}x{} px", canvas.width, canvas.height);
    }
    for warning in &floorplan.metadata.warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}

fn read(path: &Path) -> miette::Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))
}
