//! Render packages and symbols from an EAGLE file to SVG
//!
//! Usage:
//!   eagle_svg <file> [options]
//!
//! Options:
//!   --package <name>    Render one package
//!   --symbol <name>     Render one symbol
//!   --all               Render every package and symbol (default)
//!   --scale <s>         Output units per millimetre
//!   --margin <m>        Blank border in output units
//!   --bbox              Outline the bounding box
//!   --out <dir>         Output directory (default: current directory)
//!   --config <file>     JSON config file
//!   --summary           Print a JSON summary instead of writing files

use anyhow::{anyhow, bail, Context, Result};
use eagle_cad::draw::geometry::BoundingBox;
use eagle_cad::model::{Library, Package, Symbol};
use eagle_cad::{AppConfig, Document, Geometry, HasGeometry, LayerSet, SvgRenderer};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Package(&'a Package),
    Symbol(&'a Symbol),
}

impl Target<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Target::Package(_) => "package",
            Target::Symbol(_) => "symbol",
        }
    }

    fn name(&self) -> &str {
        match self {
            Target::Package(p) => &p.name,
            Target::Symbol(s) => &s.name,
        }
    }

    fn connections(&self) -> usize {
        match self {
            Target::Package(p) => p.pad_count(),
            Target::Symbol(s) => s.pins().count(),
        }
    }
}

impl HasGeometry for Target<'_> {
    fn geometry(&self) -> &Geometry {
        match self {
            Target::Package(p) => p.geometry(),
            Target::Symbol(s) => s.geometry(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EntitySummary {
    kind: &'static str,
    name: String,
    primitives: usize,
    /// Pads for packages, pins for symbols
    connections: usize,
    bounding_box: BoundingBox,
    width: f64,
    height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
}

#[derive(Debug)]
enum Selection {
    All,
    Package(String),
    Symbol(String),
}

#[derive(Debug)]
struct Args {
    input: PathBuf,
    selection: Selection,
    scale: Option<f64>,
    margin: Option<f64>,
    bbox: bool,
    out: PathBuf,
    config: Option<PathBuf>,
    summary: bool,
}

fn usage(program: &str) {
    eprintln!("Usage: {} <file> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --package <name>   Render one package");
    eprintln!("  --symbol <name>    Render one symbol");
    eprintln!("  --all              Render every package and symbol (default)");
    eprintln!("  --scale <s>        Output units per millimetre");
    eprintln!("  --margin <m>       Blank border in output units");
    eprintln!("  --bbox             Outline the bounding box");
    eprintln!("  --out <dir>        Output directory");
    eprintln!("  --config <file>    JSON config file");
    eprintln!("  --summary          Print a JSON summary only");
}

/// Value following the option at `args[*i]`
fn take_value(args: &[String], i: &mut usize) -> Result<String> {
    let option = args.get(*i).map(String::as_str).unwrap_or_default();
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| anyhow!("{} needs a value", option))
}

fn parse_args(args: &[String]) -> Result<Args> {
    let input = match args.get(1) {
        Some(input) if !input.starts_with("--") => input,
        Some(option) => bail!("expected an input file before {}", option),
        None => bail!("missing input file"),
    };
    let mut parsed = Args {
        input: PathBuf::from(input),
        selection: Selection::All,
        scale: None,
        margin: None,
        bbox: false,
        out: PathBuf::from("."),
        config: None,
        summary: false,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--package" => parsed.selection = Selection::Package(take_value(args, &mut i)?),
            "--symbol" => parsed.selection = Selection::Symbol(take_value(args, &mut i)?),
            "--all" => parsed.selection = Selection::All,
            "--scale" => parsed.scale = Some(take_value(args, &mut i)?.parse().context("--scale")?),
            "--margin" => parsed.margin = Some(take_value(args, &mut i)?.parse().context("--margin")?),
            "--bbox" => parsed.bbox = true,
            "--out" => parsed.out = PathBuf::from(take_value(args, &mut i)?),
            "--config" => parsed.config = Some(PathBuf::from(take_value(args, &mut i)?)),
            "--summary" => parsed.summary = true,
            other => bail!("unknown option {}", other),
        }
        i += 1;
    }
    Ok(parsed)
}

/// Libraries to pick targets from: the file itself, or the copies embedded
/// in a schematic or board
fn libraries(document: &Document) -> Vec<&Library> {
    match document {
        Document::Library(d) => vec![&d.content],
        Document::Schematic(d) => d.libraries.values().collect(),
        Document::Board(d) => d.libraries.values().collect(),
    }
}

fn select<'a>(libraries: &[&'a Library], selection: &Selection) -> Result<Vec<Target<'a>>> {
    let targets: Vec<Target<'a>> = match selection {
        Selection::All => libraries
            .iter()
            .copied()
            .flat_map(|lib: &'a Library| {
                lib.packages
                    .values()
                    .map(Target::Package)
                    .chain(lib.symbols.values().map(Target::Symbol))
            })
            .collect(),
        Selection::Package(name) => libraries
            .iter()
            .copied()
            .filter_map(|lib: &'a Library| lib.package(name))
            .map(Target::Package)
            .take(1)
            .collect(),
        Selection::Symbol(name) => libraries
            .iter()
            .copied()
            .filter_map(|lib: &'a Library| lib.symbol(name))
            .map(Target::Symbol)
            .take(1)
            .collect(),
    };
    match selection {
        Selection::Package(name) | Selection::Symbol(name) if targets.is_empty() => {
            bail!("'{}' not found", name)
        }
        _ => Ok(targets),
    }
}

fn file_name(target: &Target) -> String {
    let safe: String = target
        .name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}-{}.svg", target.kind(), safe)
}

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            usage(argv.first().map(String::as_str).unwrap_or("eagle_svg"));
            return Err(err);
        }
    };

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::discover()?,
    };
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }
    if let Some(margin) = args.margin {
        config.render.margin = margin;
    }
    config.render.add_bounding_box |= args.bbox;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init().is_err() {
        warn!("global tracing subscriber already installed");
    }

    let document = eagle_cad::open(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let layers: &LayerSet = document.layers();
    let libraries = libraries(&document);
    let targets = select(&libraries, &args.selection)?;

    let renderer = SvgRenderer::new(config.render).context("invalid render options")?;
    let rendered = renderer.render_many(&targets, layers);

    if !args.summary {
        std::fs::create_dir_all(&args.out)
            .with_context(|| format!("failed to create {}", args.out.display()))?;
    }

    let mut summaries = Vec::with_capacity(targets.len());
    for (target, svg) in targets.iter().zip(&rendered) {
        let output = if args.summary {
            None
        } else {
            let path = args.out.join(file_name(target));
            svg.save(&path)?;
            Some(path)
        };
        summaries.push(EntitySummary {
            kind: target.kind(),
            name: target.name().to_string(),
            primitives: target.geometry().len(),
            connections: target.connections(),
            bounding_box: target.bounding_box(),
            width: svg.width,
            height: svg.height,
            output,
        });
    }

    info!(kind = document.kind(), rendered = summaries.len(), "done");
    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}
