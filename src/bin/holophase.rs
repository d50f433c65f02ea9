use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use holophase::{PipelineConfig, RunPaths, Shape};

#[derive(Parser, Debug)]
#[command(name = "holophase", version)]
struct Cli {
    /// Log stage details (shapes, bins, phase extent).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the OLED texture, SLM depth and SLM phase mask PNGs.
    Compute(ComputeArgs),
    /// Print the default pipeline config as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct ComputeArgs {
    /// Color texture image.
    #[arg(long)]
    texture: PathBuf,

    /// Grayscale diopter (depth) image.
    #[arg(long)]
    depth: PathBuf,

    /// OLED -> SLM homography: 9 numbers as text, or a 3x3 JSON array (.json).
    #[arg(long)]
    homography: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Pipeline config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of depth levels to quantize to.
    #[arg(long)]
    levels: Option<usize>,

    /// Skip depth quantization.
    #[arg(long, default_value_t = false)]
    no_discretize: bool,

    /// Working range W in diopters.
    #[arg(long)]
    working_range: Option<f64>,

    /// Phase modulation period multiplier.
    #[arg(long)]
    mod_num: Option<f64>,

    /// OLED resolution as HEIGHTxWIDTH.
    #[arg(long, value_parser = parse_shape)]
    oled: Option<Shape>,

    /// SLM resolution as HEIGHTxWIDTH (also sets the declared panel size).
    #[arg(long, value_parser = parse_shape)]
    slm: Option<Shape>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Compute(args) => cmd_compute(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_compute(args: ComputeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(levels) = args.levels {
        config.num_depths = levels;
    }
    if args.no_discretize {
        config.discretize = false;
    }
    if let Some(w) = args.working_range {
        config.params = config.params.with_working_range(w);
    }
    if let Some(m) = args.mod_num {
        config.mod_num = m;
    }
    if let Some(oled) = args.oled {
        config.oled_shape = oled;
    }
    if let Some(slm) = args.slm {
        config.slm_shape = slm;
        config.params.slm_height = slm.height;
        config.params.slm_width = slm.width;
    }
    config.validate().context("invalid pipeline config")?;

    tracing::info!(oled = %config.oled_shape, slm = %config.slm_shape, "target shapes");
    let paths = RunPaths {
        texture: args.texture,
        diopter: args.depth,
        homography: args.homography,
        out_dir: args.out,
    };
    let written = holophase::run_from_paths(&config, &paths)?;
    eprintln!("wrote {}", written.oled_texture.display());
    eprintln!("wrote {}", written.slm_depth.display());
    eprintln!("wrote {}", written.phase_mask.display());
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&PipelineConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}

fn parse_shape(s: &str) -> Result<Shape, String> {
    let (h, w) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected HEIGHTxWIDTH, got '{s}'"))?;
    let h: usize = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    let w: usize = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    if h == 0 || w == 0 {
        return Err(format!("shape must be non-empty, got '{s}'"));
    }
    Ok(Shape::new(h, w))
}
