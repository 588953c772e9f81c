use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "texgen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the showcase composition, writing every intermediate stage.
    Showcase(ShowcaseArgs),
    /// Render a single noise texture through a black-to-white ramp.
    Noise(NoiseArgs),
    /// Render a random Voronoi layer.
    Voronoi(VoronoiArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Png,
    Tga,
}

impl From<Format> for texgen::ImageFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Png => texgen::ImageFormat::Png,
            Format::Tga => texgen::ImageFormat::Tga,
        }
    }
}

#[derive(Parser, Debug)]
struct ShowcaseArgs {
    /// Directory receiving one image per stage.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,
}

#[derive(Parser, Debug)]
struct NoiseArgs {
    /// Output image (.png or .tga).
    #[arg(long)]
    out: PathBuf,

    /// Edge length in pixels (power of two).
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// log2 of the lattice cells across the texture.
    #[arg(long, default_value_t = 2)]
    freq_x: i32,

    #[arg(long, default_value_t = 2)]
    freq_y: i32,

    #[arg(long, default_value_t = 6)]
    octaves: i32,

    #[arg(long, default_value_t = 0.5)]
    fadeoff: f32,

    #[arg(long, default_value_t = 123)]
    seed: i32,

    /// Fold each octave to its absolute value.
    #[arg(long, default_value_t = false)]
    absolute: bool,

    /// Skip amplitude normalization across octaves.
    #[arg(long, default_value_t = false)]
    unnormalized: bool,

    /// Use gradient lattice noise instead of band-limited value noise.
    #[arg(long, default_value_t = false)]
    lattice: bool,
}

#[derive(Parser, Debug)]
struct VoronoiArgs {
    /// Output image (.png or .tga).
    #[arg(long)]
    out: PathBuf,

    /// Edge length in pixels (power of two).
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Brightest possible cell, 0-255.
    #[arg(long, default_value_t = 255)]
    intensity: u8,

    /// Centers drawn before thinning (at most 256).
    #[arg(long, default_value_t = 64)]
    count: usize,

    /// Minimum distance between centers, in texture widths.
    #[arg(long, default_value_t = 0.05)]
    min_dist: f32,

    #[arg(long, default_value_t = texgen::DEFAULT_VORONOI_SEED, allow_hyphen_values = true)]
    seed: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Showcase(args) => cmd_showcase(args),
        Command::Noise(args) => cmd_noise(args),
        Command::Voronoi(args) => cmd_voronoi(args),
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_texture(tex: &texgen::Texture, path: &Path) -> anyhow::Result<()> {
    ensure_parent(path)?;
    texgen::save(tex, path).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_showcase(args: ShowcaseArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let show = texgen::render_showcase(texgen::PerlinTable::shared())?;
    let ext = texgen::ImageFormat::from(args.format).extension();
    for (name, tex) in show.stages() {
        write_texture(tex, &args.out_dir.join(format!("{name}.{ext}")))?;
    }
    Ok(())
}

fn cmd_noise(args: NoiseArgs) -> anyhow::Result<()> {
    let mode = texgen::NoiseMode::new(
        if args.lattice {
            texgen::NoiseBasis::Lattice
        } else {
            texgen::NoiseBasis::Bandlimited
        },
        if args.absolute {
            texgen::NoiseShape::Absolute
        } else {
            texgen::NoiseShape::Signed
        },
        if args.unnormalized {
            texgen::NoiseScale::Unnormalized
        } else {
            texgen::NoiseScale::Normalized
        },
    );
    let params = texgen::NoiseParams {
        freq_x: args.freq_x,
        freq_y: args.freq_y,
        octaves: args.octaves,
        fadeoff: args.fadeoff,
        seed: args.seed,
        mode,
    };

    let ramp = texgen::linear_gradient(0xff00_0000, 0xffff_ffff)?;
    let mut tex = texgen::Texture::new(args.size, args.size)?;
    texgen::noise(&mut tex, &ramp, &params, texgen::PerlinTable::shared())?;
    write_texture(&tex, &args.out)
}

fn cmd_voronoi(args: VoronoiArgs) -> anyhow::Result<()> {
    let ramp = texgen::linear_gradient(0xffff_ffff, 0xffff_ffff)?;
    let mut tex = texgen::Texture::new(args.size, args.size)?;
    texgen::random_voronoi(
        &mut tex,
        &ramp,
        args.intensity,
        args.count,
        args.min_dist,
        args.seed,
    )?;
    write_texture(&tex, &args.out)
}
