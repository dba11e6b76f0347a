use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spritegrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect a sprite sheet and its animation metadata.
    Probe(ProbeArgs),
    /// Export an animated sprite sheet as a standalone APNG.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Animation metadata JSON; defaults to `<sheet>.mcmeta`.
    #[arg(long)]
    meta: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Animation metadata JSON; defaults to `<sheet>.mcmeta`.
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Output APNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn meta_path(sheet: &Path, meta: Option<PathBuf>) -> PathBuf {
    meta.unwrap_or_else(|| {
        let mut p = sheet.as_os_str().to_owned();
        p.push(".mcmeta");
        PathBuf::from(p)
    })
}

fn load_animation(
    sheet_path: &Path,
    meta: Option<PathBuf>,
) -> anyhow::Result<(spritegrid::SpriteSheet, spritegrid::ResolvedAnimation)> {
    let bytes = std::fs::read(sheet_path)
        .with_context(|| format!("read sheet '{}'", sheet_path.display()))?;
    let sheet = spritegrid::SpriteSheet::new(spritegrid::decode_image(&bytes)?);

    let meta_path = meta_path(sheet_path, meta);
    let meta_bytes = std::fs::read(&meta_path)
        .with_context(|| format!("read metadata '{}'", meta_path.display()))?;
    let descriptor = spritegrid::parse_descriptor(&meta_bytes)?
        .ok_or_else(|| anyhow::anyhow!("'{}' has no animation block", meta_path.display()))?;
    let resolved = descriptor.resolve(&sheet)?;
    Ok((sheet, resolved))
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let (sheet, anim) = load_animation(&args.sheet, args.meta)?;
    let dims = sheet.dims();
    println!("sheet:        {}x{}", dims.width, dims.height);
    println!(
        "frame:        {}x{} ({} in sheet)",
        anim.frame_dims.width, anim.frame_dims.height, anim.sheet_frame_count
    );
    println!("interpolate:  {}", anim.interpolate);
    println!("sequence:     {} frames", anim.frames.len());
    for (i, spec) in anim.frames.iter().enumerate() {
        println!(
            "  {:>3}: sprite {} for {} tick(s)",
            i, spec.sprite_index, spec.duration_ticks
        );
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (sheet, anim) = load_animation(&args.sheet, args.meta)?;
    let bytes = spritegrid::encode_apng(&sheet, &anim)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write apng '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
