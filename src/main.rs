use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use memegen::platform::{DirectoryDownloads, Host, LogAlerts};
use memegen::{Alignment, BlockId, ImageFile, MemeConfig, MemeSession, Point, Rgb};
use std::path::PathBuf;

/// Put top/bottom text on an image and save it as meme.png
#[derive(Parser, Debug)]
#[command(name = "memegen", version, about)]
struct Args {
    /// Image to caption
    #[arg(long)]
    image: PathBuf,

    /// Top line
    #[arg(long, default_value = "")]
    top: String,

    /// Bottom line
    #[arg(long, default_value = "")]
    bottom: String,

    /// Font size in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(10..=100))]
    font_size: Option<u32>,

    /// Text color, e.g. #ffffff
    #[arg(long)]
    color: Option<Rgb>,

    /// left, center or right
    #[arg(long)]
    align: Option<Alignment>,

    /// Explicit top anchor as X,Y
    #[arg(long)]
    top_pos: Option<Point>,

    /// Explicit bottom anchor as X,Y
    #[arg(long)]
    bottom_pos: Option<Point>,

    /// Drag gesture X1,Y1:X2,Y2 (press, move, release); repeatable
    #[arg(long = "drag")]
    drags: Vec<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the export is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the SHA-256 of the exported PNG
    #[arg(long)]
    digest: bool,
}

fn parse_drag(s: &str) -> Result<(Point, Point)> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("drag must look like X1,Y1:X2,Y2, got '{}'", s))?;
    Ok((from.parse()?, to.parse()?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MemeConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MemeConfig::default(),
    };
    let host = Host::new(LogAlerts, DirectoryDownloads::new(&args.out_dir));
    let mut session = MemeSession::new(config, host);

    let file = ImageFile::from_path(&args.image)
        .with_context(|| format!("reading {}", args.image.display()))?;
    session
        .upload(file)
        .with_context(|| format!("loading {}", args.image.display()))?;

    session.set_text(BlockId::Top, args.top.as_str());
    session.set_text(BlockId::Bottom, args.bottom.as_str());
    if let Some(size) = args.font_size {
        session.set_font_size(size);
    }
    if let Some(color) = args.color {
        session.set_color(color);
    }
    if let Some(align) = args.align {
        session.set_alignment(align);
    }
    if args.top_pos.is_some() {
        session.set_anchor(BlockId::Top, args.top_pos);
    }
    if args.bottom_pos.is_some() {
        session.set_anchor(BlockId::Bottom, args.bottom_pos);
    }

    for gesture in &args.drags {
        let (from, to) = parse_drag(gesture)?;
        match session.pointer_down(from) {
            Some(block) => {
                session.pointer_move(to);
                session.pointer_up();
                info!("moved {:?} to ({}, {})", block, to.x, to.y);
            }
            None => info!("drag at ({}, {}) grabbed nothing", from.x, from.y),
        }
    }

    let download = session.export().context("exporting")?;
    if args.digest {
        let frame = session.render()?;
        println!("{}  {}", frame.digest(), download.file_name);
    }
    Ok(())
}
