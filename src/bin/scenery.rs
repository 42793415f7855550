use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::{ArgAction, Args, Parser, Subcommand};
use scenery::{
  config::OUTPUT_VAR,
  png::{self, PngRawChunkIter},
  Placement, RenderConfig,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scenery", version, about)]
struct Cli {
  /// More log output (repeat for more).
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the header and chunk list of a PNG file.
  Info {
    /// PNG file to inspect.
    path: PathBuf,
  },
  /// Composite an overlay onto a background and write the result.
  Composite(RenderArgs),
  /// Handle one line of command text, rendering if it's the render command.
  Command {
    /// The command text, such as `!battle`.
    text: String,
    #[command(flatten)]
    render: RenderArgs,
  },
}

#[derive(Args, Debug)]
struct RenderArgs {
  /// Background PNG. Without this and `--overlay`, both paths are read from
  /// `SCENERY_BACKGROUND_PATH` and `SCENERY_OVERLAY_PATH`.
  #[arg(long, requires = "overlay")]
  background: Option<PathBuf>,

  /// Overlay PNG, keyed out where it's near black.
  #[arg(long, requires = "background")]
  overlay: Option<PathBuf>,

  /// Output PNG, parent directories are created as needed.
  #[arg(long, env = OUTPUT_VAR)]
  out: Option<PathBuf>,

  /// Overlay scale factor.
  #[arg(long, default_value_t = Placement::default().scale)]
  scale: f64,

  /// Background column for the overlay's left edge.
  #[arg(long, allow_negative_numbers = true, default_value_t = Placement::default().offset_x)]
  offset_x: i32,

  /// Background row for the overlay's top edge.
  #[arg(long, allow_negative_numbers = true, default_value_t = Placement::default().offset_y)]
  offset_y: i32,

  /// Overlay pixels with every channel below this are transparent.
  #[arg(long, default_value_t = Placement::default().chroma_threshold)]
  chroma_threshold: u8,
}
impl RenderArgs {
  fn into_config(self) -> anyhow::Result<RenderConfig> {
    let mut config = match (self.background, self.overlay) {
      (Some(background), Some(overlay)) => RenderConfig::new(background, overlay),
      _ => RenderConfig::from_env().context("no --background and --overlay given")?,
    };
    if let Some(out) = self.out {
      config.output_path = out;
    }
    config.placement = Placement {
      scale: self.scale,
      offset_x: self.offset_x,
      offset_y: self.offset_y,
      chroma_threshold: self.chroma_threshold,
    };
    Ok(config)
  }
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match cli.cmd {
    Command::Info { path } => info(&path),
    Command::Composite(args) => {
      let config = args.into_config()?;
      let out = scenery::render_scene(&config)
        .with_context(|| format!("rendering {}", config.output_path.display()))?;
      println!("{}", out.display());
      Ok(())
    }
    Command::Command { text, render } => {
      let config = render.into_config()?;
      match scenery::handle_command(&text, &config).context("handling command")? {
        Some(out) => println!("{}", out.display()),
        None => println!("(no action)"),
      }
      Ok(())
    }
  }
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::WARN,
    1 => LevelFilter::INFO,
    2 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  };
  let filter = filter::Targets::new().with_default(LevelFilter::WARN).with_target("scenery", level);
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
}

fn info(path: &Path) -> anyhow::Result<()> {
  let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
  if !png::is_png_header_correct(&bytes) {
    bail!("{} doesn't start with the PNG signature", path.display());
  }
  for chunk in PngRawChunkIter::new(&bytes) {
    let crc = if chunk.declared_crc() == chunk.actual_crc() { "ok" } else { "BAD" };
    let kind = if chunk.type_().is_critical() { "critical" } else { "ancillary" };
    println!("{:?}: {} bytes, {kind}, crc {crc}", chunk.type_(), chunk.data().len());
  }
  let container =
    png::parse_container(&bytes).with_context(|| format!("parsing {}", path.display()))?;
  let ihdr = container.ihdr;
  println!(
    "{}x{}, {}-bit {:?}, {} compressed bytes",
    ihdr.width,
    ihdr.height,
    ihdr.bit_depth,
    ihdr.color_type,
    container.idat.len()
  );
  Ok(())
}
