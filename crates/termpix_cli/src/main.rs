mod config;
mod logging;
mod test_card;

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use termpix_render::{
    validate_font_aspect, ColorCode, FrameSeries, GlyphRamp, RenderError, RenderMode,
    RenderOptions, TermFrame, TermRenderer, Viewport,
};

/// Virtual source resolution the test card is fitted from.
const CARD_SOURCE: (u32, u32) = (320, 200);

/// Used when the terminal size cannot be queried.
const FALLBACK_VIEWPORT: Viewport = Viewport { columns: 80, rows: 24 };

const CURSOR_HOME: &str = "\x1b[H";

#[derive(Parser, Debug)]
#[command(author, version, about = "Preview palette images as 256-color terminal text")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the built-in test card once
    Demo(DemoArgs),
    /// Play a scrolling test card
    Animate(AnimateArgs),
    /// Fill the screen with the background color
    Blank(ViewportArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Text shown on a status line under the image
    #[arg(long)]
    status: Option<String>,
    #[command(flatten)]
    viewport: ViewportArgs,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Frames in one scroll loop
    #[arg(long, default_value_t = 24)]
    frames: usize,
    /// Playback rate
    #[arg(long, default_value_t = 12.0)]
    fps: f32,
    /// Total playback time in seconds
    #[arg(long, default_value_t = 5.0)]
    seconds: f32,
    #[command(flatten)]
    viewport: ViewportArgs,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct ViewportArgs {
    /// Viewport width in cells (defaults to the terminal width)
    #[arg(long)]
    width: Option<u16>,
    /// Viewport height in cells (defaults to the terminal height)
    #[arg(long)]
    height: Option<u16>,
    /// Background palette code used for padding
    #[arg(long)]
    background: Option<u16>,
    /// TOML file with render options
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Encoding mode
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,
    /// Glyph ramp preset
    #[arg(long, value_enum, conflicts_with = "ramp_chars")]
    ramp: Option<RampPreset>,
    /// Custom glyph ramp, sparse to dense
    #[arg(long)]
    ramp_chars: Option<String>,
    /// Font aspect ratio (cell height / cell width)
    #[arg(long)]
    font_aspect: Option<f32>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeChoice {
    Glyphs,
    HalfBlocks,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RampPreset {
    Terminal,
    Standard,
    Detailed,
    Blocks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.verbose).context("failed to install logger")?;

    match cli.command {
        Commands::Demo(args) => demo(args),
        Commands::Animate(args) => animate(args),
        Commands::Blank(args) => blank(args),
    }
}

fn demo(args: DemoArgs) -> Result<()> {
    let options = args.settings.apply(args.viewport.options()?)?;
    let background = options.background;
    let renderer = TermRenderer::new(options);

    let mut viewport = args.viewport.resolve();
    if args.status.is_some() {
        viewport.rows = viewport.rows.saturating_sub(1);
    }

    let mut frame = render_card(&renderer, viewport, 0).context("failed to render test card")?;
    if let Some(status) = &args.status {
        frame = frame.with_status_line(background, status);
    }

    write_frame(&frame)
}

fn animate(args: AnimateArgs) -> Result<()> {
    let options = args.settings.apply(args.viewport.options()?)?;
    let renderer = TermRenderer::new(options);
    let viewport = args.viewport.resolve();

    let fps = args.fps.max(0.1);
    let frame_duration = Duration::from_secs_f32(1.0 / fps);
    let mut series = FrameSeries::new();
    series.set_viewport(viewport);
    series
        .rebuild_from(args.frames.max(1), frame_duration, |index, viewport| {
            render_card(&renderer, viewport, index)
        })
        .context("failed to encode animation frames")?;
    log::info!(
        "encoded {} frames for {:?}, loop of {:?}",
        series.len(),
        series.viewport(),
        series.total_duration()
    );

    let total = Duration::try_from_secs_f32(args.seconds)
        .with_context(|| format!("invalid --seconds {}", args.seconds))?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let start = Instant::now();

    while start.elapsed() < total {
        let Some(index) = series.frame_index_at(start.elapsed()) else {
            break;
        };
        let Some(frame) = series.frame(index) else {
            break;
        };
        write!(out, "{CURSOR_HOME}{frame}").context("failed to write frame")?;
        out.flush().context("failed to flush frame")?;
        thread::sleep(series.duration_of(index).unwrap_or(frame_duration));
    }

    writeln!(out).context("failed to write frame")?;
    Ok(())
}

fn blank(args: ViewportArgs) -> Result<()> {
    let renderer = TermRenderer::new(args.options()?);
    write_frame(&renderer.blank(args.resolve()))
}

fn render_card(
    renderer: &TermRenderer,
    viewport: Viewport,
    phase: usize,
) -> Result<TermFrame, RenderError> {
    let (source_width, source_height) = CARD_SOURCE;
    let size = renderer.fit_image(source_width, source_height, viewport)?;
    log::debug!("test card fitted to {}x{}", size.columns, size.rows);

    let card = test_card::build(size, phase);
    renderer.render(&card, viewport)
}

fn write_frame(frame: &TermFrame) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{frame}").context("failed to write frame")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

impl ViewportArgs {
    fn options(&self) -> Result<RenderOptions> {
        let mut options = config::load(self.config.as_deref())?;
        if let Some(background) = self.background {
            options.background = ColorCode(background);
        }
        Ok(options)
    }

    fn resolve(&self) -> Viewport {
        let detected = terminal_size::terminal_size()
            .map(|(width, height)| Viewport::new(width.0, height.0))
            .unwrap_or(FALLBACK_VIEWPORT);

        Viewport::new(
            self.width.unwrap_or(detected.columns),
            self.height.unwrap_or(detected.rows),
        )
    }
}

impl RenderSettings {
    fn apply(&self, mut options: RenderOptions) -> Result<RenderOptions> {
        if let Some(mode) = self.mode {
            options.mode = mode.to_mode();
        }
        if let Some(preset) = self.ramp {
            options.ramp = preset.to_ramp();
        }
        if let Some(chars) = &self.ramp_chars {
            options.ramp = GlyphRamp::new(chars.as_str()).context("invalid --ramp-chars")?;
        }
        if let Some(font_aspect) = self.font_aspect {
            options.font_aspect =
                validate_font_aspect(font_aspect).context("invalid --font-aspect")?;
        }
        Ok(options)
    }
}

impl ModeChoice {
    fn to_mode(self) -> RenderMode {
        match self {
            ModeChoice::Glyphs => RenderMode::Glyphs,
            ModeChoice::HalfBlocks => RenderMode::HalfBlocks,
        }
    }
}

impl RampPreset {
    fn to_ramp(self) -> GlyphRamp {
        match self {
            RampPreset::Terminal => GlyphRamp::terminal(),
            RampPreset::Standard => GlyphRamp::standard(),
            RampPreset::Detailed => GlyphRamp::detailed(),
            RampPreset::Blocks => GlyphRamp::blocks(),
        }
    }
}
