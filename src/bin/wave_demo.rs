use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::{Write, stdout},
    path::PathBuf,
    sync::mpsc,
};
use wave_loading::{DrawCommand, ImageType, SizeConstraint, Ticker, WaveConfig, WaveLoadingView};

/// Renders a loading wave in the terminal, one cell per pixel.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A YAML file with the wave configuration.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// The element style.
    #[clap(short, long)]
    style: Option<ImageType>,

    /// The number of elements a wave spans.
    #[clap(short, long)]
    wave_length: Option<usize>,

    /// The number of elements drawn.
    #[clap(short, long)]
    visible: Option<usize>,

    /// Fade elements in and out around the crest.
    #[clap(short, long)]
    ghost: bool,

    /// The number of frames to render before exiting.
    #[clap(short, long, default_value_t = 100)]
    frames: usize,
}

fn load_config(cli: &Cli) -> Result<WaveConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            WaveConfig::from_yaml(&contents).context("parsing configuration")?
        }
        None => WaveConfig { wave_length: 5, visible_length: Some(16), element_size: 2, interval: 1, ..Default::default() },
    };
    if let Some(style) = cli.style {
        config.image_type = style;
    }
    if let Some(wave_length) = cli.wave_length {
        config.wave_length = wave_length;
    }
    if let Some(visible) = cli.visible {
        config.visible_length = Some(visible);
    }
    config.ghost_effect |= cli.ghost;
    Ok(config)
}

/// A grid of characters standing in for a pixel surface.
struct CellCanvas {
    width: usize,
    cells: Vec<Vec<char>>,
}

impl CellCanvas {
    fn new(width: i32, height: i32) -> Self {
        let width = width.max(0) as usize;
        Self { width, cells: vec![vec![' '; width]; height.max(0) as usize] }
    }

    fn put(&mut self, x: i32, y: i32, ch: char) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = ch;
        }
    }

    fn fill(&mut self, left: i32, top: i32, right: i32, bottom: i32, ch: char) {
        for y in top..bottom {
            for x in left..right {
                self.put(x, y, ch);
            }
        }
    }

    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Glyph { ch, x, y, .. } => self.put(*x, *y, *ch),
            DrawCommand::Circle { cx, cy, radius, alpha, .. } => {
                let ch = shade(*alpha);
                self.fill(cx - radius, cy - radius, cx + radius, cy + radius, ch);
            }
            DrawCommand::Rect { left, top, right, bottom, alpha, .. } => {
                self.fill(*left, *top, (*right).max(left + 1), *bottom, shade(*alpha));
            }
            DrawCommand::Image { left, top, right, bottom, .. } => self.fill(*left, *top, *right, *bottom, '*'),
        }
    }

    fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.iter().map(|row| row.iter().take(self.width).collect())
    }
}

fn shade(alpha: Option<u8>) -> char {
    match alpha {
        None => '#',
        Some(0..=99) => '.',
        Some(100..=179) => '+',
        Some(180..=254) => 'o',
        Some(255) => '#',
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut view = WaveLoadingView::new(&config).context("invalid wave configuration")?;
    let size = view.measure(SizeConstraint::AtMost(i32::MAX), SizeConstraint::AtMost(i32::MAX));
    view.layout(size);

    let (sender, ticks) = mpsc::channel();
    let ticker = Ticker::spawn(sender, view.duration())?;
    let mut rng = fastrand::Rng::new();
    let mut out = stdout();
    execute!(out, Hide, Clear(ClearType::All))?;
    for _ in 0..cli.frames {
        let mut canvas = CellCanvas::new(size.width, size.height);
        for command in view.render(&mut rng) {
            canvas.draw(&command);
        }
        queue!(out, MoveTo(0, 0))?;
        for line in canvas.lines() {
            queue!(out, Print(line), Print("\r\n"))?;
        }
        out.flush()?;

        ticks.recv().context("ticker stopped")?;
        view.tick();
    }
    drop(ticker);
    execute!(out, Show)?;
    Ok(())
}
