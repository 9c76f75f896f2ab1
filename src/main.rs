use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use slidemark::config::Config;
use slidemark::draw::{RecordingSurface, RenderOptions, render_annotations};
use slidemark::session;
use slidemark::util::Viewport;
use slidemark::{Annotation, OcclusionResolver};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "slidemark")]
#[command(version, about = "Whiteboard annotation renderer and eraser resolver")]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print which annotations survive element erasers, as a JSON array
    Visibility(PassArgs),
    /// Render visible annotations
    Render {
        #[command(flatten)]
        pass: PassArgs,

        /// Print the recorded drawing operations as JSON
        #[arg(long)]
        ops: bool,

        /// Write a PNG (requires the `cairo` feature)
        #[arg(long, short = 'o', value_name = "PNG")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct PassArgs {
    /// JSON file with an annotation array or a whiteboard snapshot
    #[arg(long, short = 'i', value_name = "FILE")]
    input: PathBuf,

    /// Slide width in pixels
    #[arg(long)]
    width: f64,

    /// Slide height in pixels
    #[arg(long)]
    height: f64,
}

impl PassArgs {
    fn viewport(&self) -> Result<Viewport> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                bail!("--{name} must be a positive number of pixels, got {value}");
            }
        }
        Ok(Viewport::new(self.width, self.height))
    }

    fn annotations(&self) -> Result<Vec<Annotation>> {
        let annotations = session::read_annotations(&self.input)?;
        log::info!(
            "Read {} annotations from {}",
            annotations.len(),
            self.input.display()
        );
        Ok(annotations)
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            Config::load_from(path)
        }
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let options = RenderOptions::from_config(&config);

    match cli.command {
        Command::Visibility(pass) => {
            let viewport = pass.viewport()?;
            let annotations = pass.annotations()?;
            let visibility = OcclusionResolver::new(&options.statuses)
                .with_curve_step(options.curve_sample_step)
                .resolve(&annotations, viewport);
            println!("{}", serde_json::to_string(&visibility)?);
        }
        Command::Render { pass, ops, output } => {
            let viewport = pass.viewport()?;
            let annotations = pass.annotations()?;

            if let Some(output) = output {
                render_png(&annotations, viewport, &options, &output)?;
            }

            let mut surface = RecordingSurface::new();
            let visibility = render_annotations(&mut surface, &annotations, viewport, &options);
            if ops {
                println!(
                    "{}",
                    serde_json::to_string_pretty(surface.ops())
                        .context("Failed to serialize drawing operations")?
                );
            } else {
                let visible = visibility.iter().filter(|v| **v).count();
                println!(
                    "Rendered {visible} of {} annotations ({} marks)",
                    annotations.len(),
                    surface.paint_count()
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cairo")]
fn render_png(
    annotations: &[Annotation],
    viewport: Viewport,
    options: &RenderOptions,
    output: &Path,
) -> Result<()> {
    slidemark::draw::render_to_png(annotations, viewport, options, output)?;
    Ok(())
}

#[cfg(not(feature = "cairo"))]
fn render_png(
    _annotations: &[Annotation],
    _viewport: Viewport,
    _options: &RenderOptions,
    output: &Path,
) -> Result<()> {
    bail!(
        "Cannot write {}: PNG output requires building with the `cairo` feature",
        output.display()
    )
}
