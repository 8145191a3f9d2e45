use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use constellation_field::{Boundary, FieldParams, ParticleCount, PointerMode};

#[derive(Parser, Debug)]
#[command(name = "constellation")]
#[command(about = "Animated constellation background with linked particles")]
#[command(version)]
pub struct Cli {
    /// JSON file with field parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fixed number of particles
    #[arg(short = 'n', long)]
    pub particles: Option<usize>,

    /// What happens when a particle reaches an edge
    #[arg(long, value_enum)]
    pub boundary: Option<BoundaryArg>,

    /// How the cursor pushes particles
    #[arg(long, value_enum)]
    pub pointer: Option<PointerArg>,

    /// JSON array of phrases for the title typewriter
    #[arg(long)]
    pub phrases: Option<String>,

    /// Hold time in milliseconds for a fully typed phrase
    #[arg(long, default_value_t = 3000)]
    pub wait_ms: u64,

    /// Form endpoint that enables the contact window
    #[arg(long)]
    pub contact_endpoint: Option<String>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BoundaryArg {
    Reflect,
    Respawn,
    Wrap,
}

impl From<BoundaryArg> for Boundary {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Reflect => Boundary::Reflect,
            BoundaryArg::Respawn => Boundary::Respawn,
            BoundaryArg::Wrap => Boundary::Wrap,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PointerArg {
    Off,
    Repel,
    Attract,
}

impl From<PointerArg> for PointerMode {
    fn from(arg: PointerArg) -> Self {
        match arg {
            PointerArg::Off => PointerMode::Off,
            PointerArg::Repel => PointerMode::Repel,
            PointerArg::Attract => PointerMode::Attract,
        }
    }
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Config file (if any) with command line flags applied on top
    pub fn field_params(&self) -> anyhow::Result<FieldParams> {
        let mut params = match &self.config {
            Some(path) => FieldParams::from_json_file(path)?,
            None => FieldParams::default(),
        };

        if let Some(count) = self.particles {
            params.count = ParticleCount::Fixed(count);
        }
        if let Some(boundary) = self.boundary {
            params.boundary = boundary.into();
        }
        if let Some(pointer) = self.pointer {
            params.pointer = pointer.into();
        }

        params.validate()?;
        Ok(params)
    }
}
