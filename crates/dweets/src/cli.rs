//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Dweet style animations in the terminal.
#[derive(Debug, Parser)]
#[command(name = "dweets", version, about)]
pub struct Cli {
    /// Append logs to PATH (default: dweets.log in the data directory).
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    pub log: Option<Option<PathBuf>>,

    #[command(subcommand)]
    pub command: Command,
}

/// Logical resolution and frame rate shared by most demos.
#[derive(Debug, Clone, Copy, Args)]
pub struct ViewArgs {
    /// Logical width in pixels.
    #[arg(long, default_value_t = 800)]
    pub xres: u32,

    /// Logical height in pixels.
    #[arg(long, default_value_t = 600)]
    pub yres: u32,

    /// Target frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,
}

impl ViewArgs {
    pub fn view(&self) -> (u32, u32) {
        (self.xres, self.yres)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shatter the word BROKEN into randomly offset wedges.
    BreakingBroke {
        #[command(flatten)]
        display: ViewArgs,

        /// Seed for the random generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// A rotating Lorenz attractor.
    Lorenz {
        #[command(flatten)]
        display: ViewArgs,
    },
    /// A star field falling into a black hole.
    BlackHole {
        #[command(flatten)]
        display: ViewArgs,

        /// Number of stars.
        #[arg(long, default_value_t = 2000)]
        nstars: u32,
    },
    /// A tunable wavy ring.
    RingWeave {
        #[command(flatten)]
        display: ViewArgs,

        /// Load and save parameters in PATH (default: ringweave.toml in the
        /// config directory).
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        config: Option<Option<PathBuf>>,

        /// Save the config on exit without asking.
        #[arg(long)]
        yes: bool,
    },
    /// A spinning tunnel of rectangles.
    Tunnel {
        /// Logical width in pixels.
        #[arg(long, default_value_t = 960)]
        width: u32,

        /// Logical height in pixels.
        #[arg(long, default_value_t = 540)]
        height: u32,

        /// Target frames per second.
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        framerate: u32,

        /// Info panel text height in logical pixels.
        #[arg(long, default_value_t = 48)]
        fontsize: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dweets", "black-hole"]);
        assert!(cli.log.is_none());
        match cli.command {
            Command::BlackHole { display, nstars } => {
                assert_eq!(display.view(), (800, 600));
                assert_eq!(display.fps, 60);
                assert_eq!(nstars, 2000);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_optional_paths() {
        let cli = Cli::parse_from(["dweets", "--log", "ring-weave", "--config", "--yes"]);
        assert_eq!(cli.log, Some(None));
        match cli.command {
            Command::RingWeave { config, yes, .. } => {
                assert_eq!(config, Some(None));
                assert!(yes);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::parse_from([
            "dweets",
            "--log=dweets.log",
            "ring-weave",
            "--config",
            "weave.toml",
        ]);
        assert_eq!(cli.log, Some(Some(PathBuf::from("dweets.log"))));
        match cli.command {
            Command::RingWeave { config, yes, .. } => {
                assert_eq!(config, Some(Some(PathBuf::from("weave.toml"))));
                assert!(!yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        assert!(Cli::try_parse_from(["dweets", "lorenz", "--fps", "fast"]).is_err());
        assert!(Cli::try_parse_from(["dweets"]).is_err());
    }

    #[test]
    fn test_rejects_zero_frame_rate() {
        assert!(Cli::try_parse_from(["dweets", "lorenz", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["dweets", "tunnel", "--framerate", "0"]).is_err());
        let cli = Cli::parse_from(["dweets", "lorenz", "--fps", "1"]);
        match cli.command {
            Command::Lorenz { display } => assert_eq!(display.fps, 1),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_tunnel_arguments() {
        let cli = Cli::parse_from(["dweets", "tunnel", "--width", "640", "--fontsize", "21"]);
        match cli.command {
            Command::Tunnel {
                width,
                height,
                framerate,
                fontsize,
            } => {
                assert_eq!((width, height, framerate, fontsize), (640, 540, 60, 21));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
