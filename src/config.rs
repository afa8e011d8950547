use std::path::PathBuf;

use clap::Parser;

use crate::field::Field;

/// Conway's Game of Life in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "life", version, about)]
pub struct Config {
    /// Field width, in cells
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,

    /// Field height, in cells
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,

    /// Seconds between generations while running, in (0, 5]
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Seed for random fills, so they can be replayed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file. Filter with `RUST_LOG`.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// A dead field of the configured size
    pub fn field(&self) -> Field {
        let (w, h) = (self.width as usize, self.height as usize);

        match self.seed {
            Some(seed) => Field::with_seed(w, h, seed),
            None => Field::new(w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Config;
    use crate::field::GameField;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["life"]).unwrap();

        assert_eq!((config.width, config.height), (5, 5));
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.seed, None);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_field_from_flags() {
        let config =
            Config::try_parse_from(["life", "--width", "12", "--height", "3", "--seed", "7"])
                .unwrap();
        let field = config.field();

        assert_eq!((field.width(), field.height()), (12, 3));
        assert!(field.state().is_dead());
    }

    #[test]
    fn test_rejects_empty_field() {
        assert!(Config::try_parse_from(["life", "--width", "0"]).is_err());
        assert!(Config::try_parse_from(["life", "--height", "-2"]).is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;

        Config::command().debug_assert();
    }
}
