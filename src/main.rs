//! The `ofrip` command line tool.

use std::path::PathBuf;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use ofrip::config::Config;
use ofrip::error::Errors;
use ofrip::export::Exporter;
use ofrip::script::Expr;
use ofrip::script::NoVars;
use ofrip::RipError;

#[derive(StructOpt)]
#[structopt(
  name = "ofrip",
  about = "Extracts game data and graphics from a Final Fantasy ROM image."
)]
struct Opts {
  /// A JSON5 configuration file.
  #[structopt(long, parse(from_os_str))]
  config: Option<PathBuf>,
  /// Only print warnings and errors.
  #[structopt(short, long)]
  quiet: bool,
  #[structopt(subcommand)]
  command: Command,
}

#[derive(StructOpt)]
enum Command {
  /// Runs every enabled export step.
  Export {
    /// The ROM image, overriding the configuration.
    #[structopt(long, parse(from_os_str))]
    rom: Option<PathBuf>,
    /// The export root, overriding the configuration.
    #[structopt(long, parse(from_os_str))]
    out: Option<PathBuf>,
  },
  /// Writes the monster table.
  Monsters {
    #[structopt(parse(from_os_str))]
    file: PathBuf,
  },
  /// Writes the weapon table.
  Weapons {
    #[structopt(parse(from_os_str))]
    file: PathBuf,
  },
  /// Writes the armor table.
  Armor {
    #[structopt(parse(from_os_str))]
    file: PathBuf,
  },
  /// Writes the spell and enemy ability table.
  Spells {
    #[structopt(parse(from_os_str))]
    file: PathBuf,
  },
  /// Writes monster and boss sprites.
  Sprites {
    #[structopt(parse(from_os_str))]
    dir: PathBuf,
  },
  /// Writes map tilesets.
  Tiles {
    #[structopt(parse(from_os_str))]
    dir: PathBuf,
  },
  /// Writes map layouts.
  Maps {
    #[structopt(parse(from_os_str))]
    dir: PathBuf,
  },
  /// Parses a script expression and shows its forms and value.
  Expr {
    /// Prefix-notation text, such as "AND >= gold 100 hasItem 3".
    text: String,
  },
}

fn run(opts: Opts) -> ofrip::Result<()> {
  let mut config = match &opts.config {
    Some(path) => Config::load(path)?,
    None => Config::default(),
  };

  match opts.command {
    Command::Export { rom, out } => {
      if let Some(rom) = rom {
        config.rom = rom;
      }
      if let Some(out) = out {
        config.output = out;
      }
      Exporter::load(&config)?.export_full(&config.output)
    }
    Command::Monsters { file } => Exporter::load(&config)?.dump_monsters(file),
    Command::Weapons { file } => Exporter::load(&config)?.dump_weapons(file),
    Command::Armor { file } => Exporter::load(&config)?.dump_armor(file),
    Command::Spells { file } => Exporter::load(&config)?.dump_spells(file),
    Command::Sprites { dir } => {
      Exporter::load(&config)?.dump_monster_graphics(dir)
    }
    Command::Tiles { dir } => Exporter::load(&config)?.dump_map_graphics(dir),
    Command::Maps { dir } => Exporter::load(&config)?.dump_map_data(dir),
    Command::Expr { text } => {
      let expr: Expr = text.parse().map_err(RipError::from)?;
      let bytes = expr
        .to_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
      println!("{}", expr);
      println!("{}", bytes);
      println!("{}", expr.evaluate(&NoVars)?);
      Ok(())
    }
  }
}

fn main() {
  let opts = Opts::from_args();

  let filter = if opts.quiet {
    EnvFilter::new("warn")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  if let Err(e) = run(opts) {
    let mut errors = Errors::new();
    errors.push(e);
    errors.dump_and_die(1);
  }
}
