use std::io::{self, BufRead, Write};

use clap::Parser;
use log::info;
use quickfit::{AddressMode, Config, MemoryRegion, QuickFitAllocator};

/// Interactive shell around the quick fit allocator.
#[derive(Debug, Parser)]
#[command(name = "quickfit")]
#[command(about = "Quick fit memory allocation simulator")]
struct Cli {
  /// Total memory in KB; also the largest size class.
  #[arg(long, default_value_t = 1024)]
  total_memory: usize,
  /// Smallest size class in KB.
  #[arg(long, default_value_t = 4)]
  min_block_size: usize,
  /// Lay out free blocks without moving the allocation address counter.
  #[arg(long)]
  detached: bool,
  /// Print memory state as JSON instead of text.
  #[arg(long)]
  json: bool,
}

const DEFAULT_PROCESS: &str = "Process";

const HELP: &str = "\
commands:
  alloc <size> [name]   allocate <size> KB for process [name]
  show                  print memory state
  reset                 rebuild the free lists
  help                  print this message
  quit                  exit

Without --detached, every printed state advances the address counter, so
the next allocation is placed after the free blocks listed last.";

fn print_state(
  regions: &[MemoryRegion],
  json: bool,
) -> io::Result<()> {
  println!("\nMemory State");

  if json {
    println!("{}", serde_json::to_string_pretty(regions)?);
  } else {
    for region in regions {
      println!("{}", region);
    }
  }

  Ok(())
}

fn main() -> io::Result<()> {
  pretty_env_logger::init();

  let cli = Cli::parse();
  let config = Config {
    total_memory: cli.total_memory,
    min_block_size: cli.min_block_size,
    address_mode: if cli.detached {
      AddressMode::Detached
    } else {
      AddressMode::Shared
    },
  };

  let mut allocator = match QuickFitAllocator::with_config(config) {
    Ok(allocator) => allocator,
    Err(error) => {
      eprintln!("{}; falling back to defaults", error);
      QuickFitAllocator::with_config(Config {
        address_mode: config.address_mode,
        ..Config::default()
      })
      .map_err(io::Error::other)?
    }
  };

  // Requests outside the class range are refused here, before they reach
  // the allocator.
  let bounds = allocator.min_block_size()..=allocator.total_memory();
  info!("Accepting requests in {:?} KB", bounds);

  println!("{}", HELP);
  // In shared mode every snapshot moves the address counter, so the
  // initial layout is only printed when that would not shift the first
  // allocation away from address 0.
  if allocator.address_mode() == AddressMode::Detached {
    print_state(&allocator.snapshot(), cli.json)?;
  }

  let stdin = io::stdin();
  loop {
    print!("\n> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
      break;
    }

    let mut words = line.split_whitespace();
    match words.next() {
      Some("alloc") => {
        let Some(size) = words.next().and_then(|word| word.parse::<usize>().ok()) else {
          println!("usage: alloc <size> [name]");
          continue;
        };
        if !bounds.contains(&size) {
          println!(
            "size must be between {} and {} KB",
            bounds.start(),
            bounds.end()
          );
          continue;
        }

        let name = words.collect::<Vec<_>>().join(" ");
        let name = if name.is_empty() { DEFAULT_PROCESS } else { name.as_str() };

        match allocator.allocate(size, name) {
          Ok(allocation) => println!("{}", allocation),
          Err(error) => println!("{}", error),
        }
      }
      Some("show") => {}
      Some("reset") => {
        allocator
          .initialize(allocator.total_memory(), allocator.min_block_size())
          .map_err(io::Error::other)?;
        println!("Free lists rebuilt.");
      }
      Some("help") => {
        println!("{}", HELP);
        continue;
      }
      Some("quit") | Some("exit") => break,
      Some(other) => {
        println!("unknown command `{}`, try `help`", other);
        continue;
      }
      None => continue,
    }

    // The state is re-rendered after every interaction.
    print_state(&allocator.snapshot(), cli.json)?;
  }

  Ok(())
}
