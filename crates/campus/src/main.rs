use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use campus::commands::{self, Context};
use campus::display::OutputFormat;
use campus::filter::{NumericBucket, Selection};
use campus::store::Collection;
use campus::toggle::Setting;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Campus - EAFIT Virtual Assistant\nClassrooms, events, services and a chat assistant for the campus")]
#[command(version)]
struct Cli {
  /// Config file (defaults to CAMPUS_CONFIG, ./.campus.json, ./campus.json, then the user config dir)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
  format: OutputFormat,

  /// Increase log verbosity (-v, -vv, -vvv)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List classrooms and their availability
  Classrooms {
    /// Text to look for in the name or building
    #[arg(short, long, default_value = "")]
    search: String,
    /// Building, e.g. "Bloque 38"
    #[arg(short, long, default_value = "all")]
    building: Selection,
    /// available or occupied
    #[arg(long, default_value = "all")]
    status: Selection,
    /// Capacity range: all, <N, A-B or >N
    #[arg(long, default_value = "all", allow_hyphen_values = true)]
    capacity: NumericBucket,
  },
  /// List upcoming events by date
  Events {
    #[arg(short, long, default_value = "")]
    search: String,
    /// conference, seminar, workshop, cultural or sports
    #[arg(short = 't', long = "type", default_value = "all")]
    kind: Selection,
  },
  /// List restaurants and cafeterias
  Restaurants {
    #[arg(short, long, default_value = "")]
    search: String,
    #[arg(short = 't', long = "type", default_value = "all")]
    kind: Selection,
    /// open or closed
    #[arg(long, default_value = "all")]
    status: Selection,
  },
  /// Search the staff directory
  Directory {
    #[arg(short, long, default_value = "")]
    search: String,
    #[arg(short, long, default_value = "all")]
    department: Selection,
  },
  /// List student groups, optionally toggling interest
  Groups {
    /// investigacion, cultural, deportivo or academico
    #[arg(short, long, default_value = "all")]
    category: Selection,
    /// Group id whose interest flag to flip (repeatable)
    #[arg(long = "toggle", value_name = "ID")]
    toggles: Vec<String>,
  },
  /// Show the academic calendar
  Calendar {
    /// examen, matricula, evento or cancelacion
    #[arg(short, long, default_value = "all")]
    category: Selection,
  },
  /// List campus map locations
  Map {
    #[arg(short, long, default_value = "")]
    search: String,
    /// building, library, cafeteria, sports or admin
    #[arg(short = 't', long = "type", default_value = "all")]
    kind: Selection,
  },
  /// List the assistant's knowledge sources
  Sources {
    /// verified or pending
    #[arg(long, default_value = "all")]
    status: Selection,
  },
  /// List the distinct categories of a collection
  Categories {
    #[arg(value_enum)]
    collection: Collection,
  },
  /// Ask the assistant a single question
  Ask {
    #[arg(required = true)]
    words: Vec<String>,
  },
  /// Start an interactive chat session
  Chat {
    /// Name used in the greeting
    #[arg(short, long, default_value = "Estudiante")]
    name: String,
    /// Reply immediately instead of simulating typing
    #[arg(long)]
    no_delay: bool,
  },
  /// Validate login fields and show the resulting user
  Login {
    #[arg(long, required_unless_present = "guest")]
    email: Option<String>,
    #[arg(long, required_unless_present = "guest")]
    password: Option<String>,
    /// Continue as a guest
    #[arg(long, conflicts_with_all = ["email", "password"])]
    guest: bool,
  },
  /// Show profile preferences, optionally toggling some
  Settings {
    #[arg(long = "toggle", value_enum, value_name = "SETTING")]
    toggles: Vec<Setting>,
  },
}

fn main() {
  let cli = Cli::parse();
  bentley::init(cli.verbose);

  let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      bentley::error(&format!("Failed to start runtime: {e}"));
      process::exit(1);
    }
  };

  let result = runtime.block_on(run(cli));
  // stdin reads may still be parked on a blocking thread
  runtime.shutdown_background();

  if let Err(e) = result {
    bentley::error(&format!("{e:#}"));
    process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let mut ctx = Context::load(cli.config.as_deref(), cli.format)?;

  match cli.command {
    Commands::Classrooms { search, building, status, capacity } => {
      commands::list_classrooms(&ctx, &search, building, status, capacity)?;
    }
    Commands::Events { search, kind } => {
      commands::list_events(&ctx, &search, kind)?;
    }
    Commands::Restaurants { search, kind, status } => {
      commands::list_restaurants(&ctx, &search, kind, status)?;
    }
    Commands::Directory { search, department } => {
      commands::list_directory(&ctx, &search, department)?;
    }
    Commands::Groups { category, toggles } => {
      commands::list_groups(&mut ctx, category, &toggles)?;
    }
    Commands::Calendar { category } => {
      commands::list_calendar(&ctx, category)?;
    }
    Commands::Map { search, kind } => {
      commands::list_map(&ctx, &search, kind)?;
    }
    Commands::Sources { status } => {
      commands::list_sources(&ctx, status)?;
    }
    Commands::Categories { collection } => {
      commands::list_categories(&ctx, collection)?;
    }
    Commands::Ask { words } => {
      commands::ask(&ctx, &words)?;
    }
    Commands::Chat { name, no_delay } => {
      commands::chat(ctx, &name, no_delay).await?;
    }
    Commands::Login { email, password, guest } => {
      commands::login(&ctx, email.as_deref(), password.as_deref(), guest)?;
    }
    Commands::Settings { toggles } => {
      commands::settings(&ctx, &toggles)?;
    }
  }

  Ok(())
}
