//! Command handlers behind the `campus` binary.

use anyhow::{Context as _, Result};
use colored::*;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::CampusConfig;
use crate::display::{self, OutputFormat, Present};
use crate::filter::{filter_records, FilterCriteria, NumericBucket, Selection};
use crate::login::{self, Credentials};
use crate::record::{sorted_by_date, Classroom, KnowledgeSource, Restaurant, SourceStatus};
use crate::responder::Responder;
use crate::session::{ChatSession, TypingDelay};
use crate::store::{Collection, RecordStore};
use crate::toggle::{self, Preferences, Setting};

/// What every command needs: the loaded config, its data and the output format
pub struct Context {
  pub config: CampusConfig,
  pub store: RecordStore,
  pub responder: Responder,
  pub format: OutputFormat,
}

impl Context {
  pub fn load(config_path: Option<&Path>, format: OutputFormat) -> Result<Self> {
    let config = CampusConfig::load(config_path).context("Failed to load configuration")?;
    let store = config.record_store().context("Failed to load campus data")?;
    let responder = config.responder().context("Failed to load rule table")?;
    Ok(Self { config, store, responder, format })
  }

  fn criteria(&self) -> FilterCriteria {
    FilterCriteria::new().with_folding(self.config.folding)
  }

  fn is_pretty(&self) -> bool {
    self.format == OutputFormat::Pretty
  }
}

fn print_listing<R: Present>(records: &[&R], format: OutputFormat) -> Result<()> {
  print!("{}", display::render_records(records, format)?);
  Ok(())
}

pub fn list_classrooms(
  ctx: &Context,
  search: &str,
  building: Selection,
  status: Selection,
  capacity: NumericBucket,
) -> Result<()> {
  let criteria = ctx.criteria().with_text(search).with_category(building).with_status(status).with_bucket(capacity);
  let classrooms = filter_records(&ctx.store.classrooms, &criteria);
  print_listing(&classrooms, ctx.format)?;

  if ctx.is_pretty() {
    let (available, occupied) = availability(&classrooms);
    println!(
      "{} disponibles · {} ocupadas · {} total",
      available.to_string().green(),
      occupied.to_string().red(),
      classrooms.len()
    );
  }
  Ok(())
}

fn availability(classrooms: &[&Classroom]) -> (usize, usize) {
  let available = classrooms.iter().filter(|c| c.available).count();
  (available, classrooms.len() - available)
}

pub fn list_events(ctx: &Context, search: &str, kind: Selection) -> Result<()> {
  let criteria = ctx.criteria().with_text(search).with_category(kind);
  let events = sorted_by_date(&filter_records(&ctx.store.events, &criteria));
  print_listing(&events, ctx.format)
}

pub fn list_restaurants(ctx: &Context, search: &str, kind: Selection, status: Selection) -> Result<()> {
  let criteria = ctx.criteria().with_text(search).with_category(kind).with_status(status);
  let restaurants = filter_records(&ctx.store.restaurants, &criteria);
  print_listing(&restaurants, ctx.format)?;

  if ctx.is_pretty() {
    println!("{} abiertos de {}", open_count(&restaurants).to_string().green(), restaurants.len());
  }
  Ok(())
}

fn open_count(restaurants: &[&Restaurant]) -> usize {
  restaurants.iter().filter(|restaurant| restaurant.open).count()
}

pub fn list_directory(ctx: &Context, search: &str, department: Selection) -> Result<()> {
  let criteria = ctx.criteria().with_text(search).with_category(department);
  print_listing(&filter_records(&ctx.store.directory, &criteria), ctx.format)
}

/// Apply interest toggles in order, then list the groups
pub fn list_groups(ctx: &mut Context, category: Selection, toggles: &[String]) -> Result<()> {
  for id in toggles {
    let interested = toggle::toggle(&mut ctx.store.groups, id)?;
    if ctx.is_pretty() {
      bentley::success!("Group {id}: {}", if interested { "interested" } else { "not interested" });
    }
  }

  let criteria = ctx.criteria().with_category(category);
  print_listing(&filter_records(&ctx.store.groups, &criteria), ctx.format)
}

pub fn list_calendar(ctx: &Context, category: Selection) -> Result<()> {
  let criteria = ctx.criteria().with_category(category);
  print_listing(&filter_records(&ctx.store.calendar, &criteria), ctx.format)
}

pub fn list_map(ctx: &Context, search: &str, kind: Selection) -> Result<()> {
  let criteria = ctx.criteria().with_text(search).with_category(kind);
  print_listing(&filter_records(&ctx.store.map, &criteria), ctx.format)
}

pub fn list_sources(ctx: &Context, status: Selection) -> Result<()> {
  let criteria = ctx.criteria().with_status(status);
  let sources = filter_records(&ctx.store.sources, &criteria);
  print_listing(&sources, ctx.format)?;

  if ctx.is_pretty() {
    println!("{} de {} fuentes verificadas", verified_count(&sources).to_string().green(), sources.len());
  }
  Ok(())
}

fn verified_count(sources: &[&KnowledgeSource]) -> usize {
  sources.iter().filter(|source| source.status == SourceStatus::Verified).count()
}

pub fn list_categories(ctx: &Context, collection: Collection) -> Result<()> {
  let categories = ctx.store.categories(collection);
  match ctx.format {
    OutputFormat::Json => {
      let value = serde_json::json!({ "collection": collection, "categories": categories });
      println!("{}", serde_json::to_string_pretty(&value)?);
    }
    OutputFormat::Pretty => {
      if categories.is_empty() {
        println!("No categories in {}", collection.to_string().yellow());
      }
      for category in categories {
        println!("{category}");
      }
    }
  }
  Ok(())
}

/// One-shot reply with no typing delay
pub fn ask(ctx: &Context, words: &[String]) -> Result<()> {
  let response = ctx.responder.respond_to(&words.join(" "));
  print!("{}", display::render_response(response, ctx.format)?);
  Ok(())
}

/// Interactive session over stdin. A number selects one of the offered
/// suggestions; `salir` or end of input ends the session; Ctrl-C cancels any
/// pending reply.
pub async fn chat(ctx: Context, name: &str, no_delay: bool) -> Result<()> {
  let delay = if no_delay { TypingDelay::none() } else { ctx.config.typing_delay };
  let format = ctx.format;
  let mut session = ChatSession::new(name, ctx.responder, delay);

  let cancel = session.cancel_handle();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      cancel.cancel();
    }
  });

  if format == OutputFormat::Pretty {
    bentley::announce("Asistente Virtual EAFIT (escribe 'salir' para terminar)");
  }
  if let Some(greeting) = session.conversation().messages().first() {
    print_message(&greeting.text, &greeting.suggestions, format)?;
  }

  let cancel = session.cancel_handle();
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    let line = tokio::select! {
      _ = cancel.cancelled() => break,
      line = lines.next_line() => line.context("Failed to read from stdin")?,
    };
    let Some(line) = line else { break };
    let input = line.trim();
    if input.eq_ignore_ascii_case("salir") {
      break;
    }

    let text = session.resolve_input(input);
    if let Some(message) = session.send(&text).await {
      print_message(&message.text, &message.suggestions, format)?;
    }
  }

  if session.is_cancelled() {
    bentley::warn("Chat cancelled");
  }
  Ok(())
}

fn print_message(text: &str, suggestions: &[String], format: OutputFormat) -> Result<()> {
  let response = crate::responder::Response { text: text.to_string(), suggestions: suggestions.to_vec() };
  match format {
    OutputFormat::Json => println!("{}", serde_json::to_string(&response)?),
    OutputFormat::Pretty => print!("{}", display::render_response(&response, format)?),
  }
  Ok(())
}

pub fn login(ctx: &Context, email: Option<&str>, password: Option<&str>, guest: bool) -> Result<()> {
  let user = if guest {
    login::guest_login()
  } else {
    let credentials = Credentials::new(email.unwrap_or_default(), password.unwrap_or_default());
    login::login(&credentials)?
  };
  print!("{}", display::render_user(&user, ctx.format)?);
  Ok(())
}

pub fn settings(ctx: &Context, toggles: &[Setting]) -> Result<()> {
  let mut preferences = Preferences::default();
  for setting in toggles {
    preferences.toggle(*setting);
  }
  print!("{}", display::render_preferences(&preferences, ctx.format)?);
  Ok(())
}
