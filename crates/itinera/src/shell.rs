// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `itinera shell` command implementation.
//!
//! A readline REPL over the two client pages. Plain text is a generate
//! prompt; slash commands save, browse history, filter, and favorite.

use colored::Colorize;
use itinera_client::generate::SAVED_MESSAGE;
use itinera_client::{GenerationView, HistoryView, ItineraClient};
use itinera_core::{Itinerary, ItineraError};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const HELP: &str = "\
  <text>            generate an itinerary for <text>
  /generate [text]  open the generate page (and generate for [text])
  /save             save the generated itinerary
  /history          open the history page (re-fetches)
  /search [query]   filter history by text (empty clears)
  /favorites        toggle the favorites-only filter
  /fav <n>          toggle favorite on the n-th listed itinerary
  /show <n>         show the full n-th listed itinerary
  /dismiss          dismiss error messages
  /help             show this help
  /quit             exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Generate,
    History,
}

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Prompt(String),
    Generate(Option<String>),
    Save,
    History,
    Search(String),
    Favorites,
    Fav(usize),
    Show(usize),
    Dismiss,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Prompt(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "generate" if arg.is_empty() => Command::Generate(None),
        "generate" => Command::Generate(Some(arg.to_string())),
        "save" => Command::Save,
        "history" => Command::History,
        "search" => Command::Search(arg.to_string()),
        "favorites" => Command::Favorites,
        "fav" => parse_index(arg).map_or_else(
            || Command::Invalid("usage: /fav <n>".into()),
            Command::Fav,
        ),
        "show" => parse_index(arg).map_or_else(
            || Command::Invalid("usage: /show <n>".into()),
            Command::Show,
        ),
        "dismiss" => Command::Dismiss,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command: /{other}")),
    }
}

/// 1-based list position.
fn parse_index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| *n > 0)
}

struct Shell {
    client: ItineraClient,
    page: Page,
    generation: GenerationView,
    history: HistoryView,
}

impl Shell {
    fn new(client: ItineraClient) -> Self {
        Self {
            client,
            page: Page::Generate,
            generation: GenerationView::new(),
            history: HistoryView::new(),
        }
    }

    /// Returns `false` when the shell should exit.
    async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Prompt(text) => {
                self.page = Page::Generate;
                self.run_generate(text).await;
            }
            Command::Generate(text) => {
                self.page = Page::Generate;
                match text {
                    Some(text) => self.run_generate(text).await,
                    None => self.render_generate(),
                }
            }
            Command::Save => self.run_save().await,
            Command::History => {
                self.page = Page::History;
                self.history = HistoryView::new();
                println!("{}", "fetching history...".dimmed());
                self.history.load(&self.client).await;
                self.render_history();
            }
            Command::Search(query) => {
                self.history.set_query(query);
                self.render_history();
            }
            Command::Favorites => {
                let next = !self.history.favorites_only();
                self.history.set_favorites_only(next);
                self.render_history();
            }
            Command::Fav(n) => match self.visible_id(n) {
                Some(id) => {
                    self.history.toggle_favorite(&self.client, &id).await;
                    self.render_history();
                }
                None => eprintln!("{}", format!("no itinerary #{n}").yellow()),
            },
            Command::Show(n) => match self.visible_id(n) {
                Some(id) => {
                    if let Some(record) = self.history.open_detail(&id) {
                        render_detail(record);
                    }
                    self.history.close_detail();
                }
                None => eprintln!("{}", format!("no itinerary #{n}").yellow()),
            },
            Command::Dismiss => {
                self.generation.dismiss_banner();
                self.history.dismiss_banner();
                let ids: Vec<String> = self.history.records().iter().map(|r| r.id.clone()).collect();
                for id in ids {
                    self.history.dismiss_item_error(&id);
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
            Command::Invalid(message) => eprintln!("{}", message.yellow()),
        }
        true
    }

    async fn run_generate(&mut self, text: String) {
        self.generation.set_prompt(text);
        if !self.generation.can_generate() {
            eprintln!("{}", "enter a prompt to generate".yellow());
            return;
        }
        println!("{}", "generating...".dimmed());
        self.generation.generate(&self.client).await;
        self.render_generate();
    }

    async fn run_save(&mut self) {
        if !self.generation.can_save() {
            eprintln!("{}", "nothing to save yet".yellow());
            return;
        }
        self.generation.save(&self.client).await;
        if let Some(record) = self.generation.saved() {
            println!("{} ({})", SAVED_MESSAGE.green(), record.id.dimmed());
            self.generation.dismiss_confirmation();
        } else {
            self.render_generate();
        }
    }

    fn visible_id(&self, n: usize) -> Option<String> {
        self.history
            .visible()
            .get(n - 1)
            .map(|record| record.id.clone())
    }

    fn render_generate(&self) {
        if let Some(hint) = self.generation.hint() {
            println!("{}", hint.yellow());
        }
        if let Some(banner) = self.generation.banner() {
            println!("{}: {banner}", "error".red());
        }
        println!();
        println!("{}", self.generation.output());
        println!();
    }

    fn render_history(&self) {
        if self.page != Page::History {
            println!("{}", "open the history page with /history".dimmed());
            return;
        }
        if let Some(banner) = self.history.banner() {
            println!("{}: {banner}", "error".red());
        }

        let mut filters = Vec::new();
        if !self.history.query().is_empty() {
            filters.push(format!("search \"{}\"", self.history.query()));
        }
        if self.history.favorites_only() {
            filters.push("favorites only".to_string());
        }
        if !filters.is_empty() {
            println!("{}", filters.join(", ").dimmed());
        }

        let visible = self.history.visible();
        if visible.is_empty() {
            println!("{}", "no itineraries".dimmed());
            return;
        }
        for (i, record) in visible.iter().enumerate() {
            let star = if record.is_favorite {
                "*".yellow().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "{:>3}. {star} {}  {}",
                i + 1,
                record.prompt.bold(),
                record.created_date.format("%Y-%m-%d %H:%M").to_string().dimmed()
            );
            if let Some(error) = self.history.item_error(&record.id) {
                println!("       {}: {error}", "error".red());
            }
        }
    }
}

fn render_detail(record: &Itinerary) {
    println!();
    println!("{}", record.prompt.bold());
    println!("{}", "-".repeat(record.prompt.chars().count().min(60)));
    println!("{}", record.itinerary);
    println!();
}

/// Runs the `itinera shell` interactive REPL against `server_url`.
pub async fn run_shell(server_url: &str) -> Result<(), ItineraError> {
    let client = ItineraClient::new(server_url)?;
    let mut shell = Shell::new(client);

    let mut rl = DefaultEditor::new()
        .map_err(|e| ItineraError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "itinera shell".bold().green());
    println!("Connected to {}", shell.client.base_url().cyan());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());
    shell.render_generate();

    let prompt = format!("{}> ", "itinera".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                if !shell.handle(parse_command(&line)).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
