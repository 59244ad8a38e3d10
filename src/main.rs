//! Interactive command-line shell and entry point.
//!
//! A thin layer between the terminal and the library: stdin lines become
//! [`Event`]s, the [`Controller`] decides what happens, worker messages run as
//! tokio tasks, and the view model is redrawn on stdout.
//!
//! ```text
//!   stdin lines ──► parse_command ──► Controller::dispatch ──► Actions
//!                                          ▲                     │
//!   timer deadlines ─► Controller::tick ───┤                     ▼
//!                                          │              SearchWorker::spawn
//!   worker responses ◄─────────────────────┴──────────── (tokio task, mpsc)
//! ```
//!
//! # Commands
//!
//! Plain text replaces the search box contents (as if typed). An empty line
//! acts like Enter. Everything else starts with `:`:
//!
//! - `:down` / `:up`: move the dropdown highlight
//! - `:enter`, `:esc`, `:pick N`: pick the highlighted / N-th suggestion, or close
//! - `:focus`, `:blur`, `:outside`: focus changes
//! - `:search`: submit the input
//! - `:page N`, `:next`, `:prev`: paging (N is one-based)
//! - `:cat NAME`, `:cat` (all categories)
//! - `:popular N`, `:history N`: search for the N-th tag
//! - `:retry`, `:dark`, `:clear-history`, `:help`, `:quit`

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use findy::api::HttpSearchApi;
use findy::app::scheduler::SystemClock;
use findy::app::{Controller, Outcome};
use findy::infrastructure::preferences_path;
use findy::storage::JsonStorage;
use findy::ui::{html, terminal};
use findy::worker::{SearchWorker, WorkerResponse};
use findy::{initialize, Action, Config, Event, Theme};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Parser, Debug)]
#[command(name = "findy", about = "Search news from the terminal", version)]
struct Args {
    /// Base URL of the search API (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Category to start with
    #[arg(long)]
    category: Option<String>,

    /// Tracing filter for the log file (overrides the config file)
    #[arg(long)]
    trace_level: Option<String>,

    /// Print HTML fragments instead of an ANSI screen
    #[arg(long)]
    html: bool,

    /// Screen width in columns
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Query to search for immediately
    query: Option<String>,
}

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Event(Event),
    /// One-based index into the popular tags.
    Popular(usize),
    /// One-based index into the history list.
    History(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let Some(command) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Command::Event(Event::Enter);
        }
        return Command::Event(Event::Input(line.to_string()));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command.trim(), ""),
    };
    let index = || argument.parse::<usize>().ok().filter(|&n| n > 0);

    match name {
        "down" => Command::Event(Event::ArrowDown),
        "up" => Command::Event(Event::ArrowUp),
        "enter" => Command::Event(Event::Enter),
        "esc" => Command::Event(Event::Escape),
        "pick" => index().map_or_else(
            || Command::Unknown(line.to_string()),
            |n| Command::Event(Event::PickSuggestion(n - 1)),
        ),
        "focus" => Command::Event(Event::Focus),
        "blur" => Command::Event(Event::Blur),
        "outside" => Command::Event(Event::ClickOutside),
        "search" => Command::Event(Event::Submit),
        "page" => argument
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .map_or_else(|| Command::Unknown(line.to_string()), |n| Command::Event(Event::GoToPage(n - 1))),
        "next" => Command::Event(Event::NextPage),
        "prev" => Command::Event(Event::PreviousPage),
        "cat" => Command::Event(Event::SelectCategory(argument.to_string())),
        "popular" => index().map_or_else(|| Command::Unknown(line.to_string()), Command::Popular),
        "history" => index().map_or_else(|| Command::Unknown(line.to_string()), Command::History),
        "retry" => Command::Event(Event::Retry),
        "dark" => Command::Event(Event::ToggleDarkMode),
        "clear-history" => Command::Event(Event::ClearHistory),
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Decodes one raw stdin line, dropping the line terminator.
///
/// Bytes that are not UTF-8 become U+FFFD instead of ending the session.
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Shell state wrapping the library controller.
struct Shell {
    controller: Controller<SystemClock>,
    worker: SearchWorker<HttpSearchApi>,
    responses: UnboundedSender<WorkerResponse>,
    config: Config,
    theme: Theme,
    theme_dark: bool,
    html: bool,
    width: usize,
    scroll_to_results: bool,
}

impl Shell {
    fn handle(&mut self, event: &Event) {
        let span = tracing::debug_span!("shell_event", event_type = %Self::get_event_name(event));
        let _guard = span.enter();

        match self.controller.dispatch(event) {
            Ok(outcome) => self.apply(outcome),
            Err(e) => tracing::warn!(error = %e, "error handling event"),
        }
    }

    fn tick(&mut self) {
        match self.controller.tick() {
            Ok(outcome) => self.apply(outcome),
            Err(e) => tracing::warn!(error = %e, "error firing timers"),
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        tracing::debug!(
            action_count = outcome.actions.len(),
            should_render = outcome.render,
            "event handled successfully"
        );
        for action in outcome.actions {
            self.execute_action(action);
        }
        if outcome.render {
            self.render();
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                tracing::debug!(message = ?message, "posting to worker");
                self.worker.spawn(message, self.responses.clone());
            }
            Action::ScrollToResults => self.scroll_to_results = true,
            // consumed by the controller
            Action::ScheduleTimer { .. } | Action::CancelTimer(_) => {}
        }
    }

    fn render(&mut self) {
        let state = self.controller.state();
        if self.theme_dark != state.dark_mode {
            self.theme = self.config.theme(state.dark_mode);
            self.theme_dark = state.dark_mode;
        }

        let viewmodel = state.compute_viewmodel();
        let scroll = std::mem::take(&mut self.scroll_to_results);
        if self.html {
            println!("{}", html::render_page(&viewmodel));
            if scroll {
                println!(r#"<script>document.getElementById("results")?.scrollIntoView();</script>"#);
            }
        } else {
            // the results block always ends the screen, so a full redraw keeps it in view
            print!("\u{1b}[2J\u{1b}[H{}", terminal::render(&viewmodel, &self.theme, self.width));
        }
    }

    /// Runs one stdin line; returns `false` when the user asked to quit.
    fn run_command(&mut self, line: &str) -> bool {
        match parse_command(line) {
            Command::Event(event) => self.handle(&event),
            Command::Popular(n) => self.tag_search(|state| state.popular.as_slice(), n),
            Command::History(n) => self.tag_search(|state| state.history.as_slice(), n),
            Command::Help => println!("{}", self.controller.state().compute_viewmodel().footer.keybindings),
            Command::Quit => return false,
            Command::Unknown(line) => println!("unknown command: {line} (try :help)"),
        }
        true
    }

    fn tag_search(&mut self, tags: fn(&findy::SessionState) -> &[String], n: usize) {
        let text = tags(self.controller.state()).get(n - 1).cloned();
        match text {
            Some(text) => self.handle(&Event::SearchFor(text)),
            None => println!("no entry {n}"),
        }
    }

    /// Whether anything could still change the screen after stdin closed.
    fn is_settled(&self) -> bool {
        self.controller.next_deadline().is_none() && !self.controller.state().results.is_loading()
    }

    fn get_event_name(event: &Event) -> String {
        match event {
            Event::Input(_) => "Input".to_string(),
            Event::WorkerResponse(response) => {
                let name = format!("{response:?}");
                let end = name.find([' ', '{', '(']).unwrap_or(name.len());
                format!("WorkerResponse({})", &name[..end])
            }
            other => format!("{other:?}"),
        }
    }
}

async fn sleep_until_deadline(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn run(args: Args) -> findy::Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(level) = args.trace_level {
        config.trace_level = level;
    }
    config.validate()?;
    findy::observability::init_tracing(&config);

    tracing::info!(api = %config.api_base_url, "findy starting");

    let data_dir = config.data_dir();
    let storage = JsonStorage::new(preferences_path(&data_dir), config.history_limit)?;
    let api = HttpSearchApi::new(config.api_settings()?)?;
    let (responses, mut receiver): (_, UnboundedReceiver<WorkerResponse>) = mpsc::unbounded_channel();

    let mut shell = Shell {
        controller: Controller::new(initialize(&config), SystemClock),
        worker: SearchWorker::new(api, Box::new(storage)),
        responses,
        theme: config.theme(false),
        theme_dark: false,
        config,
        html: args.html,
        width: args.width,
        scroll_to_results: false,
    };

    shell.handle(&Event::Started);
    if let Some(category) = args.category {
        shell.handle(&Event::SelectCategory(category));
    }
    if let Some(query) = args.query {
        shell.handle(&Event::SearchFor(query));
    }

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buffer = Vec::new();
    let mut stdin_open = true;

    loop {
        if !stdin_open && shell.is_settled() {
            break;
        }
        let deadline = shell.controller.next_deadline();

        tokio::select! {
            // partial reads stay in `buffer` when another branch wins
            read = stdin.read_until(b'\n', &mut buffer), if stdin_open => match read {
                Ok(0) => stdin_open = false,
                Ok(_) => {
                    let line = decode_line(&buffer);
                    buffer.clear();
                    if !shell.run_command(&line) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read stdin, no further input");
                    eprintln!("findy: cannot read input: {e}");
                    stdin_open = false;
                }
            },
            Some(response) = receiver.recv() => shell.handle(&Event::WorkerResponse(response)),
            () = sleep_until_deadline(deadline) => shell.tick(),
        }
    }

    tracing::info!("findy exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("findy: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_input_and_empty_line_is_enter() {
        assert_eq!(parse_command("ai chips"), Command::Event(Event::Input("ai chips".to_string())));
        assert_eq!(parse_command(""), Command::Event(Event::Enter));
        assert_eq!(parse_command("   "), Command::Event(Event::Enter));
    }

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse_command(":page 3"), Command::Event(Event::GoToPage(2)));
        assert_eq!(parse_command(":pick 1"), Command::Event(Event::PickSuggestion(0)));
        assert_eq!(parse_command(":popular 2"), Command::Popular(2));
        assert!(matches!(parse_command(":page 0"), Command::Unknown(_)));
        assert!(matches!(parse_command(":pick x"), Command::Unknown(_)));
    }

    #[test]
    fn category_argument_may_be_empty() {
        assert_eq!(parse_command(":cat 경제"), Command::Event(Event::SelectCategory("경제".to_string())));
        assert_eq!(parse_command(":cat"), Command::Event(Event::SelectCategory(String::new())));
    }

    #[test]
    fn invalid_utf8_line_is_decoded_lossily() {
        let line = decode_line(b"\xff\xfe bad\r\n");
        assert_eq!(line, "\u{fffd}\u{fffd} bad");
        assert_eq!(parse_command(&line), Command::Event(Event::Input(line.clone())));

        assert_eq!(decode_line(b":help\n"), ":help");
        assert_eq!(parse_command(&decode_line(b":help\n")), Command::Help);
        assert_eq!(decode_line("경제".as_bytes()), "경제");
    }

    #[test]
    fn event_names_omit_payloads() {
        let event = Event::WorkerResponse(WorkerResponse::PopularFailed {
            message: "boom".to_string(),
        });
        assert_eq!(Shell::get_event_name(&event), "WorkerResponse(PopularFailed)");
        assert_eq!(Shell::get_event_name(&Event::Input("secret".to_string())), "Input");
    }
}
