//! Amplifica - terminal entry point

use std::path::PathBuf;
use std::time::{Duration, Instant};

use amp_a11y::{FocusHost, Locale, Politeness, SessionConfig, SpeechEngine};
use amp_feed::{Category, FeedTransport, NewsApiRequest};
use amp_prefs::{JsonFileStore, MemoryStore, PreferenceStore, Preferences};
use amp_reader::{
    Command, ConsoleEngine, ConsoleLiveRegion, FileTransport, HELP, OfflineTransport, ReaderApp,
    ReaderError, ReaderView,
};
use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use smol::io::{AsyncBufReadExt, BufReader};
use smol::stream::StreamExt;
use smol::{future, Timer, Unblock};
use tracing_subscriber::EnvFilter;

/// Longest wait between ticks while speech may be playing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "amplifica", version, about = "Accessible news reader for the terminal")]
struct Args {
    /// Preferences file (JSON); kept in memory when omitted
    #[arg(long, env = "AMP_PREFS")]
    prefs: Option<PathBuf>,

    /// Saved top-headlines response to serve instead of the network
    #[arg(long)]
    feed_file: Option<PathBuf>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Initial category: general, business, technology, health
    #[arg(long, default_value = "general")]
    category: String,

    /// Announcement and speech language: en, pt-BR
    #[arg(long, default_value = "en")]
    locale: String,

    /// Interrupt the screen reader for every announcement
    #[arg(long)]
    assertive: bool,
}

enum Input {
    Line(Option<std::io::Result<String>>),
    Tick,
}

/// What the loop does with one wakeup
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Tick,
    Line(String),
    Skip,
    Exit,
}

impl Input {
    fn step(self) -> Step {
        match self {
            Self::Tick => Step::Tick,
            Self::Line(None) => Step::Exit,
            Self::Line(Some(Ok(line))) => Step::Line(line),
            Self::Line(Some(Err(err))) => {
                tracing::warn!("Skipping unreadable input line: {}", err);
                Step::Skip
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let locale = Locale::parse(&args.locale)
        .with_context(|| format!("unknown locale {:?}", args.locale))?;
    let category = Category::from_id(&args.category)
        .with_context(|| format!("unknown category {:?}", args.category))?;

    let mut store: Box<dyn PreferenceStore> = match &args.prefs {
        Some(path) => Box::new(JsonFileStore::open(path)),
        None => Box::new(MemoryStore::new()),
    };
    let prefs = Preferences::load(&*store);

    let mut transport: Box<dyn FeedTransport> = match &args.feed_file {
        Some(path) => Box::new(FileTransport::new(path)),
        None => Box::new(OfflineTransport),
    };

    let mut config = SessionConfig::for_locale(locale);
    if args.assertive {
        config.politeness = Politeness::Assertive;
    }
    let request = NewsApiRequest { category, api_key: args.api_key.clone(), ..Default::default() };

    tracing::info!(locale = locale.tag(), category = category.id(), "Starting Amplifica");
    let mut app = ReaderApp::new(config, ConsoleEngine::stdout(), prefs, request)
        .with_live_region(Box::new(ConsoleLiveRegion::stdout()));

    app.fetch(&mut *transport, Instant::now(), Utc::now());
    print_articles(&app.view());
    println!("type `help` for commands");

    smol::block_on(run(&mut app, &mut *transport, &mut *store))
}

async fn run<E: SpeechEngine>(
    app: &mut ReaderApp<E>,
    transport: &mut dyn FeedTransport,
    store: &mut dyn PreferenceStore,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(Unblock::new(std::io::stdin())).lines();

    loop {
        let now = Instant::now();
        let wake = app.next_deadline().map_or(now + POLL_INTERVAL, |d| d.min(now + POLL_INTERVAL));

        let input = future::or(async { Input::Line(lines.next().await) }, async {
            Timer::at(wake).await;
            Input::Tick
        })
        .await;

        let line = match input.step() {
            Step::Tick => {
                app.tick(Instant::now());
                continue;
            }
            Step::Skip => continue,
            Step::Exit => break,
            Step::Line(line) => line,
        };

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(err) = execute(app, transport, command) {
                    println!("  {}", err);
                }
            }
            Err(ReaderError::EmptyCommand) => continue,
            Err(err) => println!("  {} (try `help`)", err),
        }

        app.tick(Instant::now());
        if let Err(err) = app.persist(store) {
            tracing::warn!("Could not save preferences: {}", err);
        }
    }

    app.session_mut().teardown();
    app.persist(store).context("saving preferences")?;
    Ok(())
}

fn execute<E: SpeechEngine>(
    app: &mut ReaderApp<E>,
    transport: &mut dyn FeedTransport,
    command: Command,
) -> Result<(), ReaderError> {
    let now = Instant::now();
    match command {
        Command::List => print_articles(&app.view()),
        Command::Reload => {
            app.fetch(transport, now, Utc::now());
            print_articles(&app.view());
        }
        Command::Open(number) => {
            if app.open(number, now)? {
                print_reading(app);
                app.modal_mounted(Instant::now());
            }
        }
        Command::Close => {
            app.close(now);
        }
        Command::Speak => {
            app.toggle_speech(now);
        }
        Command::Key(key) => {
            let outcome = app.handle_key(&key, now);
            tracing::debug!(key = %key.display(), ?outcome, "Key handled");
            if let Some(focused) = app.session().host().focused() {
                println!("  focus: #{}", focused.0);
            }
        }
        Command::Search(query) => {
            app.search(&query, now);
            print_articles(&app.view());
        }
        Command::Category(category) => {
            app.set_category(category, now);
            app.fetch(transport, Instant::now(), Utc::now());
            print_articles(&app.view());
        }
        Command::Sort(sort) => {
            app.set_sort(sort, now);
            print_articles(&app.view());
        }
        Command::Dark => {
            app.toggle_dark_mode(now);
        }
        Command::Contrast => {
            app.toggle_high_contrast(now);
        }
        Command::Motion => {
            app.toggle_reduced_motion(now);
        }
        Command::AutoRead => {
            app.toggle_auto_read(now);
        }
        Command::Font(size) => app.set_font_size(size, now),
        Command::Save(number) => {
            app.toggle_saved(number, now)?;
        }
        Command::Like(number) => {
            app.toggle_liked(number, now)?;
        }
        Command::Skip => {
            app.skip_to_main(now);
        }
        Command::Status => print_status(&app.view()),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

fn print_articles(view: &ReaderView) {
    println!("{} ({} articles)", view.category.name(), view.articles.len());
    if !view.query.is_empty() {
        println!("  filter: {:?}", view.query);
    }
    for (i, row) in view.articles.iter().enumerate() {
        let marks = format!(
            "{}{}{}",
            if row.read { "r" } else { "-" },
            if row.saved { "s" } else { "-" },
            if row.liked { "l" } else { "-" },
        );
        println!("  {:>2}. [{}] {} ({})", i + 1, marks, row.title, row.source);
    }
}

fn print_reading<E: SpeechEngine>(app: &ReaderApp<E>) {
    if let Some(article) = app.session().current_article() {
        println!("== {} ==", article.title);
        println!("{}", article.summary());
        println!("[speak] [close]");
    }
}

fn print_status(view: &ReaderView) {
    println!(
        "  session: {:?}  speech: {:?}  trap: {}",
        view.session.state, view.session.speech, view.session.trap_active
    );
    println!(
        "  dark: {}  contrast: {}  motion: {}  font: {}  auto-read: {}  sort: {}",
        view.dark_mode,
        view.high_contrast,
        view.reduced_motion,
        view.font_size.as_str(),
        view.auto_read,
        view.sort.id(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unreadable_line_is_skipped() {
        let err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        assert_eq!(Input::Line(Some(Err(err))).step(), Step::Skip);
    }

    #[test]
    fn test_input_steps() {
        assert_eq!(Input::Tick.step(), Step::Tick);
        assert_eq!(Input::Line(None).step(), Step::Exit);
        assert_eq!(Input::Line(Some(Ok("open 1".into()))).step(), Step::Line("open 1".into()));
    }
}
