//! Terminal command parser

use amp_a11y::KeyboardShortcut;
use amp_feed::{Category, SortOrder};
use amp_prefs::FontSize;

use crate::ReaderError;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    /// Open the 1-based article number
    Open(usize),
    Close,
    Speak,
    Key(KeyboardShortcut),
    Search(String),
    Category(Category),
    Sort(SortOrder),
    Dark,
    Contrast,
    Motion,
    Font(FontSize),
    AutoRead,
    Save(usize),
    Like(usize),
    Skip,
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ReaderError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "reload" => Self::Reload,
            "open" | "o" => Self::Open(index(rest)?),
            "close" | "c" => Self::Close,
            "speak" | "s" => Self::Speak,
            "key" | "k" => Self::Key(KeyboardShortcut::parse(rest).ok_or_else(|| invalid(rest))?),
            "search" | "/" => Self::Search(rest.to_string()),
            "category" | "cat" => {
                Self::Category(Category::from_id(rest).ok_or_else(|| invalid(rest))?)
            }
            "sort" => Self::Sort(SortOrder::from_id(rest).ok_or_else(|| invalid(rest))?),
            "dark" => Self::Dark,
            "contrast" => Self::Contrast,
            "motion" => Self::Motion,
            "font" => Self::Font(FontSize::parse(rest).ok_or_else(|| invalid(rest))?),
            "autoread" => Self::AutoRead,
            "save" => Self::Save(index(rest)?),
            "like" => Self::Like(index(rest)?),
            "skip" => Self::Skip,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => return Err(ReaderError::EmptyCommand),
            other => return Err(ReaderError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// 1-based article number
fn index(arg: &str) -> Result<usize, ReaderError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(arg)),
    }
}

fn invalid(arg: &str) -> ReaderError {
    ReaderError::InvalidArgument(arg.to_string())
}

pub const HELP: &str = "\
commands:
  list | reload               show or refetch the articles
  open <n> | close            enter or leave reading mode
  speak                       start or stop reading aloud
  key <Tab|Shift+Tab|Escape>  press a key inside reading mode
  search <text>               filter (empty clears)
  category <id> | sort <publishedAt|title>
  dark | contrast | motion | autoread | font <small|medium|large>
  save <n> | like <n> | skip | status | help | quit";
