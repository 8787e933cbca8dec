//! Parsing of terminal input lines and resolution of region selectors.

use tenki_jma::{Region, RegionCatalog, RegionCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select by list number, region code or name
    Select(String),
    /// Print the region list, optionally filtered by name
    List(Option<String>),
    Dump,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "?" => Command::Help,
            "dump" => Command::Dump,
            "list" | "ls" => {
                Command::List((!rest.is_empty()).then(|| rest.to_string()))
            }
            _ => Command::Select(line.to_string()),
        }
    }
}

/// Outcome of matching a selector against the catalog
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a Region),
    /// Several names match; catalog positions included for display
    Ambiguous(Vec<(usize, &'a Region)>),
    NotFound,
}

/// Match a selector: exact region code first, then 1-based list number, then name.
pub fn resolve<'a>(catalog: &'a RegionCatalog, selector: &str) -> Resolution<'a> {
    let selector = selector.trim();

    if let Some(region) = catalog.get(&RegionCode::new(selector)) {
        return Resolution::Found(region);
    }

    if let Ok(number) = selector.parse::<usize>() {
        return match number.checked_sub(1).and_then(|i| catalog.get_index(i)) {
            Some(region) => Resolution::Found(region),
            None => Resolution::NotFound,
        };
    }

    let matches: Vec<_> = catalog.search(selector).collect();
    if matches.len() == 1 {
        return Resolution::Found(matches[0].1);
    }
    if matches.is_empty() {
        return Resolution::NotFound;
    }

    let lowered = selector.to_lowercase();
    let exact = matches
        .iter()
        .map(|(_, r)| *r)
        .find(|r| {
            r.name == selector
                || r.en_name.as_deref().map(str::to_lowercase).as_deref() == Some(lowered.as_str())
        });
    match exact {
        Some(region) => Resolution::Found(region),
        None => Resolution::Ambiguous(matches),
    }
}

pub const HELP: &str = "\
Commands:
  <number|code|name>  show the forecast for a region
  list [filter]       list regions, optionally filtered by name
  dump                save the last raw forecast as JSON
  help                show this help
  quit                exit
";
