//! Line-oriented front end: a numbered region list stands in for the
//! dropdown, and the forecast text is printed below each selection.

use std::io::{self, BufRead, Write};

use tenki_core::DebugConfig;
use tenki_jma::JmaClient;
use tokio::runtime::Runtime;

use crate::command::{resolve, Command, Resolution, HELP};
use crate::controller::{dump_last, select_region, DumpOutcome};
use crate::state::AppState;
use crate::view::{region_label, render_display, render_regions};

pub struct Terminal<'a, R, W> {
    runtime: &'a Runtime,
    client: &'a JmaClient,
    debug: &'a DebugConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Terminal<'a, R, W> {
    pub fn new(
        runtime: &'a Runtime,
        client: &'a JmaClient,
        debug: &'a DebugConfig,
        input: R,
        output: W,
    ) -> Self {
        Self {
            runtime,
            client,
            debug,
            input,
            output,
        }
    }

    /// Run until `quit` or end of input.
    ///
    /// Each selection blocks until its forecast has been fetched.
    pub fn run(&mut self, state: &mut AppState) -> io::Result<()> {
        write!(self.output, "{}", render_regions(state.catalog(), None))?;
        writeln!(self.output, "Type a number, code or name to select a region, or \"help\".")?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match Command::parse(&line) {
                Command::Empty => {}
                Command::Quit => break,
                Command::Help => write!(self.output, "{}", HELP)?,
                Command::List(filter) => {
                    let listing = render_regions(state.catalog(), filter.as_deref());
                    write!(self.output, "{}", listing)?
                }
                Command::Dump => self.dump(state)?,
                Command::Select(selector) => self.select(state, &selector)?,
            }
        }

        tracing::debug!("Terminal loop finished");
        Ok(())
    }

    fn select(&mut self, state: &mut AppState, selector: &str) -> io::Result<()> {
        if state.catalog().is_empty() {
            return writeln!(self.output, "No regions available.");
        }

        let region = match resolve(state.catalog(), selector) {
            Resolution::Found(region) => region.clone(),
            Resolution::Ambiguous(hits) => {
                writeln!(self.output, "\"{}\" matches several regions:", selector)?;
                for (index, region) in hits {
                    writeln!(
                        self.output,
                        "{:>4}. {}  {}",
                        index + 1,
                        region.code,
                        region_label(region)
                    )?;
                }
                return Ok(());
            }
            Resolution::NotFound => {
                return writeln!(
                    self.output,
                    "No region matches \"{}\". Type \"list\" to see all.",
                    selector
                );
            }
        };

        self.runtime.block_on(select_region(state, self.client, region));
        write!(self.output, "{}", render_display(state.display()))
    }

    fn dump(&mut self, state: &AppState) -> io::Result<()> {
        match dump_last(state, self.debug) {
            DumpOutcome::Written(path) => {
                writeln!(self.output, "Saved raw forecast to {}", path.display())
            }
            DumpOutcome::NothingSelected => writeln!(self.output, "Select a region first."),
            DumpOutcome::Disabled => writeln!(self.output, "Debug dump is disabled."),
            DumpOutcome::Failed => Ok(()),
        }
    }
}
