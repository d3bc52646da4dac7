//! Search-as-you-type loop over stdin
use crate::error::Result;
use crate::loader::{self, Source};
use crate::output::{DisplayOptions, ResultFormatter, TextFormatter};
use crate::session::SearchSession;
use colored::*;
use log::info;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const QUIT_COMMAND: &str = ":q";

pub struct InteractiveSearch {
    session: SearchSession,
    source: Source,
    skip_header: bool,
    timeout: Duration,
    options: DisplayOptions,
}

impl InteractiveSearch {
    pub fn new(
        session: SearchSession,
        source: Source,
        skip_header: bool,
        timeout: Duration,
        options: DisplayOptions,
    ) -> Self {
        Self {
            session,
            source,
            skip_header,
            timeout,
            options,
        }
    }

    /// Read input lines until `:q` or EOF. Typing may start before the
    /// dictionary has finished loading.
    pub async fn run(self) -> Result<()> {
        let InteractiveSearch {
            session,
            source,
            skip_header,
            timeout,
            options,
        } = self;

        let formatter = TextFormatter::new(options);
        session.on_result(move |results| {
            let Some(results) = results else {
                return;
            };
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", formatter.format(&results));
            let _ = stdout.flush();
        });

        println!("{}", "Type a word to search, ':q' to quit".dimmed());
        info!("Loading dictionary from {source}");

        let load = loader::load_records(&source, skip_header, timeout);
        tokio::pin!(load);
        let mut loaded = false;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                records = &mut load, if !loaded => {
                    loaded = true;
                    session.load_row_store(records?)?;
                }
                line = lines.next_line() => {
                    match line? {
                        Some(line) if line.trim() == QUIT_COMMAND => break,
                        Some(line) => session.on_input_changed(&line),
                        None => {
                            if !loaded {
                                session.load_row_store((&mut load).await?)?;
                            }
                            // The last keystroke's search lands before teardown.
                            session.flush_pending();
                            break;
                        }
                    }
                }
            }
        }

        log::debug!("{}", session.metrics().gather());
        session.teardown();
        Ok(())
    }
}
