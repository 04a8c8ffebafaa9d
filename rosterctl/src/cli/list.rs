use std::io::Write;

use anyhow::{Context, Result, bail};
use roster_core::{Browser, PageSource, Session};
use roster_model::{Character, NumericField, SortDirection};
use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::render::card_text;

#[derive(Debug, Clone)]
pub struct ListOptions {
    /// 1-based window to print.
    pub page: usize,
    pub descending: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    page: usize,
    sort_field: NumericField,
    direction: SortDirection,
    exhausted: bool,
    has_next: bool,
    records: Vec<&'a Character>,
}

/// Navigate to `options.page`, fetching remote pages as needed, and print the
/// sorted window.
pub async fn run_list<S, W>(
    source: S,
    config: &Config,
    options: &ListOptions,
    out: &mut W,
) -> Result<()>
where
    S: PageSource,
    W: Write,
{
    let mut browser = Browser::new(source, Session::new(config.session_options()));
    let reached = browser.seek(options.page.max(1)).await;
    if options.descending {
        browser.toggle_sort();
    }

    let session = browser.session();
    if session.window().is_empty() {
        if session.is_exhausted() {
            bail!("page {} is empty: the collection has no more characters", reached);
        }
        bail!("no characters could be loaded for page {}; check the log for the failed request", reached);
    }
    if reached < options.page {
        warn!(requested = options.page, reached, "requested page is past the end of the collection");
    }

    let records = session.sorted_window();
    if options.json {
        let output = ListOutput {
            page: reached,
            sort_field: session.sort_field(),
            direction: session.direction(),
            exhausted: session.is_exhausted(),
            has_next: session.can_advance(),
            records,
        };
        serde_json::to_writer_pretty(&mut *out, &output).context("write JSON output")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "Page {} (sorted by {}, {})",
        reached,
        session.sort_field(),
        session.direction()
    )?;
    for character in records {
        writeln!(out)?;
        write!(out, "{}", card_text(character))?;
    }
    Ok(())
}
