use crate::config::ThreadlineConfig;
use crate::load::{read_feed_response, read_thread_response};
use crate::threading::{build_thread_page, linearize};
use crate::timeline::{assemble, assemble_filtered};
use anyhow::{Context, Result};
use serde::Serialize;
use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Emit the flat linearized thread rather than slices.
    pub flat: bool,
}

/// Assemble a saved timeline response and write the page as JSON.
pub fn run_timeline<W: Write>(config: &ThreadlineConfig, input: &Path, out: &mut W) -> Result<()> {
    let response = read_feed_response(input)?;
    let page = if config.moderation.is_empty() {
        assemble(&response)
    } else {
        let filter = config.moderation.mute_filter();
        assemble_filtered(&response, |slice, seen| {
            Ok::<_, Infallible>(filter.accepts(slice, seen))
        })?
    };
    tracing::info!(
        slices = page.slices.len(),
        posts = page.post_count(),
        cursor = page.cursor.as_deref().unwrap_or(""),
        "timeline page ready"
    );
    write_json(config, &page, out)
}

/// Linearize a saved thread response and write it as JSON.
pub fn run_thread<W: Write>(
    config: &ThreadlineConfig,
    input: &Path,
    options: RunOptions,
    out: &mut W,
) -> Result<()> {
    let response = read_thread_response(input)?;
    let linearized = linearize(&response.thread);
    if options.flat {
        return write_json(config, &linearized, out);
    }
    let page = build_thread_page(&linearized);
    tracing::info!(
        cid = %page.post.cid,
        ancestors = page.ancestors.len(),
        slices = page.descendants.len(),
        "thread page ready"
    );
    write_json(config, &page, out)
}

fn write_json<T: Serialize, W: Write>(config: &ThreadlineConfig, value: &T, out: &mut W) -> Result<()> {
    if config.output.pretty {
        serde_json::to_writer_pretty(&mut *out, value)
    } else {
        serde_json::to_writer(&mut *out, value)
    }
    .context("failed to encode output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}
