//! Line-oriented driver for a wired [`Harness`].
//!
//! ```text
//! copy <tab> [format...]      programmatic copy (no formats: configured defaults)
//! copy-key <tab> [format...]  copy through a keyboard gesture
//! clear <tab>                 copy an empty selection
//! paste <tab> [format]        programmatic paste (no format: default priority)
//! paste-key <tab> [format]    paste through a keyboard gesture
//! status
//! help
//! quit
//! ```

use std::fmt::Write as _;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use cb_app::usecases::{CopyReport, PasteOutcome};
use cb_app::HarnessHandle;
use cb_core::{FormatPolicy, FormatTag, TriggerKind};

use crate::bootstrap::Harness;

pub const HELP: &str = "\
commands:
  copy <tab> [format...]      copy (no formats: configured defaults)
  copy-key <tab> [format...]  copy through a keyboard gesture
  clear <tab>                 copy an empty selection
  paste <tab> [format]        paste (no format: default priority)
  paste-key <tab> [format]    paste through a keyboard gesture
  status                      show every tab's state
  quit
formats: text, html, img, custom or a full tag";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("`{0}` needs a tab index")]
    MissingTab(String),
    #[error("invalid tab index: {0}")]
    InvalidTab(String),
    #[error("`paste` takes at most one format")]
    TooManyFormats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Copy {
        tab: usize,
        /// `None` means the configured defaults.
        formats: Option<Vec<FormatTag>>,
        trigger: TriggerKind,
    },
    Clear { tab: usize },
    Paste {
        tab: usize,
        policy: FormatPolicy,
        trigger: TriggerKind,
    },
    Status,
    Help,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "copy" | "copy-key" => {
            let tab = parse_tab(verb, words.next())?;
            let formats: Vec<FormatTag> = words.map(parse_format).collect();
            ShellCommand::Copy {
                tab,
                formats: (!formats.is_empty()).then_some(formats),
                trigger: trigger_of(verb),
            }
        }
        "clear" => ShellCommand::Clear {
            tab: parse_tab("clear", words.next())?,
        },
        "paste" | "paste-key" => {
            let tab = parse_tab(verb, words.next())?;
            let policy = match words.next() {
                Some(raw) => FormatPolicy::Explicit(parse_format(raw)),
                None => FormatPolicy::DefaultPriority,
            };
            if words.next().is_some() {
                return Err(ShellError::TooManyFormats);
            }
            ShellCommand::Paste {
                tab,
                policy,
                trigger: trigger_of(verb),
            }
        }
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn trigger_of(verb: &str) -> TriggerKind {
    if verb.ends_with("-key") {
        TriggerKind::Keyboard
    } else {
        TriggerKind::Programmatic
    }
}

fn parse_tab(verb: &str, raw: Option<&str>) -> Result<usize, ShellError> {
    let raw = raw.ok_or_else(|| ShellError::MissingTab(verb.to_string()))?;
    raw.parse()
        .map_err(|_| ShellError::InvalidTab(raw.to_string()))
}

fn parse_format(raw: &str) -> FormatTag {
    match raw.parse::<FormatTag>() {
        Ok(tag) => tag,
        Err(never) => match never {},
    }
}

/// Whether the shell should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one parsed command against the harness.
pub async fn execute(harness: &Harness, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Copy {
            tab,
            formats,
            trigger,
        } => {
            let handle = tab_handle(harness, tab)?;
            let formats = formats.unwrap_or_else(|| harness.default_formats.clone());
            start_copy(handle, formats, trigger).await?;
        }
        ShellCommand::Clear { tab } => {
            start_copy(tab_handle(harness, tab)?, Vec::new(), TriggerKind::Programmatic).await?;
        }
        ShellCommand::Paste {
            tab,
            policy,
            trigger,
        } => {
            let handle = tab_handle(harness, tab)?;
            let outcome = handle.paste(policy, trigger).await?;
            println!("{}", describe_paste(handle.label(), &outcome));
        }
        ShellCommand::Status => {
            for handle in &harness.handles {
                println!("{}", describe_status(handle).await?);
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn tab_handle(harness: &Harness, tab: usize) -> Result<&HarnessHandle> {
    harness.handle(tab).ok_or_else(|| {
        anyhow::anyhow!(
            "no tab {tab}; this harness has {} (0..{})",
            harness.handles.len(),
            harness.handles.len()
        )
    })
}

/// Sends the copy and reports its outcome from a detached task, so the
/// shell stays responsive while the content resolves.
async fn start_copy(handle: &HarnessHandle, formats: Vec<FormatTag>, trigger: TriggerKind) -> Result<()> {
    let done = handle.copy(formats, trigger).await?;
    let label = handle.label().to_string();
    tokio::spawn(async move {
        match done.await {
            Ok(report) => println!("{}", describe_copy(&label, &report)),
            Err(_) => debug!(context = %label, "Runtime stopped before the copy finished"),
        }
    });
    Ok(())
}

pub fn describe_copy(label: &str, report: &CopyReport) -> String {
    match report {
        CopyReport::Cleared => format!("{label}: copy cleared"),
        CopyReport::Published {
            formats,
            copied_at_ms,
        } => {
            let aliases: Vec<&str> = formats.iter().map(FormatTag::alias).collect();
            format!("{label}: copied [{}] at {copied_at_ms}", aliases.join(", "))
        }
        CopyReport::Failed(err) => format!("{label}: copy failed: {err}"),
    }
}

pub fn describe_paste(label: &str, outcome: &PasteOutcome) -> String {
    match outcome {
        PasteOutcome::Aborted => format!("{label}: paste aborted"),
        PasteOutcome::Denied {
            tag,
            classification,
        } => format!(
            "{label}: {} is not pasteable ({classification} copy)",
            tag.alias()
        ),
        PasteOutcome::NotFound { classification } => {
            format!("{label}: nothing pasteable in the {classification} copy")
        }
        PasteOutcome::Rendered {
            selection,
            classification,
            source,
        } => {
            let found = if selection.content.is_some() {
                "found"
            } else {
                "missing"
            };
            format!(
                "{label}: pasted {} ({found}) from {source:?}, {classification}",
                selection.tag.alias()
            )
        }
    }
}

async fn describe_status(handle: &HarnessHandle) -> Result<String> {
    let status = handle.status().await?;
    let mut line = format!("{}: session {}", handle.label(), status.session_id);
    match &status.last_copy {
        Some(meta) => write!(line, ", last copy {:?}", meta.copy_status)?,
        None => line.push_str(", no copy"),
    }
    match status.last_classification {
        Some(classification) => write!(line, ", classified {classification}")?,
        None => line.push_str(", unclassified"),
    }
    let eligible: Vec<&str> = status.eligible.iter().map(FormatTag::alias).collect();
    write!(
        line,
        ", pasteable [{}], {} copies in flight",
        eligible.join(", "),
        status.copies_in_flight
    )?;
    Ok(line)
}

/// Reads commands from `input` until `quit` or end of input.
pub async fn run_shell<R>(harness: &Harness, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match execute(harness, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                warn!(error = %err, "Shell command failed");
                println!("error: {err:#}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_with_aliases() {
        assert_eq!(
            parse_line("copy 1 text img").unwrap(),
            Some(ShellCommand::Copy {
                tab: 1,
                formats: Some(vec![FormatTag::plain_text(), FormatTag::image()]),
                trigger: TriggerKind::Programmatic,
            })
        );
    }

    #[test]
    fn bare_copy_uses_defaults() {
        assert_eq!(
            parse_line("copy-key 0").unwrap(),
            Some(ShellCommand::Copy {
                tab: 0,
                formats: None,
                trigger: TriggerKind::Keyboard,
            })
        );
    }

    #[test]
    fn paste_policies() {
        assert_eq!(
            parse_line("paste 0").unwrap(),
            Some(ShellCommand::Paste {
                tab: 0,
                policy: FormatPolicy::DefaultPriority,
                trigger: TriggerKind::Programmatic,
            })
        );
        assert_eq!(
            parse_line("paste-key 2 custom").unwrap(),
            Some(ShellCommand::Paste {
                tab: 2,
                policy: FormatPolicy::Explicit(FormatTag::custom()),
                trigger: TriggerKind::Keyboard,
            })
        );
        assert_eq!(parse_line("paste 0 text html"), Err(ShellError::TooManyFormats));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# setup").unwrap(), None);
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(parse_line("clear"), Err(ShellError::MissingTab("clear".into())));
        assert_eq!(
            parse_line("paste two"),
            Err(ShellError::InvalidTab("two".into()))
        );
        assert_eq!(
            parse_line("cut 0"),
            Err(ShellError::UnknownCommand("cut".into()))
        );
    }

    #[test]
    fn describes_outcomes() {
        let report = CopyReport::Published {
            formats: vec![FormatTag::plain_text(), FormatTag::rich_text()],
            copied_at_ms: 42,
        };
        assert_eq!(describe_copy("tab-0", &report), "tab-0: copied [text, html] at 42");
        assert_eq!(
            describe_paste(
                "tab-1",
                &PasteOutcome::Denied {
                    tag: FormatTag::custom(),
                    classification: cb_core::Classification::External,
                }
            ),
            "tab-1: custom is not pasteable (external copy)"
        );
    }
}
