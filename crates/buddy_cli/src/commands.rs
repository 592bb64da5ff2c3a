//! Command execution and terminal rendering.
//!
//! Every command loads the store once, applies at most one mutation through
//! the journal service and prints the outcome.

use anyhow::{bail, Context, Result};
use buddy_core::{
    core_version, export_file_name, format_display_date, logging_status, week_summary,
    DailyRecord, DayPatch, ExportFormat, IsoDate, JournalService, KvRepository, Mood, TaskEntry,
    TaskSlot,
};
use std::io::{BufRead, Write};

use crate::{Command, ExportKind};

const CLEAR_PROMPT: &str = "Erase ALL saved entries? [y/N] ";
const NO_MOOD: &str = "–";

/// Parses `1`, `2`, `3` or `nice` into a task slot.
pub(crate) fn parse_slot(value: &str) -> Result<TaskSlot, String> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("nice") {
        return Ok(TaskSlot::Nice);
    }
    let position = trimmed
        .parse::<usize>()
        .map_err(|_| format!("expected 1, 2, 3 or `nice`, got `{value}`"))?;
    TaskSlot::must_do(position).map_err(|err| err.to_string())
}

pub(crate) fn run<R: KvRepository>(
    service: &JournalService<R>,
    command: Command,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    let store = service.load();

    match command {
        Command::Show { date, json } => {
            let date = date.unwrap_or_else(IsoDate::today);
            let record = service.get_day(&store, date);
            if json {
                writeln!(out, "{}", record_json(&record)?)?;
            } else {
                let started = store.stored(date).is_some();
                render_record(out, &record, started)?;
            }
        }
        Command::Set {
            date,
            mood,
            nice,
            evening_win,
            kid_time,
            boundary_kept,
            boundary_note,
            notes,
        } => {
            let date = date.unwrap_or_else(IsoDate::today);
            let current = service.get_day(&store, date);
            let patch = DayPatch {
                mood: mood.map(Mood::new).transpose()?,
                nice: nice.map(|text| TaskEntry::new(text, current.nice.done)),
                evening_win,
                kid_time,
                boundary_kept,
                boundary_note,
                notes,
                ..DayPatch::default()
            };
            if patch.is_empty() {
                bail!("nothing to change; pass at least one field option");
            }
            let store = service.set_day(&store, date, &patch);
            render_record(out, &store.get_day(date), true)?;
        }
        Command::Task {
            slot,
            date,
            text,
            toggle,
        } => {
            let date = date.unwrap_or_else(IsoDate::today);
            if text.is_none() && !toggle {
                bail!("nothing to change; pass --text and/or --toggle");
            }
            let mut store = store;
            if let Some(text) = text {
                store = service.set_task_text(&store, date, slot, text);
            }
            if toggle {
                store = service.toggle_task(&store, date, slot);
            }
            render_record(out, &store.get_day(date), true)?;
        }
        Command::Week { date } => {
            let center = date.unwrap_or_else(IsoDate::today);
            for day in week_summary(&store, center)? {
                let marker = if day.date == center { ">" } else { " " };
                let mood = day
                    .mood
                    .map_or_else(|| NO_MOOD.to_string(), |mood| mood.to_string());
                writeln!(
                    out,
                    "{marker} {:<12} {}  mood {:>2}  {}",
                    format_display_date(day.date),
                    day.date,
                    mood,
                    day.tasks
                )?;
            }
        }
        Command::Export {
            format,
            out: dir,
            stdout,
        } => {
            let format = export_format(format);
            let text = format
                .encode(&store)
                .context("Failed to encode export")?;
            if stdout {
                writeln!(out, "{text}")?;
            } else {
                let path = dir.join(export_file_name(format, IsoDate::today()));
                std::fs::write(&path, text)
                    .with_context(|| format!("Failed to write `{}`", path.display()))?;
                writeln!(
                    out,
                    "wrote {} ({}, {} days)",
                    path.display(),
                    format.media_type(),
                    store.len()
                )?;
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read `{}`", file.display()))?;
            let before = store.len();
            let store = service
                .import_json(&store, &text)
                .with_context(|| format!("Failed to import `{}`", file.display()))?;
            writeln!(
                out,
                "imported {}: {} days before, {} days now",
                file.display(),
                before,
                store.len()
            )?;
        }
        Command::Clear { yes } => {
            if !yes && !confirm(out, input, CLEAR_PROMPT)? {
                writeln!(out, "cancelled; nothing was erased")?;
                return Ok(());
            }
            let days = store.len();
            service.clear_all(store);
            writeln!(out, "erased {days} days")?;
        }
        Command::About => {
            writeln!(
                out,
                "bbuddy {} (core {})",
                env!("CARGO_PKG_VERSION"),
                core_version()
            )?;
            writeln!(out, "days saved: {}", store.len())?;
            match logging_status() {
                Some((level, dir)) => writeln!(out, "logging: {level} -> {}", dir.display())?,
                None => writeln!(out, "logging: off")?,
            }
        }
    }

    Ok(())
}

fn export_format(kind: ExportKind) -> ExportFormat {
    match kind {
        ExportKind::Csv => ExportFormat::Csv,
        ExportKind::Json => ExportFormat::Json,
    }
}

fn record_json(record: &DailyRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("Failed to encode record")
}

fn confirm(out: &mut impl Write, input: &mut impl BufRead, prompt: &str) -> Result<bool> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn render_record(out: &mut impl Write, record: &DailyRecord, started: bool) -> Result<()> {
    let status = if started { "" } else { "  [not started]" };
    writeln!(
        out,
        "{} ({}){status}",
        format_display_date(record.date),
        record.date
    )?;
    writeln!(out, "Mood: {}/10", record.mood)?;
    writeln!(out, "Must-dos:")?;
    for (position, task) in record.must_dos.iter().enumerate() {
        writeln!(out, "  {} {}. {}", check(task.done), position + 1, task.text)?;
    }
    writeln!(out, "Nice-to-do: {} {}", check(record.nice.done), record.nice.text)?;
    writeln!(out, "Evening win: {}", record.evening_win)?;
    writeln!(out, "Kid time: {}", yes_no(record.kid_time))?;
    if record.boundary_note.is_empty() {
        writeln!(out, "Boundary kept: {}", yes_no(record.boundary_kept))?;
    } else {
        writeln!(
            out,
            "Boundary kept: {} ({})",
            yes_no(record.boundary_kept),
            record.boundary_note
        )?;
    }
    writeln!(out, "Notes: {}", record.notes)?;
    Ok(())
}

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
