//! Plain-text rendering of engine output.

use std::io::{self, Write};

use case_engine::{
    ActionView, DistrictListing, Emphasis, NoticeKind, Progress, RenderInstruction, Renderer,
    ScoreReport,
};
use case_rules::Credits;
use tracing::warn;

/// Writes render instructions as plain text.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_instruction(&mut self, instruction: &RenderInstruction) -> io::Result<()> {
        let out = &mut self.out;
        match instruction {
            RenderInstruction::Heading(heading) => writeln!(out, "\n== {heading} ==")?,
            RenderInstruction::Text { text, emphasis } => match emphasis {
                Emphasis::Plain => writeln!(out, "{text}\n")?,
                Emphasis::Prompt => writeln!(out, "_{text}_\n")?,
            },
            RenderInstruction::Separator => writeln!(out, "----")?,
            RenderInstruction::Notice(notice) => {
                let tag = match notice.kind {
                    NoticeKind::Info => "info",
                    NoticeKind::Success => "success",
                    NoticeKind::Error => "error",
                };
                writeln!(out, "[{tag}] {notice}")?;
            }
            RenderInstruction::ClueFound(clue) => writeln!(out, "[success] Found Letter {clue}!")?,
            RenderInstruction::LocationLocked(address) => {
                writeln!(out, "[info] {address} is now locked.")?
            }
            RenderInstruction::PresentActions(views) | RenderInstruction::RefreshActions(views) => {
                write_actions(out, views)?
            }
            RenderInstruction::ClearActions => {}
            RenderInstruction::Introduction(view) => {
                if let Some(title) = &view.title {
                    writeln!(out, "\n{title}")?;
                }
                if let Some(date) = &view.date {
                    writeln!(out, "{date}")?;
                }
                writeln!(out, "\n{}\n", view.intro)?;
            }
            RenderInstruction::Credits(credits) => write_credits(out, credits.as_ref())?,
            RenderInstruction::Questions(questions) => {
                if questions.is_empty() {
                    writeln!(out, "No questions found.")?;
                }
                for question in questions {
                    writeln!(out, "{}. {}", question.number, question.question)?;
                }
            }
            RenderInstruction::Score(report) => write_score(out, report)?,
            RenderInstruction::TerminalError(message) => writeln!(out, "error: {message}")?,
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, instruction: &RenderInstruction) {
        if let Err(e) = self.write_instruction(instruction) {
            warn!(error = %e, "Failed to write output");
        }
    }
}

fn write_actions(out: &mut impl Write, views: &[ActionView]) -> io::Result<()> {
    if views.is_empty() {
        return Ok(());
    }
    writeln!(out, "Actions:")?;
    for view in views {
        let unavailable = if view.disabled { " (unavailable)" } else { "" };
        if view.choices.is_empty() {
            writeln!(out, "  act {}  {}{unavailable}", view.id, view.label)?;
        } else {
            writeln!(out, "  {}{unavailable}", view.label)?;
            for choice in &view.choices {
                writeln!(out, "    act {}  {}", choice.id, choice.label)?;
            }
        }
    }
    Ok(())
}

fn write_credits(out: &mut impl Write, credits: Option<&Credits>) -> io::Result<()> {
    let Some(credits) = credits else {
        return writeln!(out, "Credits unavailable.");
    };

    writeln!(out, "\nCredits")?;
    if let Some(writer) = &credits.case_writer {
        writeln!(out, "Case writer: {writer}")?;
    }
    if !credits.authors.is_empty() {
        writeln!(out, "Authors: {}", credits.authors.join(", "))?;
    }
    if !credits.illustrators.is_empty() {
        writeln!(out, "Illustrators: {}", credits.illustrators.join(", "))?;
    }
    if let Some(publisher) = &credits.publisher {
        writeln!(out, "Publisher: {publisher}")?;
    }
    if let Some(distributor) = &credits.distributor {
        writeln!(out, "Distributor: {distributor}")?;
    }
    if let Some(copyright) = &credits.copyright {
        writeln!(out, "{copyright}")?;
    }
    if let Some(name) = credits.website_creator.as_ref().and_then(|c| c.name.as_ref()) {
        writeln!(out, "Adapted by: {name}")?;
    }
    Ok(())
}

fn write_score(out: &mut impl Write, report: &ScoreReport) -> io::Result<()> {
    if let Some(conclusion) = &report.conclusion {
        writeln!(out, "\n== Solution Narrative ==")?;
        writeln!(
            out,
            "{}",
            conclusion.outro.as_deref().unwrap_or("Outro text not found.")
        )?;

        writeln!(out, "\n== Holmes' Solution ==")?;
        writeln!(
            out,
            "{}",
            conclusion
                .case_description
                .as_deref()
                .unwrap_or("Holmes' case description not found.")
        )?;
        for lead in &conclusion.master_leads {
            writeln!(out, "  - {lead}")?;
        }
        writeln!(out, "He scored {} points.", conclusion.master_score)?;
    }

    writeln!(out, "\n== Your Results ==")?;
    writeln!(out, "Total Leads Followed: {}", report.leads_followed)?;
    for entry in &report.entries {
        let mark = if entry.is_achieved() { "+" } else { "-" };
        writeln!(out, "  {mark} {entry}")?;
    }
    writeln!(out, "  {}", report.lead_penalty)?;
    writeln!(out, "Total Score: {} points", report.total)?;
    writeln!(out, "Rating: {}", report.rating)?;
    Ok(())
}

/// Write the location directory.
pub fn write_directory(out: &mut impl Write, directory: &[DistrictListing]) -> io::Result<()> {
    for listing in directory {
        let entries: Vec<String> = listing
            .locations
            .iter()
            .map(|location| {
                let marker = if location.locked {
                    " (locked)"
                } else if location.visited {
                    " (visited)"
                } else {
                    ""
                };
                format!("{}{marker}", location.address.number())
            })
            .collect();
        writeln!(out, "{:>3}: {}", listing.district, entries.join(", "))?;
    }
    Ok(())
}

/// Write the status line.
pub fn write_progress(out: &mut impl Write, progress: &Progress) -> io::Result<()> {
    let clues: Vec<String> = progress
        .clues
        .iter()
        .map(|(clue, found)| format!("{clue} [{}]", if *found { "x" } else { " " }))
        .collect();
    writeln!(
        out,
        "Clues: {}   Leads followed: {}",
        clues.join(" "),
        progress.leads_followed
    )
}
