use std::path::Path;

use anyhow::Result;
use console::{Style, Term, style};
use serde::Serialize;

use crate::commands::analyze::Skipped;
use crate::commands::classify::Classification;
use crate::commands::init::InitResult;
use crate::models::SentimentTag;
use crate::session::Report;

const WRAP_WIDTH: usize = 80;

pub struct Output {
    term: Term,
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self {
            term: Term::stdout(),
            json,
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        self.term.write_line(&output)?;
        Ok(())
    }

    fn sentiment_style(tag: SentimentTag) -> Style {
        match tag {
            SentimentTag::Positive => Style::new().green(),
            SentimentTag::Negative => Style::new().red(),
            SentimentTag::Neutral => Style::new().dim(),
        }
    }

    pub fn init(&self, result: &InitResult) -> Result<()> {
        if result.created {
            self.term.write_line(&format!(
                "{} {}",
                style("Initialized pulse config:").green(),
                style(result.path.display()).cyan().bold()
            ))?;
        } else {
            self.term.write_line(&format!(
                "Pulse already initialized in {}",
                result.path.display()
            ))?;
        }
        Ok(())
    }

    pub fn classification(&self, result: &Classification) -> Result<()> {
        if self.json {
            return self.print_json(result);
        }

        self.term.write_line(&format!(
            "{} {}",
            style("Sentiment:").bold(),
            Self::sentiment_style(result.sentiment).apply_to(result.sentiment)
        ))?;
        self.term
            .write_line(&format!("  Classifier: {}", result.classifier))?;
        if let Some(score) = result.score {
            self.term.write_line(&format!("  Score: {score:.4}"))?;
        }
        Ok(())
    }

    pub fn skipped(&self, skipped: &[Skipped]) -> Result<()> {
        if skipped.is_empty() {
            return Ok(());
        }

        let err = Term::stderr();
        err.write_line(&format!(
            "{} {} record(s) skipped:",
            style("Warning:").yellow(),
            skipped.len()
        ))?;
        for entry in skipped {
            err.write_line(&format!("  #{}: {}", entry.position, entry.reason))?;
        }
        Ok(())
    }

    pub fn report(&self, report: &Report<'_>) -> Result<()> {
        if self.json {
            return self.print_json(report);
        }

        if report.comments.is_empty() {
            self.term.write_line("No comments yet.")?;
            return Ok(());
        }

        self.term
            .write_line(&style("All Comments:").bold().to_string())?;
        for entry in &report.comments {
            let comment = entry.comment;
            self.term.write_line(&format!(
                "{} {} ({}) [{}]",
                style(format!("[{}]", entry.index)).cyan(),
                style(comment.author()).bold(),
                style(comment.timestamp().strftime("%Y-%m-%d %H:%M:%S")).dim(),
                Self::sentiment_style(comment.sentiment()).apply_to(comment.sentiment())
            ))?;
            for line in textwrap::wrap(comment.text(), WRAP_WIDTH - 4) {
                self.term.write_line(&format!("    {line}"))?;
            }
        }

        self.term.write_line("")?;
        self.term.write_line(
            &style(format!("Top {} Words:", report.top_words.len()))
                .bold()
                .to_string(),
        )?;
        let width = report
            .top_words
            .iter()
            .map(|w| w.word.chars().count())
            .max()
            .unwrap_or(0);
        for word in &report.top_words {
            self.term.write_line(&format!(
                "  {:<width$}  {}",
                word.word,
                style(word.count).yellow()
            ))?;
        }

        self.term.write_line("")?;
        self.term
            .write_line(&style("Sentiment Distribution:").bold().to_string())?;
        for (tag, count) in report.distribution.iter() {
            self.term.write_line(&format!(
                "  {:<8}  {}",
                Self::sentiment_style(tag).apply_to(tag),
                count
            ))?;
        }

        self.term.write_line("")?;
        self.term
            .write_line(&style("Sentiment Timeline:").bold().to_string())?;
        for entry in &report.timeline {
            self.term.write_line(&format!(
                "  {}  positive {}  negative {}  neutral {}",
                style(&entry.bucket).cyan(),
                entry.counts.get(SentimentTag::Positive),
                entry.counts.get(SentimentTag::Negative),
                entry.counts.get(SentimentTag::Neutral)
            ))?;
        }
        Ok(())
    }

    pub fn report_written(&self, path: &Path) -> Result<()> {
        if self.json {
            return Ok(());
        }
        self.term.write_line("")?;
        self.term.write_line(&format!(
            "{} {}",
            style("Wrote report:").green(),
            style(path.display()).cyan()
        ))?;
        Ok(())
    }
}
