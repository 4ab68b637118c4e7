//! Console reporter with colored output

use super::{DocumentReport, Highlight, SummaryStats};
use crate::{AssessmentResult, CategoryScore, Rating};
use colored::Colorize;
use std::io::{self, Write};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single document
    pub fn report(&self, document: &DocumentReport) -> io::Result<()> {
        self.write_report(&mut io::stdout().lock(), document)
    }

    /// Report multiple documents with summary
    pub fn report_many(&self, documents: &[DocumentReport], stats: &SummaryStats) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for document in documents {
            self.write_report(&mut out, document)?;
            writeln!(out, "{}", "─".repeat(60))?;
        }
        self.write_summary(&mut out, stats)
    }

    /// Report in quiet mode (just the scores)
    pub fn report_quiet(&self, document: &DocumentReport) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", self.render_quiet(document))
    }

    pub fn render_quiet(&self, document: &DocumentReport) -> String {
        let report = &document.report;
        format!(
            "{}: {} ({}) seo {} readability {}",
            document.file_path.display(),
            report.overall.score,
            self.colorize_rating(report.overall.rating),
            report.seo.score,
            report.readability.score
        )
    }

    /// Full text of a document report
    pub fn write_report(&self, out: &mut impl Write, document: &DocumentReport) -> io::Result<()> {
        let report = &document.report;
        let stats = &report.stats;

        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("Content Analysis: {}", document.file_path.display()).bold()
        )?;
        writeln!(
            out,
            "   Locale: {} | Type: {} | Words: {} | Sentences: {} | Paragraphs: {} | Subheadings: {}",
            report.locale, report.content_type, stats.words, stats.sentences, stats.paragraphs, stats.subheadings
        )?;
        writeln!(out)?;

        writeln!(
            out,
            "   Score: {} {}",
            self.create_score_bar(report.overall.score),
            self.colorize_rating(report.overall.rating).bold()
        )?;
        if let Some(threshold) = document.threshold {
            let line = format!("threshold {}", threshold);
            if document.below_threshold() {
                writeln!(out, "   {}", format!("below {}", line).red())?;
            } else {
                writeln!(out, "   {}", line.dimmed())?;
            }
        }
        writeln!(out)?;

        writeln!(out, "   {}", "Categories:".bold())?;
        for category in [&report.seo, &report.readability] {
            writeln!(out, "   {}", self.category_line(category))?;
        }
        writeln!(out)?;

        let sections = [
            ("Problems:", Rating::Bad),
            ("Improvements:", Rating::Ok),
            ("Feedback:", Rating::Feedback),
            ("Good results:", Rating::Good),
        ];
        for (title, rating) in sections {
            let results: Vec<&AssessmentResult> =
                report.results.iter().filter(|r| r.rating == rating).collect();
            if results.is_empty() {
                continue;
            }
            if rating == Rating::Good && !self.verbose {
                writeln!(
                    out,
                    "   {} {} good results (use --verbose to show)",
                    "✓".green(),
                    results.len()
                )?;
                continue;
            }
            writeln!(out, "   {}", title.bold())?;
            for result in results {
                self.write_result(out, result, &document.highlights)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_result(
        &self,
        out: &mut impl Write,
        result: &AssessmentResult,
        highlights: &[Highlight],
    ) -> io::Result<()> {
        let icon = match result.rating {
            Rating::Bad => "✗".red(),
            Rating::Ok => "⚠".yellow(),
            Rating::Good => "✓".green(),
            Rating::Feedback => "ℹ".blue(),
        };
        writeln!(
            out,
            "   {} [{}] {}",
            icon,
            result.identifier.to_string().dimmed(),
            result.text
        )?;

        if !self.verbose {
            return Ok(());
        }
        if let Some(measurement) = result.measurement {
            writeln!(out, "       {} {}", "measured".dimmed(), format!("{:.1}", measurement).dimmed())?;
        }
        for highlight in highlights.iter().filter(|h| h.assessment == result.identifier) {
            let location = format!("L{}:{}", highlight.line, highlight.column);
            writeln!(
                out,
                "       {} {} {}",
                "→".dimmed(),
                location.dimmed(),
                truncate(&highlight.text, 60).italic()
            )?;
        }
        Ok(())
    }

    fn category_line(&self, category: &CategoryScore) -> String {
        let name = category.category.to_string();
        if category.scored == 0 {
            return format!("{} {:<12} {}", self.create_mini_bar(0), name, "no scored results".dimmed());
        }
        let score = format!("{:>3}/100", category.score);
        let colored_score = match category.rating {
            Rating::Good => score.green(),
            Rating::Ok => score.yellow(),
            _ => score.red(),
        };
        format!(
            "{} {} {:<12} ({} assessments)",
            self.create_mini_bar(category.score),
            colored_score,
            name,
            category.scored
        )
    }

    /// Summary across documents
    pub fn write_summary(&self, out: &mut impl Write, stats: &SummaryStats) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "═".repeat(60))?;
        writeln!(out, "{}", "Summary".bold())?;
        writeln!(out, "{}", "═".repeat(60))?;
        writeln!(out, "   Files analyzed:  {}", stats.files_analyzed.to_string().bold())?;
        writeln!(
            out,
            "   Average score:   {} ({})",
            stats.average_score.to_string().bold(),
            self.colorize_rating(stats.average_rating)
        )?;
        writeln!(out, "   Total words:     {}", stats.total_words)?;
        if stats.below_threshold > 0 {
            writeln!(
                out,
                "   {}",
                format!("Below threshold: {}", stats.below_threshold).red()
            )?;
        }
        writeln!(out)
    }

    fn colorize_rating(&self, rating: Rating) -> colored::ColoredString {
        let s = rating.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match rating {
            Rating::Good => s.green().bold(),
            Rating::Ok => s.yellow(),
            Rating::Bad => s.red().bold(),
            Rating::Feedback => s.blue(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            match Rating::from_percent(score) {
                Rating::Good => bar.green().to_string(),
                Rating::Ok => bar.yellow().to_string(),
                _ => bar.red().to_string(),
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: u8) -> String {
        let filled = (score as usize * 10) / 100;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut)
    }
}
