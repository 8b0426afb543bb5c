use phonoshift::regression::RegressionReport;
use phonoshift::{Derivation, TraceEvent, TraceLog};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const RED: &str = "\x1b[31m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.paint(s, BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.paint(s, DIM)
        }
    }
}

pub fn print_derivation(derivation: &Derivation, trace: Option<&TraceLog>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Deriving: \"{}\"", derivation.input), ansi::CYAN)));

    // Stage chain
    println!("\n{}", palette.paint("━━━ Stages ━━━", ansi::GRAY));
    let width = derivation.stages.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
    for (snapshot, metrics) in derivation.stages.iter().zip(&derivation.metrics.stages) {
        println!(
            "  {}  {}  {}",
            palette.paint(format!("{:<width$}", snapshot.name), ansi::BLUE),
            palette.bold(&snapshot.form),
            palette.dim(format!("{} matched / {} rules", metrics.rules_matched, metrics.rules_applied)),
        );
    }

    if let Some(log) = trace {
        println!("\n{}", palette.paint("━━━ Trace ━━━", ansi::GRAY));
        if log.events.is_empty() {
            println!("{}", palette.dim("  No events recorded"));
        }
        for event in &log.events {
            print_event(event, &palette);
        }
    }

    println!("\n  {} {}", palette.dim("Result:"), palette.bold(palette.paint(&derivation.output, ansi::GREEN)));

    let metrics = &derivation.metrics;
    println!(
        "  {} {}  │  {} {}  │  {} {}",
        palette.dim("Total:"),
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.dim("Rules matched:"),
        palette.paint(format!("{}/{}", metrics.rules_matched(), metrics.rules_applied()), ansi::CYAN),
        palette.dim("Patterns cached:"),
        palette.paint(metrics.cached_patterns.to_string(), ansi::YELLOW),
    );
    println!();
}

fn print_event(event: &TraceEvent, palette: &ansi::Palette) {
    match event {
        TraceEvent::Rule { rule, form } => {
            println!("    {}  {}", palette.bold(form), palette.dim(format!("{} \"{}\"", rule.stage, rule.name)));
        }
        TraceEvent::Stage { stage, form } => {
            println!("  {} {}", palette.paint(format!("▸ {stage}:"), ansi::BLUE), palette.bold(form));
        }
        TraceEvent::Inventory { mutation, .. } => {
            println!("    {}", palette.paint(mutation.to_string(), ansi::YELLOW));
        }
    }
}

pub fn print_regression(report: &RegressionReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.paint("━━━ Regression ━━━", ansi::GRAY));

    for failure in &report.failures {
        let line = failure.to_string();
        let painted = if failure.outcome.is_err() { palette.paint(line, ansi::RED) } else { palette.paint(line, ansi::YELLOW) };
        println!("  {painted}");
    }

    let summary = format!("{}/{} passed", report.passed, report.total());
    if report.all_passed() {
        println!("\n  {}", palette.bold(palette.paint(format!("✓ {summary}"), ansi::GREEN)));
    } else {
        println!("\n  {}", palette.bold(palette.paint(format!("✗ {summary}"), ansi::YELLOW)));
    }
    println!();
}
