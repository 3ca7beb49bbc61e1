use rulebot::DispatchOutcome;

/// ANSI styling for the trace, keyed by what a span of text means.
#[derive(Debug, Clone, Copy)]
enum Style {
    Heading,
    Matched,
    Skipped,
    Fallback,
    Label,
    Knowledge,
    Timing,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Heading => "\x1b[1;36m",
            Style::Matched => "\x1b[1;32m",
            Style::Skipped => "\x1b[90m",
            Style::Fallback => "\x1b[33m",
            Style::Label => "\x1b[2m",
            Style::Knowledge => "\x1b[34m",
            Style::Timing => "\x1b[32m",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, s: impl AsRef<str>, style: Style) -> String {
        if self.enabled { format!("{}{}\x1b[0m", style.code(), s.as_ref()) } else { s.as_ref().to_string() }
    }
}

pub fn print_outcome(outcome: &DispatchOutcome, color: bool) {
    let palette = Palette { enabled: color };
    println!("{}", palette.paint(format!("⚙  Input: \"{}\"", outcome.normalized), Style::Heading));

    print_rules(outcome, &palette);

    match outcome.intent {
        Some(intent) => {
            let traits = outcome.traits.names();
            println!(
                "  {} {}{}",
                palette.paint("intent:", Style::Label),
                palette.paint(intent, Style::Matched),
                if traits.is_empty() {
                    String::new()
                } else {
                    palette.paint(format!("  [{}]", traits.join(", ")), Style::Label)
                }
            );
        }
        None => {
            println!("  {} {}", palette.paint("intent:", Style::Label), palette.paint("<fallback>", Style::Fallback));
            if outcome.normalized.is_empty() {
                println!("  {}", palette.paint("Empty input never matches: the catch-all needs one character", Style::Label));
            }
        }
    }

    if let Some(kind) = outcome.knowledge {
        println!("  {} {}", palette.paint("knowledge:", Style::Label), palette.paint(kind.as_str(), Style::Knowledge));
    }

    println!(
        "  {} {}  │  {} {}  │  {} {}",
        palette.paint("total:", Style::Label),
        palette.paint(format!("{:?}", outcome.metrics.total), Style::Timing),
        palette.paint("matching:", Style::Label),
        palette.paint(format!("{:?}", outcome.metrics.matching), Style::Timing),
        palette.paint("handler:", Style::Label),
        palette.paint(format!("{:?}", outcome.metrics.handler), Style::Label),
    );
}

fn print_rules(outcome: &DispatchOutcome, palette: &Palette) {
    let last = outcome.tried.len().saturating_sub(1);
    let line = outcome
        .tried
        .iter()
        .enumerate()
        .map(|(idx, intent)| {
            if idx == last && outcome.intent.is_some() {
                palette.paint(format!("✓ {intent}"), Style::Matched)
            } else {
                palette.paint(format!("✗ {intent}"), Style::Skipped)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {} {}", palette.paint(format!("rules ({}):", outcome.metrics.evaluated), Style::Knowledge), line);
}
