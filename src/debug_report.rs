use twzip::{Address, AddressRule, MatchDetails, Segment, Token};

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
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print the token sequence of a single address.
pub fn print_tokens(address: &Address, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Tokenizing: \"{}\"", address), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    print_token_list(address.tokens(), &palette);
    println!();
}

/// Print a rule, then one block per evaluated address and a summary line.
pub fn print_run(rule: &AddressRule, results: &[(Address, MatchDetails)], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Rule: \"{}\"", rule), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Rule ━━━", ansi::GRAY));
    if rule.qualifiers().is_empty() {
        println!("  {} {}", palette.dim("qualifiers:"), palette.dim("none (exact number)"));
    } else {
        let names: Vec<String> = rule.qualifiers().iter().map(|q| format!("{q:?}")).collect();
        println!("  {} {}", palette.dim("qualifiers:"), palette.paint(names.join(" ∧ "), ansi::BLUE));
    }
    println!("  {} {}", palette.dim("residual:  "), palette.paint(rule.address().as_str(), ansi::YELLOW));
    print_token_list(rule.tokens(), &palette);

    println!("\n{}", palette.paint("━━━ Addresses ━━━", ansi::GRAY));
    for (address, details) in results {
        print_match(address, details, &palette);
    }

    let matched = results.iter().filter(|(_, d)| d.matched).count();
    let elapsed: std::time::Duration = results.iter().map(|(_, d)| d.elapsed).sum();
    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    println!(
        "  Matched: {}  │  Evaluated: {}  │  Time: {}",
        palette.paint(matched.to_string(), ansi::GREEN),
        palette.paint(results.len().to_string(), ansi::CYAN),
        palette.dim(format!("{:?}", elapsed)),
    );
    println!();
}

fn print_match(address: &Address, details: &MatchDetails, palette: &ansi::Palette) {
    let mark = if details.matched { palette.paint("✓", ansi::GREEN) } else { palette.paint("✗", ansi::RED) };
    println!("  {} {} {} {}", mark, palette.bold(address.as_str()), palette.dim("│"), details.verdict);

    let anchor = details.anchor.map_or_else(|| "-".to_string(), |i| i.to_string());
    let range = match details.range_start {
        Some(start) => format!("{}..={}", start, details.rule_pair),
        None => details.rule_pair.to_string(),
    };
    println!(
        "      {} {}  {} {}  {} {}",
        palette.dim("no:"),
        palette.paint(details.address_pair.to_string(), ansi::YELLOW),
        palette.dim("│ rule:"),
        palette.paint(range, ansi::YELLOW),
        palette.dim("│ anchor:"),
        palette.paint(anchor, ansi::BLUE),
    );
}

fn print_token_list(tokens: &[Token], palette: &ansi::Palette) {
    if tokens.is_empty() {
        println!("  {}", palette.dim("No tokens produced"));
        return;
    }

    for (idx, token) in tokens.iter().enumerate() {
        println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), fmt_token_compact(token, palette));
    }
}

fn fmt_token_compact(token: &Token, palette: &ansi::Palette) -> String {
    let body = match &token.segment {
        Segment::Number { .. } => palette.paint(token.number_pair().to_string(), ansi::YELLOW),
        Segment::Name(name) if name.is_empty() => palette.dim("(marker)"),
        Segment::Name(name) => palette.paint(name, ansi::GREEN),
    };
    let unit = token.unit.map_or_else(|| palette.dim(","), |u| palette.paint(u.to_string(), ansi::BLUE));
    format!("{} {}", body, unit)
}
