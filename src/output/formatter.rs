use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::valuation::{Recommendation, ScoreResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a domain to fit available width, accounting for Unicode
fn truncate_domain(domain: &str, max_width: usize) -> String {
    let chars: Vec<char> = domain.chars().collect();
    if chars.len() <= max_width {
        domain.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn colorize_tier(tier: Recommendation, text: &str) -> String {
    match tier {
        Recommendation::StronglyRecommended => text.green().bold().to_string(),
        Recommendation::Recommended => text.green().to_string(),
        Recommendation::Consider => text.yellow().to_string(),
        Recommendation::Caution => text.red().to_string(),
        Recommendation::NotRecommended => text.red().dimmed().to_string(),
    }
}

/// Format results as a ranked table: index, score, domain, value estimate.
/// No headers; index is 1-based and matches what `open <index>` expects.
pub fn format_ranked_table(results: &[ScoreResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No domains found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 6; // fits "100.00"
    let separator = "  ";
    let value_width = results
        .iter()
        .map(|r| r.estimated_value.chars().count())
        .max()
        .unwrap_or(0);

    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$.2}", result.total_score, width = score_width);

            let fixed_width = index_width + 1 + score_width + separator.len() * 2 + value_width;
            let domain = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_domain(&result.domain, width - fixed_width)
                } else {
                    truncate_domain(&result.domain, 20)
                }
            } else {
                result.domain.clone()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    colorize_tier(result.recommendation, &score_str),
                    separator,
                    domain.bold(),
                    separator,
                    result.estimated_value
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, domain, separator, result.estimated_value
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single result with detailed multi-line output (for verbose mode)
pub fn format_detail(result: &ScoreResult, use_colors: bool) -> String {
    let s = &result.factor_scores;
    let factors = format!(
        "  Length: {:>5.1}  Keyword: {:>5.1}  Brandability: {:>5.1}\n  SEO:    {:>5.1}  Technical: {:>4.1}  Commercial: {:>6.1}",
        s.length, s.keyword, s.brandability, s.seo, s.technical, s.commercial
    );

    let notes = if result.explanation.is_empty() {
        String::new()
    } else {
        let bullets: Vec<String> = result
            .explanation
            .iter()
            .map(|note| format!("  - {}", note))
            .collect();
        format!("\n{}", bullets.join("\n"))
    };

    if use_colors {
        format!(
            "{}\n  Score: {:.2} ({})\n  Value: {}\n{}{}",
            result.domain.bold(),
            result.total_score,
            colorize_tier(result.recommendation, result.recommendation.label()),
            result.estimated_value.cyan(),
            factors,
            notes
        )
    } else {
        format!(
            "{}\n  Score: {:.2} ({})\n  Value: {}\n{}{}",
            result.domain,
            result.total_score,
            result.recommendation.label(),
            result.estimated_value,
            factors,
            notes
        )
    }
}

/// Format results as tab-separated values for scripting
/// Columns: score, domain, tier, value estimate (no headers, no colors)
pub fn format_tsv(results: &[ScoreResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    results
        .iter()
        .map(|result| {
            format!(
                "{:.2}\t{}\t{}\t{}",
                result.total_score,
                result.domain,
                result.recommendation.label(),
                result.estimated_value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
