use colored::{ColoredString, Colorize};
use ideaforge_core::models::{Evaluation, Idea, CRITERION_MAX};
use ideaforge_core::session::{SessionState, EVALUATING_MARKER, GENERATING_MARKER};

pub fn print_idea(idea: &Idea) {
    println!("{}", idea.title.bold());
    println!("  {} {}", "Category:".white(), idea.category.cyan());
    println!("  {} {}", "Target market:".white(), idea.target_market);
    println!();
    println!("  {}", idea.description);
    println!();
    println!("  {}", "Problem".white().bold());
    println!("    {}", idea.problem);
    println!("  {}", "Solution".white().bold());
    println!("    {}", idea.solution);
}

pub fn print_evaluation(evaluation: &Evaluation) {
    println!(
        "{} {}",
        "Overall score:".bold(),
        overall_colored(evaluation.overall_score)
    );
    println!();
    for (name, score) in evaluation.criteria() {
        println!(
            "  {:<16} {} {}",
            criterion_label(name),
            score_bar(score),
            format!("{score}/{CRITERION_MAX}").dimmed()
        );
    }

    print_list("Strengths", &evaluation.strengths, "+");
    print_list("Weaknesses", &evaluation.weaknesses, "-");
    print_list("Recommendations", &evaluation.recommendations, "*");

    println!();
    println!("{}", "Market analysis".white().bold());
    println!("  {}", evaluation.market_analysis);
    println!("{}", "Risk assessment".white().bold());
    println!("  {}", evaluation.risk_assessment);
}

/// Render whatever the session currently holds.
pub fn print_session(state: &SessionState) {
    if state.configuration_required() {
        println!(
            "{}",
            "No API key configured. Run `key <KEY>` here or `ideaforge key set <KEY>`.".yellow()
        );
    }
    if state.is_generating() {
        println!("{}", GENERATING_MARKER.dimmed());
    }
    if state.is_evaluating() {
        println!("{}", EVALUATING_MARKER.dimmed());
    }

    match state.idea() {
        Some(idea) => print_idea(idea),
        None => println!("{}", "No idea yet.".dimmed()),
    }
    if let Some(evaluation) = state.evaluation() {
        println!();
        print_evaluation(evaluation);
    }

    print_error(state);

    if let Some(hint) = next_step_hint(state) {
        println!();
        println!("{}", hint.dimmed());
    }
}

/// What the user can do next, given the in-flight flags and current idea.
fn next_step_hint(state: &SessionState) -> Option<&'static str> {
    if state.configuration_required() {
        return None;
    }
    match (state.can_generate(), state.can_evaluate()) {
        (true, true) if state.evaluation().is_none() => {
            Some("Type `evaluate` to score this idea, or `idea` for a new one.")
        }
        (true, _) => Some("Type `idea` to generate a new idea."),
        (false, true) => Some("Type `evaluate` to score this idea."),
        (false, false) => None,
    }
}

/// The error slot, plus the diagnostic when present.
pub fn print_error(state: &SessionState) {
    if let Some(message) = state.error_message() {
        println!();
        println!("{} {}", "Error:".red().bold(), message.red());
        if let Some(diagnostic) = state.diagnostic() {
            println!("{}", diagnostic.dimmed());
        }
        if state.error().is_some_and(|kind| kind.is_retryable()) {
            println!("{}", "Retrying the same command may succeed.".dimmed());
        }
    }
}

fn print_list(heading: &str, items: &[String], bullet: &str) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", heading.white().bold());
    for item in items {
        println!("  {bullet} {item}");
    }
}

fn criterion_label(wire_name: &str) -> &'static str {
    match wire_name {
        "marketSize" => "Market size",
        "competition" => "Competition",
        "feasibility" => "Feasibility",
        "profitability" => "Profitability",
        "innovation" => "Innovation",
        "timeToMarket" => "Time to market",
        _ => "Criterion",
    }
}

fn score_bar(score: u8) -> ColoredString {
    let filled = usize::from(score.min(CRITERION_MAX));
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        ".".repeat(usize::from(CRITERION_MAX) - filled)
    );
    match score {
        4.. => bar.green(),
        3 => bar.yellow(),
        _ => bar.red(),
    }
}

fn overall_colored(score: u8) -> ColoredString {
    let text = format!("{score}/100");
    match score {
        70.. => text.green().bold(),
        40..=69 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}
