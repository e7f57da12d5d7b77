//! Plain-text views of dashboard data.

use std::fmt::Write as _;

use gap_core::model::{QuizAttempt, StepStatus};
use gap_core::quiz::{QuizPolicy, QuizQuestion};
use services::{LearnerDashboard, RosterRow};

const BAR_WIDTH: usize = 20;

pub fn dashboard(view: &LearnerDashboard) -> String {
    let mut out = String::new();
    let learner = &view.learner;
    let _ = writeln!(out, "Profile: {}", learner.name());
    let _ = writeln!(out, "Role:    {}", learner.role());

    let _ = writeln!(out, "\nCurrent skills:");
    for (skill, level) in learner.skills() {
        let _ = writeln!(out, "  {skill:<16} {level}");
    }

    let _ = writeln!(out, "\nSkill gaps:");
    if view.is_aligned() {
        let _ = writeln!(out, "  No skill gaps! You're aligned with TSR expectations.");
    } else {
        for (skill, deficit) in view.gaps.iter() {
            let _ = writeln!(out, "  {skill:<16} {} ({deficit})", gap_bar(deficit));
        }
    }

    let _ = writeln!(out, "\nProgress: {}%", view.percent);

    if !view.learning_path.is_empty() {
        let _ = writeln!(out, "\nLearning path:");
        for step in &view.learning_path {
            let _ = writeln!(
                out,
                "  {:<16} improve by {} level(s)  {}",
                step.skill.as_str(),
                step.deficit,
                bar(step.completion)
            );
        }
    }

    let _ = writeln!(out, "\nWorkflow:");
    for (stage, status) in &view.checklist {
        let marker = match status {
            StepStatus::Done => "[x]",
            StepStatus::Current => "[>]",
            StepStatus::Pending => "[ ]",
        };
        let _ = writeln!(out, "  {marker} {stage}");
    }
    out
}

fn bar(completion: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((completion.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

/// One `#` per missing level, capped at the bar width with a trailing `+`.
fn gap_bar(deficit: u32) -> String {
    let shown = usize::try_from(deficit).map_or(BAR_WIDTH, |d| d.min(BAR_WIDTH));
    let mut bar = "#".repeat(shown);
    if usize::try_from(deficit).map_or(true, |d| d > BAR_WIDTH) {
        bar.push('+');
    }
    bar
}

pub fn roster(rows: &[RosterRow]) -> String {
    const HEADERS: [&str; 5] = ["Name", "Role", "Skill Gaps", "Progress", "Status"];

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.name.to_string(),
                row.role.to_string(),
                row.gap_summary(),
                row.progress(),
                row.status().to_owned(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for line in &cells {
        push_row(&mut out, line, &widths);
    }
    if cells.is_empty() {
        let _ = writeln!(out, "(no learners)");
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

pub fn questions(skill: &str, questions: &[QuizQuestion], policy: QuizPolicy) -> String {
    let mut out = format!(
        "Quiz: {skill} (pass with at least {} of {} correct)\n",
        policy.min_correct(),
        questions.len()
    );
    for (i, question) in questions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, question.prompt());
        for (j, option) in question.options().iter().enumerate() {
            let _ = writeln!(out, "   [{j}] {option}");
        }
    }
    out
}

pub fn attempt(attempt: &QuizAttempt) -> String {
    let mut out = format!(
        "You scored {}/{} on the {} quiz.\n",
        attempt.score.correct, attempt.score.total, attempt.skill
    );
    if attempt.raised_level() {
        let _ = writeln!(
            out,
            "Skill level for {} updated to {}",
            attempt.skill, attempt.level_after
        );
    } else {
        let _ = writeln!(
            out,
            "Skill level for {} stays at {}",
            attempt.skill, attempt.level_after
        );
    }
    out
}

pub fn history(attempts: &[QuizAttempt]) -> String {
    if attempts.is_empty() {
        return "No quiz attempts yet.\n".to_owned();
    }
    let mut out = String::new();
    for a in attempts {
        let _ = writeln!(
            out,
            "{}  {:<16} {}/{}  {}  {} -> {}",
            a.attempted_at.format("%Y-%m-%d %H:%M:%S"),
            a.skill.as_str(),
            a.score.correct,
            a.score.total,
            if a.passed() { "pass" } else { "fail" },
            a.level_before,
            a.level_after
        );
    }
    out
}
