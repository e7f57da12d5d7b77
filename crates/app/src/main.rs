use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gap_core::quiz::QuizPolicy;
use services::{AppServices, Clock, RoleFilter};
use tracing_subscriber::EnvFilter;

mod render;
mod session;

use session::Session;

#[derive(Debug, Parser)]
#[command(name = "skillgap")]
#[command(about = "Compare learner skills against role expectations")]
struct Cli {
    /// JSON dataset with roles, learners and optional quizzes (built-in sample when omitted)
    #[arg(long, env = "SKILLGAP_DATA", global = true)]
    data: Option<PathBuf>,

    /// Correct answers needed to pass a quiz
    #[arg(long, env = "SKILLGAP_MIN_CORRECT", default_value_t = 1, global = true)]
    min_correct: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show a learner's gaps, progress and learning path
    Dashboard {
        #[arg(long)]
        learner: String,
    },
    /// Admin report across the roster
    Roster {
        /// Role to keep, or `All`
        #[arg(long, default_value = "All")]
        role: String,
        /// Write CSV to this path (`-` for stdout) instead of printing a table
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show a skill quiz, or grade answers when given
    Quiz {
        #[arg(long)]
        learner: String,
        #[arg(long)]
        skill: String,
        /// Chosen option index per question, comma separated
        #[arg(long, value_delimiter = ',')]
        answers: Vec<usize>,
    },
    /// Interactive session (default)
    Session,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,app=info,services=info,storage=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let services = AppServices::load(
        cli.data.as_deref(),
        Clock::system(),
        QuizPolicy::new(cli.min_correct),
    )?;

    match cli.command.unwrap_or(Command::Session) {
        Command::Dashboard { learner } => {
            let view = services.dashboard().learner_view(&learner)?;
            print!("{}", render::dashboard(&view));
        }
        Command::Roster { role, csv } => {
            let filter = RoleFilter::parse(&role);
            let roster = services.roster();
            match csv {
                None => print!("{}", render::roster(&roster.report(&filter)?)),
                Some(path) if path.as_os_str() == "-" => print!("{}", roster.export_csv(&filter)?),
                Some(path) => {
                    std::fs::write(&path, roster.export_csv(&filter)?)?;
                    tracing::info!(path = %path.display(), "roster exported");
                }
            }
        }
        Command::Quiz {
            learner,
            skill,
            answers,
        } => {
            let quiz = services.quiz();
            if answers.is_empty() {
                let questions = quiz
                    .questions(&skill)
                    .ok_or_else(|| format!("no quiz available for {skill}"))?;
                print!("{}", render::questions(&skill, questions, quiz.policy()));
            } else {
                let attempt = quiz.submit(&learner, &skill, &answers)?;
                print!("{}", render::attempt(&attempt));
                let view = services.dashboard().learner_view(&learner)?;
                print!("\n{}", render::dashboard(&view));
            }
        }
        Command::Session => {
            let stdin = io::stdin();
            Session::new(&services).run(stdin.lock(), io::stdout())?;
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
