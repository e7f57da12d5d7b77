//! Interactive line-oriented dashboard over one in-memory roster.

use std::io::{self, BufRead, Write};
use std::path::Path;

use services::{AppServices, RoleFilter};

use crate::render;

const HELP: &str = "\
Commands:
  learners                 list learners available at login
  roles                    list configured roles
  login <name>             switch to a learner
  view                     show the current learner's dashboard
  quiz <skill>             show the questions for a skill
  quiz <skill> <i,j,...>   answer a quiz (option index per question)
  history                  quiz attempts of the current learner
  roster [role]            admin report, optionally filtered by role
  export <path> [role]     write the admin report as CSV
  help                     show this help
  quit                     leave the session
";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a> {
    services: &'a AppServices,
    current: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(services: &'a AppServices) -> Self {
        Self {
            services,
            current: None,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "Skill-Gap Analyzer. Type `help` for commands.")?;
        for line in input.lines() {
            let line = line?;
            let (reply, flow) = self.handle(&line);
            out.write_all(reply.as_bytes())?;
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn handle(&mut self, line: &str) -> (String, Flow) {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        let reply = match command {
            "" => String::new(),
            "help" => HELP.to_owned(),
            "quit" | "exit" => return ("Bye.\n".to_owned(), Flow::Quit),
            "learners" => self.learners(),
            "roles" => self.roles(),
            "login" => self.login(rest),
            "view" => self.view(),
            "quiz" => self.quiz(rest),
            "history" => self.history(),
            "roster" => self.roster(rest),
            "export" => self.export(rest),
            other => format!("unknown command: {other} (try `help`)\n"),
        };
        (reply, Flow::Continue)
    }

    fn learners(&self) -> String {
        match self.services.dashboard().learner_names() {
            Ok(names) => names.iter().map(|n| format!("{n}\n")).collect(),
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn roles(&self) -> String {
        match self.services.dashboard().role_names() {
            Ok(roles) => roles.iter().map(|r| format!("{r}\n")).collect(),
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn login(&mut self, name: &str) -> String {
        if name.is_empty() {
            return "usage: login <name>\n".to_owned();
        }
        match self.services.dashboard().learner_view(name) {
            Ok(view) => {
                self.current = Some(name.to_owned());
                tracing::debug!(learner = name, "login");
                render::dashboard(&view)
            }
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn view(&self) -> String {
        let Some(name) = &self.current else {
            return "no learner selected; use `login <name>`\n".to_owned();
        };
        match self.services.dashboard().learner_view(name) {
            Ok(view) => render::dashboard(&view),
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn quiz(&self, rest: &str) -> String {
        let Some(name) = &self.current else {
            return "no learner selected; use `login <name>`\n".to_owned();
        };
        let (skill, answers) = split_answers(rest);
        if skill.is_empty() {
            return "usage: quiz <skill> [i,j,...]\n".to_owned();
        }

        let quiz = self.services.quiz();
        let Some(answers) = answers else {
            return match quiz.questions(skill) {
                Some(questions) => render::questions(skill, questions, quiz.policy()),
                None => format!("no quiz available for {skill}\n"),
            };
        };
        match quiz.submit(name, skill, &answers) {
            Ok(attempt) => render::attempt(&attempt),
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn history(&self) -> String {
        let Some(name) = &self.current else {
            return "no learner selected; use `login <name>`\n".to_owned();
        };
        match self.services.quiz().history(name) {
            Ok(attempts) => render::history(&attempts),
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn roster(&self, role: &str) -> String {
        let filter = if role.is_empty() {
            RoleFilter::All
        } else {
            RoleFilter::parse(role)
        };
        match self.services.roster().report(&filter) {
            Ok(rows) => render::roster(&rows),
            Err(err) => format!("error: {err}\n"),
        }
    }

    fn export(&self, rest: &str) -> String {
        let (path, role) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(p, r)| (p, r.trim()));
        if path.is_empty() {
            return "usage: export <path> [role]\n".to_owned();
        }
        let filter = if role.is_empty() {
            RoleFilter::All
        } else {
            RoleFilter::parse(role)
        };
        let csv = match self.services.roster().export_csv(&filter) {
            Ok(csv) => csv,
            Err(err) => return format!("error: {err}\n"),
        };
        match std::fs::write(Path::new(path), csv) {
            Ok(()) => format!("report written to {path}\n"),
            Err(err) => format!("error: failed to write {path}: {err}\n"),
        }
    }
}

/// Split `"<skill> <i,j>"` into the skill and, when the last word is an
/// index list, the parsed answers.
fn split_answers(rest: &str) -> (&str, Option<Vec<usize>>) {
    if let Some((skill, last)) = rest.rsplit_once(char::is_whitespace) {
        if let Some(answers) = parse_answers(last) {
            return (skill.trim(), Some(answers));
        }
    }
    (rest, None)
}

fn parse_answers(raw: &str) -> Option<Vec<usize>> {
    raw.split(',')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect()
}
