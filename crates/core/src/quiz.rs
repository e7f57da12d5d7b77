//! Quiz bank lookup and grading. Independent of the gap engine; callers feed
//! the pass/fail verdict into [`crate::gap::apply_quiz_result`].

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::SkillName;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz question prompt cannot be empty")]
    EmptyPrompt,

    #[error("quiz question needs at least two options")]
    TooFewOptions,

    #[error("correct option {index} is out of range for {options} options")]
    AnswerOutOfRange { index: usize, options: usize },

    #[error("no quiz available for skill `{0}`")]
    NoQuiz(SkillName),

    #[error("expected {expected} answers, got {got}")]
    AnswerCount { expected: usize, got: usize },

    #[error("answer {index} to question {question} is not one of its {options} options")]
    ChoiceOutOfRange {
        question: usize,
        index: usize,
        options: usize,
    },
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    prompt: String,
    options: Vec<String>,
    answer: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuizError` if the prompt is blank, fewer than two options are
    /// given, or `answer` does not index an option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: usize,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuizError::TooFewOptions);
        }
        if answer >= options.len() {
            return Err(QuizError::AnswerOutOfRange {
                index: answer,
                options: options.len(),
            });
        }
        Ok(Self {
            prompt: prompt.trim().to_owned(),
            options,
            answer,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> usize {
        self.answer
    }
}

/// Pass rule applied to a graded quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPolicy {
    min_correct: u32,
}

impl QuizPolicy {
    #[must_use]
    pub fn new(min_correct: u32) -> Self {
        Self { min_correct }
    }

    #[must_use]
    pub fn min_correct(&self) -> u32 {
        self.min_correct
    }
}

impl Default for QuizPolicy {
    /// One correct answer is enough to pass.
    fn default() -> Self {
        Self { min_correct: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
}

/// Ordered questions per skill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizBank {
    quizzes: IndexMap<SkillName, Vec<QuizQuestion>>,
}

impl QuizBank {
    #[must_use]
    pub fn new(quizzes: IndexMap<SkillName, Vec<QuizQuestion>>) -> Self {
        let quizzes = quizzes.into_iter().filter(|(_, q)| !q.is_empty()).collect();
        Self { quizzes }
    }

    /// The two-question Python, SQL and Cloud quizzes shipped with the dashboard.
    #[must_use]
    pub fn builtin() -> Self {
        let raw: [(&str, [(&str, [&str; 3], usize); 2]); 3] = [
            (
                "Python",
                [
                    (
                        "What does 'def' do in Python?",
                        ["Defines a function", "Defines a class", "Declares a variable"],
                        0,
                    ),
                    (
                        "What is a list comprehension?",
                        ["Loop", "Function", "Short syntax to create list"],
                        2,
                    ),
                ],
            ),
            (
                "SQL",
                [
                    (
                        "What does SELECT do?",
                        ["Deletes data", "Selects data", "Updates data"],
                        1,
                    ),
                    (
                        "What is a JOIN in SQL?",
                        ["Combines rows", "Splits rows", "Deletes rows"],
                        0,
                    ),
                ],
            ),
            (
                "Cloud",
                [
                    ("Which is a cloud provider?", ["AWS", "HTML", "NumPy"], 0),
                    (
                        "What does IaaS stand for?",
                        [
                            "Infrastructure as a Service",
                            "Interface as a Service",
                            "Internet as a Software",
                        ],
                        0,
                    ),
                ],
            ),
        ];

        let mut quizzes = IndexMap::new();
        for (skill, questions) in raw {
            let Ok(skill) = SkillName::new(skill) else {
                continue;
            };
            let questions = questions
                .into_iter()
                .filter_map(|(prompt, options, answer)| {
                    let options = options.iter().map(|o| (*o).to_owned()).collect();
                    QuizQuestion::new(prompt, options, answer).ok()
                })
                .collect();
            quizzes.insert(skill, questions);
        }
        Self::new(quizzes)
    }

    #[must_use]
    pub fn questions(&self, skill: &str) -> Option<&[QuizQuestion]> {
        self.quizzes.get(skill).map(Vec::as_slice)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillName> {
        self.quizzes.keys()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Score `answers` (chosen option index per question) against `skill`'s quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuiz` if the bank has no quiz for `skill`, and
    /// `AnswerCount` / `ChoiceOutOfRange` for malformed answer sheets.
    pub fn grade(
        &self,
        skill: &SkillName,
        answers: &[usize],
        policy: QuizPolicy,
    ) -> Result<QuizScore, QuizError> {
        let questions = self
            .questions(skill.as_str())
            .ok_or_else(|| QuizError::NoQuiz(skill.clone()))?;
        if answers.len() != questions.len() {
            return Err(QuizError::AnswerCount {
                expected: questions.len(),
                got: answers.len(),
            });
        }

        let mut correct = 0_u32;
        for (i, (question, &choice)) in questions.iter().zip(answers).enumerate() {
            if choice >= question.options.len() {
                return Err(QuizError::ChoiceOutOfRange {
                    question: i,
                    index: choice,
                    options: question.options.len(),
                });
            }
            if choice == question.answer {
                correct = correct.saturating_add(1);
            }
        }

        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Ok(QuizScore {
            correct,
            total,
            passed: correct >= policy.min_correct,
        })
    }
}
