//! Startup data: role expectations, learner profiles and quiz questions.
//!
//! Records mirror the JSON layout; [`Dataset::from_record`] validates them
//! into domain types so that nothing downstream sees an unknown role or a
//! duplicate learner.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use gap_core::model::{Learner, LearnerName, RoleExpectation, RoleName, SkillLevel, SkillName};
use gap_core::quiz::{QuizBank, QuizQuestion};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::repository::StorageError;
use crate::sample;

/// A JSON object read as its raw key/value entries.
///
/// Repeated keys are kept so validation can reject them instead of the
/// parser silently keeping the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries<V>(pub Vec<(String, V)>);

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> FromIterator<(String, V)> for Entries<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for Entries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Raw dataset as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub roles: Entries<Entries<u32>>,
    #[serde(default)]
    pub learners: Vec<LearnerRecord>,
    /// When absent the built-in quiz bank is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quizzes: Option<Entries<Vec<QuizQuestionRecord>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerRecord {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub skills: Entries<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestionRecord {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl DatasetRecord {
    /// Raw form of the built-in sample roster.
    #[must_use]
    pub fn sample() -> Self {
        sample::record()
    }
}

/// Validated startup data. Only obtainable through the validating constructors.
#[derive(Debug, Clone)]
pub struct Dataset {
    roles: Vec<RoleExpectation>,
    learners: Vec<Learner>,
    quizzes: QuizBank,
}

fn invalid(err: impl Into<gap_core::Error>) -> StorageError {
    StorageError::Invalid(err.into())
}

fn skill_levels(entries: Entries<u32>) -> Result<Vec<(SkillName, SkillLevel)>, StorageError> {
    entries
        .0
        .into_iter()
        .map(|(skill, level)| SkillName::new(skill).map(|skill| (skill, SkillLevel::new(level))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid)
}

/// Roster-level rules: every role declared once with at least one skill,
/// every learner on a declared role, learner names unique.
///
/// # Errors
///
/// Returns the first rule violated as a `StorageError`.
pub(crate) fn check_roster(
    roles: &[RoleExpectation],
    learners: &[Learner],
) -> Result<(), StorageError> {
    let mut role_names = HashSet::with_capacity(roles.len());
    for role in roles {
        if role.is_empty() {
            return Err(StorageError::EmptyRole(role.role().to_string()));
        }
        if !role_names.insert(role.role()) {
            return Err(StorageError::DuplicateRole(role.role().to_string()));
        }
    }

    let mut learner_names = HashSet::with_capacity(learners.len());
    for learner in learners {
        if !role_names.contains(learner.role()) {
            return Err(StorageError::UnknownRole {
                learner: learner.name().to_string(),
                role: learner.role().to_string(),
            });
        }
        if !learner_names.insert(learner.name()) {
            return Err(StorageError::DuplicateLearner(learner.name().to_string()));
        }
    }
    Ok(())
}

impl Dataset {
    /// The sample roster the dashboard ships with.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the embedded sample is malformed.
    pub fn sample() -> Result<Self, StorageError> {
        Self::from_record(DatasetRecord::sample())
    }

    /// Parse and validate a JSON dataset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Parse` for malformed JSON and the validation
    /// errors of [`Dataset::from_record`].
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        let record: DatasetRecord = serde_json::from_str(raw)?;
        Self::from_record(record)
    }

    /// Read and validate a JSON dataset file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read, otherwise as
    /// [`Dataset::from_json`].
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            roles = dataset.roles.len(),
            learners = dataset.learners.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Validate a raw record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a role has no skills or is declared twice, a
    /// learner names a role that does not exist, two learners share a name,
    /// a skill or quiz appears twice under the same owner, or any name, level
    /// or quiz question fails domain validation.
    pub fn from_record(record: DatasetRecord) -> Result<Self, StorageError> {
        let roles = record
            .roles
            .0
            .into_iter()
            .map(|(role, skills)| {
                let role = RoleName::new(role).map_err(invalid)?;
                RoleExpectation::new(role, skill_levels(skills)?).map_err(invalid)
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        let learners = record
            .learners
            .into_iter()
            .map(|entry| {
                let name = LearnerName::new(entry.name).map_err(invalid)?;
                let role = RoleName::new(entry.role).map_err(invalid)?;
                Learner::new(name, role, skill_levels(entry.skills)?).map_err(invalid)
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        check_roster(&roles, &learners)?;

        let quizzes = match record.quizzes {
            None => QuizBank::builtin(),
            Some(raw) => {
                let mut quizzes = IndexMap::with_capacity(raw.0.len());
                for (skill, questions) in raw.0 {
                    let skill = SkillName::new(skill).map_err(invalid)?;
                    if quizzes.contains_key(&skill) {
                        return Err(StorageError::DuplicateQuiz(skill.to_string()));
                    }
                    let questions = questions
                        .into_iter()
                        .map(|q| QuizQuestion::new(q.prompt, q.options, q.answer))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(invalid)?;
                    quizzes.insert(skill, questions);
                }
                QuizBank::new(quizzes)
            }
        };

        Ok(Self {
            roles,
            learners,
            quizzes,
        })
    }

    /// Roles in declaration order.
    #[must_use]
    pub fn roles(&self) -> &[RoleExpectation] {
        &self.roles
    }

    /// Learners in roster order.
    #[must_use]
    pub fn learners(&self) -> &[Learner] {
        &self.learners
    }

    #[must_use]
    pub fn quizzes(&self) -> &QuizBank {
        &self.quizzes
    }

    pub(crate) fn into_parts(self) -> (Vec<RoleExpectation>, Vec<Learner>, QuizBank) {
        (self.roles, self.learners, self.quizzes)
    }
}
