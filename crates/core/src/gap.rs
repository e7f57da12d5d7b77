//! Skill-gap computation over a learner and their role expectation.
//!
//! Everything here is a pure function of its inputs except
//! [`apply_quiz_result`], which mutates the learner it is handed.

use indexmap::IndexMap;

use crate::model::{Learner, ProgressStage, RoleExpectation, SkillLevel, SkillName};

/// Per-skill shortfall against a role, in the role's skill order.
///
/// Only skills strictly below expectation are present; every deficit is > 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillGap {
    deficits: IndexMap<SkillName, u32>,
}

impl SkillGap {
    #[must_use]
    pub fn deficit(&self, skill: &str) -> Option<u32> {
        self.deficits.get(skill).copied()
    }

    #[must_use]
    pub fn contains(&self, skill: &str) -> bool {
        self.deficits.contains_key(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillName, u32)> {
        self.deficits.iter().map(|(skill, d)| (skill, *d))
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillName> {
        self.deficits.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deficits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deficits.is_empty()
    }
}

/// One entry of a learner's learning path.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningStep {
    pub skill: SkillName,
    pub deficit: u32,
    pub expected: SkillLevel,
    /// Share of the expected level already reached, in `[0, 1]`.
    pub completion: f64,
}

/// Gaps, completion and stage computed together for one learner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapAssessment {
    pub gaps: SkillGap,
    pub percent: u8,
    pub stage: ProgressStage,
}

/// Deficit per skill where the learner sits below `role`.
///
/// `role` is expected to be the expectation for the learner's own role.
#[must_use]
pub fn compute_gaps(learner: &Learner, role: &RoleExpectation) -> SkillGap {
    let deficits = role
        .iter()
        .filter_map(|(skill, expected)| {
            learner
                .level_of(skill.as_str())
                .deficit_to(expected)
                .map(|d| (skill.clone(), d))
        })
        .collect();
    SkillGap { deficits }
}

/// Share of role skills the learner meets, as a whole percent.
///
/// A role without skills counts as fully met.
#[must_use]
pub fn compute_progress_percent(learner: &Learner, role: &RoleExpectation) -> u8 {
    percent_met(role.len(), compute_gaps(learner, role).len())
}

/// Coarse workflow stage: any gap keeps the learner at recommendations.
#[must_use]
pub fn compute_progress_stage(learner: &Learner, role: &RoleExpectation) -> ProgressStage {
    stage_for(&compute_gaps(learner, role))
}

#[must_use]
pub fn assess(learner: &Learner, role: &RoleExpectation) -> GapAssessment {
    let gaps = compute_gaps(learner, role);
    GapAssessment {
        percent: percent_met(role.len(), gaps.len()),
        stage: stage_for(&gaps),
        gaps,
    }
}

/// Learning path entries for each gap, in role order.
#[must_use]
pub fn learning_path(gaps: &SkillGap, role: &RoleExpectation) -> Vec<LearningStep> {
    gaps.iter()
        .filter_map(|(skill, deficit)| {
            let expected = role.expected(skill.as_str())?;
            let completion = if expected.value() == 0 {
                1.0
            } else {
                1.0 - f64::from(deficit) / f64::from(expected.value())
            };
            Some(LearningStep {
                skill: skill.clone(),
                deficit,
                expected,
                completion: completion.clamp(0.0, 1.0),
            })
        })
        .collect()
}

/// Record a quiz outcome: a pass raises `skill` by one, a fail changes nothing.
///
/// Returns the learner's level for `skill` after the update.
pub fn apply_quiz_result(learner: &mut Learner, skill: &SkillName, passed: bool) -> SkillLevel {
    if passed {
        learner.raise(skill)
    } else {
        learner.level_of(skill.as_str())
    }
}

fn stage_for(gaps: &SkillGap) -> ProgressStage {
    if gaps.is_empty() {
        ProgressStage::LearningInProgress
    } else {
        ProgressStage::RecommendationsGenerated
    }
}

/// `round(100 * met / total)` with ties to even, in integer arithmetic.
fn percent_met(total: usize, gaps: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let met = total.saturating_sub(gaps);
    let scaled = met * 100;
    let (quotient, remainder) = (scaled / total, scaled % total);
    let rounded = match (remainder * 2).cmp(&total) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + quotient % 2,
    };
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LearnerName, RoleName};

    fn role(skills: &[(&str, u32)]) -> RoleExpectation {
        RoleExpectation::new(
            RoleName::new("Data Engineer").unwrap(),
            skills
                .iter()
                .map(|(s, l)| (SkillName::new(*s).unwrap(), SkillLevel::new(*l))),
        )
        .unwrap()
    }

    fn learner(skills: &[(&str, u32)]) -> Learner {
        Learner::new(
            LearnerName::new("Keerthika").unwrap(),
            RoleName::new("Data Engineer").unwrap(),
            skills
                .iter()
                .map(|(s, l)| (SkillName::new(*s).unwrap(), SkillLevel::new(*l))),
        )
        .unwrap()
    }

    fn tsr() -> RoleExpectation {
        role(&[("Python", 4), ("SQL", 5), ("Cloud", 4)])
    }

    #[test]
    fn every_skill_short_is_a_gap() {
        let l = learner(&[("Python", 3), ("SQL", 4), ("Cloud", 2)]);
        let gaps = compute_gaps(&l, &tsr());

        let listed: Vec<(&str, u32)> = gaps.iter().map(|(s, d)| (s.as_str(), d)).collect();
        assert_eq!(listed, [("Python", 1), ("SQL", 1), ("Cloud", 2)]);
        assert_eq!(compute_progress_percent(&l, &tsr()), 0);
        assert_eq!(
            compute_progress_stage(&l, &tsr()),
            ProgressStage::RecommendationsGenerated
        );
    }

    #[test]
    fn meeting_every_expectation_has_no_gaps() {
        let l = learner(&[("Python", 4), ("SQL", 5), ("Cloud", 4)]);
        assert!(compute_gaps(&l, &tsr()).is_empty());
        assert_eq!(compute_progress_percent(&l, &tsr()), 100);
        assert_eq!(
            compute_progress_stage(&l, &tsr()),
            ProgressStage::LearningInProgress
        );
    }

    #[test]
    fn exceeding_expectation_is_not_a_gap() {
        let l = learner(&[("Python", 5), ("SQL", 2), ("Cloud", 9)]);
        let gaps = compute_gaps(&l, &tsr());
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps.deficit("SQL"), Some(3));
        assert!(!gaps.contains("Python"));
    }

    #[test]
    fn missing_skills_count_from_zero() {
        let l = learner(&[("Python", 4)]);
        let gaps = compute_gaps(&l, &tsr());
        assert_eq!(gaps.deficit("SQL"), Some(5));
        assert_eq!(gaps.deficit("Cloud"), Some(4));
    }

    #[test]
    fn gaps_only_name_role_skills() {
        let l = learner(&[("Python", 1), ("Rust", 0), ("Go", 1)]);
        let r = tsr();
        let gaps = compute_gaps(&l, &r);
        assert!(gaps.skills().all(|s| r.contains(s.as_str())));
        for (skill, expected) in r.iter() {
            let short = l.level_of(skill.as_str()) < expected;
            assert_eq!(gaps.contains(skill.as_str()), short);
        }
    }

    #[test]
    fn empty_role_is_fully_met() {
        let l = learner(&[("Python", 1)]);
        let r = role(&[]);
        assert!(compute_gaps(&l, &r).is_empty());
        assert_eq!(compute_progress_percent(&l, &r), 100);
    }

    #[test]
    fn percent_rounds_half_to_even() {
        assert_eq!(percent_met(8, 1), 88);
        assert_eq!(percent_met(8, 3), 62);
        assert_eq!(percent_met(3, 1), 67);
        assert_eq!(percent_met(4, 1), 75);
        assert_eq!(percent_met(3, 2), 33);
    }

    #[test]
    fn exact_halves_on_large_roles_round_to_even() {
        // 57.5, 42.5, 7.5 and 2.5 are exact halves; no float error leaks in.
        assert_eq!(percent_met(40, 17), 58);
        assert_eq!(percent_met(40, 23), 42);
        assert_eq!(percent_met(40, 37), 8);
        assert_eq!(percent_met(40, 39), 2);
        assert_eq!(percent_met(80, 34), 58);
    }

    #[test]
    fn assess_matches_individual_functions() {
        let l = learner(&[("Python", 4), ("SQL", 3), ("Cloud", 4)]);
        let r = tsr();
        let a = assess(&l, &r);
        assert_eq!(a.gaps, compute_gaps(&l, &r));
        assert_eq!(a.percent, compute_progress_percent(&l, &r));
        assert_eq!(a.stage, compute_progress_stage(&l, &r));
        assert_eq!(a.percent, 67);
    }

    #[test]
    fn learning_path_reports_completion() {
        let l = learner(&[("Python", 3), ("SQL", 5), ("Cloud", 1)]);
        let r = tsr();
        let path = learning_path(&compute_gaps(&l, &r), &r);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].skill.as_str(), "Python");
        assert!((path[0].completion - 0.75).abs() < f64::EPSILON);
        assert_eq!(path[1].skill.as_str(), "Cloud");
        assert_eq!(path[1].deficit, 3);
        assert!((path[1].completion - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn passing_quiz_raises_by_one() {
        let mut l = learner(&[("Python", 3)]);
        let python = SkillName::new("Python").unwrap();
        assert_eq!(apply_quiz_result(&mut l, &python, true), SkillLevel::new(4));
        assert_eq!(l.level_of("Python"), SkillLevel::new(4));
    }

    #[test]
    fn failing_quiz_never_mutates() {
        let mut l = learner(&[("Python", 3)]);
        let before = l.clone();
        let python = SkillName::new("Python").unwrap();
        for _ in 0..3 {
            apply_quiz_result(&mut l, &python, false);
        }
        assert_eq!(l, before);
    }

    #[test]
    fn quiz_progress_never_lowers_percent() {
        let r = tsr();
        let mut l = learner(&[("Python", 2), ("SQL", 4), ("Cloud", 4)]);
        let python = SkillName::new("Python").unwrap();
        let mut last = compute_progress_percent(&l, &r);
        for _ in 0..4 {
            apply_quiz_result(&mut l, &python, true);
            let now = compute_progress_percent(&l, &r);
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 67);
    }
}
