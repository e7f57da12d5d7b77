use gap_core::model::ProgressStage;
use gap_core::quiz::QuizPolicy;
use gap_core::time::fixed_now;
use services::{AppServices, Clock, RoleFilter};

fn services() -> AppServices {
    AppServices::load(None, Clock::fixed(fixed_now()), QuizPolicy::default()).unwrap()
}

#[test]
fn quizzes_close_gaps_and_roster_reflects_them() {
    let app = services();
    let dashboard = app.dashboard();
    let quiz = app.quiz();
    let roster = app.roster();

    // Priya: Python 4/4, SQL 3/5, Cloud 3/4, ETL 2/3.
    let before = dashboard.learner_view("Priya").unwrap();
    assert_eq!(before.percent, 25);
    assert_eq!(before.stage, ProgressStage::RecommendationsGenerated);

    quiz.submit("Priya", "SQL", &[1, 0]).unwrap();
    quiz.submit("Priya", "SQL", &[1, 1]).unwrap();
    quiz.submit("Priya", "Cloud", &[0, 0]).unwrap();
    quiz.record_result("Priya", "ETL", true).unwrap();

    let after = dashboard.learner_view("Priya").unwrap();
    assert!(after.is_aligned());
    assert_eq!(after.percent, 100);
    assert_eq!(after.stage, ProgressStage::LearningInProgress);
    assert!(after.learning_path.is_empty());

    let rows = roster.report(&RoleFilter::parse("Data Engineer")).unwrap();
    let priya = rows.iter().find(|r| r.name.as_str() == "Priya").unwrap();
    assert_eq!(priya.gap_summary(), "None");
    assert_eq!(priya.progress(), "100%");
    assert_eq!(quiz.history("Priya").unwrap().len(), 4);
}

#[test]
fn failed_quiz_changes_nothing_visible() {
    let app = services();
    let before = app.roster().export_csv(&RoleFilter::All).unwrap();
    app.quiz().submit("Karan", "Python", &[1, 0]).unwrap();
    let after = app.roster().export_csv(&RoleFilter::All).unwrap();
    assert_eq!(before, after);
}

#[test]
fn csv_has_one_line_per_learner() {
    let csv = services().roster().export_csv(&RoleFilter::All).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "Name,Role,Skill Gaps,Progress");
    assert_eq!(
        lines[1],
        "Keerthika,Data Engineer,\"Python, SQL, Cloud, ETL\",0%"
    );
    assert_eq!(lines[6], "Vikram,ML Engineer,Deep Learning,67%");
}
