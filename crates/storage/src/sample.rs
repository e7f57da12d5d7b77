use crate::dataset::{DatasetRecord, Entries, LearnerRecord};

const ROLES: &[(&str, &[(&str, u32)])] = &[
    (
        "Data Engineer",
        &[("Python", 4), ("SQL", 5), ("Cloud", 4), ("ETL", 3)],
    ),
    ("Data Analyst", &[("Python", 3), ("SQL", 5), ("Visualization", 4)]),
    ("ML Engineer", &[("Python", 5), ("ML", 4), ("Deep Learning", 3)]),
];

const LEARNERS: &[(&str, &str, &[(&str, u32)])] = &[
    (
        "Keerthika",
        "Data Engineer",
        &[("Python", 3), ("SQL", 4), ("Cloud", 2), ("ETL", 1)],
    ),
    (
        "Arjun",
        "Data Analyst",
        &[("Python", 2), ("SQL", 5), ("Visualization", 2)],
    ),
    (
        "Priya",
        "Data Engineer",
        &[("Python", 4), ("SQL", 3), ("Cloud", 3), ("ETL", 2)],
    ),
    (
        "Rahul",
        "ML Engineer",
        &[("Python", 4), ("ML", 3), ("Deep Learning", 1)],
    ),
    (
        "Sneha",
        "Data Analyst",
        &[("Python", 3), ("SQL", 4), ("Visualization", 3)],
    ),
    (
        "Vikram",
        "ML Engineer",
        &[("Python", 5), ("ML", 4), ("Deep Learning", 2)],
    ),
    (
        "Riya",
        "Data Engineer",
        &[("Python", 2), ("SQL", 3), ("Cloud", 1), ("ETL", 1)],
    ),
    (
        "Karan",
        "ML Engineer",
        &[("Python", 3), ("ML", 2), ("Deep Learning", 1)],
    ),
];

fn levels(pairs: &[(&str, u32)]) -> Entries<u32> {
    pairs
        .iter()
        .map(|(skill, level)| ((*skill).to_owned(), *level))
        .collect()
}

pub(crate) fn record() -> DatasetRecord {
    DatasetRecord {
        roles: ROLES
            .iter()
            .map(|(role, skills)| ((*role).to_owned(), levels(skills)))
            .collect(),
        learners: LEARNERS
            .iter()
            .map(|(name, role, skills)| LearnerRecord {
                name: (*name).to_owned(),
                role: (*role).to_owned(),
                skills: levels(skills),
            })
            .collect(),
        quizzes: None,
    }
}
