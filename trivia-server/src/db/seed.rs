//! Standard categories and sample questions
//!
//! The same data backs `trivia seed` and `MemoryStore::seeded`.

use sqlx::PgPool;

use super::DbError;

/// Sample question before it has an id
#[derive(Debug, Clone, Copy)]
pub struct SeedQuestion {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: i32,
    pub difficulty: i32,
}

/// Standard categories (id, label)
pub const CATEGORIES: &[(i32, &str)] = &[
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

const fn q(question: &'static str, answer: &'static str, category: i32, difficulty: i32) -> SeedQuestion {
    SeedQuestion {
        question,
        answer,
        category,
        difficulty,
    }
}

/// Sample questions, inserted in this order
pub const QUESTIONS: &[SeedQuestion] = &[
    q("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    q("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    q("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    q("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
    q("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    q("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    q("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    q("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    q("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    q("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    q("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    q("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
    q("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    q("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    q("Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    q("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    q("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    q("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    q("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

/// Summary of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_inserted: u64,
    pub questions_inserted: u64,
}

/// Insert the standard categories, and the sample questions when the
/// questions table is empty. Safe to run repeatedly.
pub async fn run(pool: &PgPool) -> Result<SeedReport, DbError> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for (id, kind) in CATEGORIES {
        report.categories_inserted += sqlx::query(
            "INSERT INTO categories (id, type) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
        )
        .bind(*id)
        .bind(*kind)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    // Explicit ids leave the serial sequence behind
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories))",
    )
    .execute(&mut *tx)
    .await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
        .fetch_one(&mut *tx)
        .await?;

    if existing == 0 {
        for seed in QUESTIONS {
            sqlx::query(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4)",
            )
            .bind(seed.question)
            .bind(seed.answer)
            .bind(seed.category)
            .bind(seed.difficulty)
            .execute(&mut *tx)
            .await?;
            report.questions_inserted += 1;
        }
    } else {
        tracing::info!(existing, "questions table not empty, skipping sample questions");
    }

    tx.commit().await?;
    tracing::info!(
        categories = report.categories_inserted,
        questions = report.questions_inserted,
        "Seeding complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MAX_DIFFICULTY, MIN_DIFFICULTY};

    #[test]
    fn sample_questions_reference_known_categories() {
        for seed in QUESTIONS {
            assert!(
                CATEGORIES.iter().any(|(id, _)| *id == seed.category),
                "unknown category in {:?}",
                seed
            );
            assert!((MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&seed.difficulty));
        }
    }

    #[test]
    fn every_category_has_questions() {
        for (id, kind) in CATEGORIES {
            assert!(
                QUESTIONS.iter().any(|q| q.category == *id),
                "no sample questions for {kind}"
            );
        }
    }
}
