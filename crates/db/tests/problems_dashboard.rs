//! Integration tests for the problem repository and the dashboard counters.
//!
//! Exercises the full repository layer against a real database:
//! - Title search (case-insensitive, newest first, literal wildcards)
//! - Status transitions reported with their previous status
//! - Delta bookkeeping and resync against the stored rows

use prepvault_core::dashboard::CounterDelta;
use prepvault_core::problem::ProblemStatus;
use prepvault_db::models::problem::NewProblem;
use prepvault_db::models::user::CreateUser;
use prepvault_db::repositories::{DashboardRepo, ProblemRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        name: None,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn new_problem(title: &str, status: ProblemStatus) -> NewProblem {
    NewProblem {
        title: title.to_string(),
        link: format!("https://leetcode.com/problems/{}", title.to_lowercase().replace(' ', "-")),
        topic: "Array".to_string(),
        subtopics: vec!["Two Pointers".to_string()],
        difficulty: "Easy".to_string(),
        platform: "LeetCode".to_string(),
        status: status.as_str().to_string(),
        note: String::new(),
        tags: vec![],
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_and_newest_first(pool: PgPool) {
    let user = new_user(&pool, "search@test.com").await;
    let two = ProblemRepo::create(&pool, user, &new_problem("Two Sum", ProblemStatus::Unsolved))
        .await
        .unwrap();
    let three = ProblemRepo::create(&pool, user, &new_problem("3Sum", ProblemStatus::Unsolved))
        .await
        .unwrap();
    ProblemRepo::create(&pool, user, &new_problem("Jump Game", ProblemStatus::Unsolved))
        .await
        .unwrap();

    let found = ProblemRepo::search_for_user(&pool, user, Some("sum")).await.unwrap();
    let ids: Vec<i64> = found.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![three.id, two.id]);

    let none = ProblemRepo::search_for_user(&pool, user, Some("zzz")).await.unwrap();
    assert!(none.is_empty());

    let all = ProblemRepo::search_for_user(&pool, user, None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_treats_wildcards_literally_and_scopes_by_owner(pool: PgPool) {
    let alice = new_user(&pool, "alice@test.com").await;
    let bob = new_user(&pool, "bob@test.com").await;
    ProblemRepo::create(&pool, alice, &new_problem("Sum 100%", ProblemStatus::Unsolved))
        .await
        .unwrap();
    ProblemRepo::create(&pool, alice, &new_problem("Sum 1000", ProblemStatus::Unsolved))
        .await
        .unwrap();
    ProblemRepo::create(&pool, bob, &new_problem("Two Sum", ProblemStatus::Unsolved))
        .await
        .unwrap();

    let found = ProblemRepo::search_for_user(&pool, alice, Some("0%")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Sum 100%");

    let bobs = ProblemRepo::search_for_user(&pool, bob, Some("sum")).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].user_id, bob);
}

// ---------------------------------------------------------------------------
// Updates and deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_reports_previous_status(pool: PgPool) {
    let user = new_user(&pool, "update@test.com").await;
    let p = ProblemRepo::create(&pool, user, &new_problem("Two Sum", ProblemStatus::Unsolved))
        .await
        .unwrap();

    let out = ProblemRepo::update_note_status(&pool, p.id, Some("hash map"), Some("Solved"))
        .await
        .unwrap()
        .expect("problem exists");
    assert_eq!(out.previous_status, "Unsolved");
    assert_eq!(out.problem.status, "Solved");
    assert_eq!(out.problem.note, "hash map");

    // Note-only update keeps the status.
    let out = ProblemRepo::update_note_status(&pool, p.id, Some("revisit"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.previous_status, "Solved");
    assert_eq!(out.problem.status, "Solved");

    assert!(ProblemRepo::update_note_status(&pool, 999_999, None, Some("Solved"))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_final_status(pool: PgPool) {
    let user = new_user(&pool, "delete@test.com").await;
    let p = ProblemRepo::create(&pool, user, &new_problem("Two Sum", ProblemStatus::Solved))
        .await
        .unwrap();

    assert_eq!(ProblemRepo::delete(&pool, p.id).await.unwrap().as_deref(), Some("Solved"));
    assert_eq!(ProblemRepo::delete(&pool, p.id).await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Dashboard counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn counters_row_is_created_lazily(pool: PgPool) {
    let user = new_user(&pool, "lazy@test.com").await;
    assert!(DashboardRepo::find_by_user(&pool, user).await.unwrap().is_none());

    let row = DashboardRepo::apply_delta(
        &pool,
        user,
        &CounterDelta::problem_created(ProblemStatus::Solved),
    )
    .await
    .unwrap();
    assert_eq!(
        (row.total_problems, row.revised_this_week, row.remaining_to_revise),
        (1, 1, 0)
    );
    assert!(DashboardRepo::find_by_user(&pool, user).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deltas_clamp_at_zero(pool: PgPool) {
    let user = new_user(&pool, "clamp@test.com").await;
    let row = DashboardRepo::apply_delta(
        &pool,
        user,
        &CounterDelta::problem_deleted(ProblemStatus::Unsolved),
    )
    .await
    .unwrap();
    assert_eq!(row.total_problems, 0);
    assert_eq!(row.remaining_to_revise, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resync_overwrites_from_rows_and_is_idempotent(pool: PgPool) {
    let user = new_user(&pool, "resync@test.com").await;
    ProblemRepo::create(&pool, user, &new_problem("Two Sum", ProblemStatus::Solved))
        .await
        .unwrap();
    ProblemRepo::create(&pool, user, &new_problem("3Sum", ProblemStatus::NeedsReview))
        .await
        .unwrap();
    ProblemRepo::create(&pool, user, &new_problem("4Sum", ProblemStatus::Unsolved))
        .await
        .unwrap();

    // Drift the stored counters away from reality.
    for _ in 0..5 {
        DashboardRepo::apply_delta(&pool, user, &CounterDelta::problem_created(ProblemStatus::Solved))
            .await
            .unwrap();
    }

    let first = DashboardRepo::resync(&pool, user).await.unwrap();
    assert_eq!(first.counters().total_problems, 3);
    assert_eq!(first.counters().revised_this_week, 1);
    assert_eq!(first.counters().remaining_to_revise, 2);
    assert_eq!(first.counters().total_topics, 0);

    let second = DashboardRepo::resync(&pool, user).await.unwrap();
    assert_eq!(first.counters(), second.counters());
}
