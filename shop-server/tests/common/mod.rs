//! Shared fixtures for integration tests
//!
//! Each test gets its own on-disk SQLite database so write-lock
//! behavior matches production.

#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;

use shared::models::{BookCreate, CustomerCreate, RoleCreate, StaffCreate};
use shop_server::db::DbService;
use shop_server::db::repository::{book, customer, role};

/// Fresh database; the tempdir lives as long as this handle
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("shop.db");
    let db = DbService::new(&path.to_string_lossy())
        .await
        .expect("open test database");
    TestDb {
        pool: db.pool,
        _dir: dir,
    }
}

pub async fn seed_role(pool: &SqlitePool, name: &str) -> i64 {
    role::create(
        pool,
        RoleCreate {
            name: name.into(),
            description: None,
            permissions: vec!["orders:complete".into()],
        },
    )
    .await
    .expect("seed role")
    .id
}

pub fn staff_payload(first: &str, last: &str, role_id: i64) -> StaffCreate {
    StaffCreate {
        first_name: first.into(),
        last_name: last.into(),
        email: None,
        phone_number: None,
        address: None,
        zip_code: None,
        state: None,
        birth_date: None,
        hire_date: None,
        role_id,
        password: "opensesame99".into(),
    }
}

pub async fn seed_customer(pool: &SqlitePool) -> i64 {
    customer::create(
        pool,
        CustomerCreate {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            phone_number: None,
            mailing_address: None,
        },
    )
    .await
    .expect("seed customer")
    .id
}

pub async fn seed_book(pool: &SqlitePool, title: &str, retail_price: f64) -> i64 {
    book::create(
        pool,
        BookCreate {
            legacy_id: None,
            title: title.into(),
            cost: 0.0,
            retail_price,
            rating: Default::default(),
            status: Default::default(),
            publication_date: None,
            publisher: None,
            edition: None,
            author_ids: vec![],
        },
    )
    .await
    .expect("seed book")
    .id
}
