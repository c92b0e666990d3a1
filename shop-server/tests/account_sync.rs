//! Staff account lifecycle: credential provisioning, username
//! generation, profile mirroring and password management.

mod common;

use shared::error::ErrorCode;
use shared::models::StaffUpdate;
use shop_server::accounts::{self, password};
use shop_server::db::repository::{credential, staff};
use sqlx::SqlitePool;

fn empty_update() -> StaffUpdate {
    StaffUpdate {
        first_name: None,
        last_name: None,
        email: None,
        phone_number: None,
        address: None,
        zip_code: None,
        state: None,
        birth_date: None,
        hire_date: None,
        role_id: None,
        is_active: None,
    }
}

async fn table_count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}

#[tokio::test]
async fn create_links_credential_and_role() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;

    let mut payload = common::staff_payload("Jane", "Doe", role_id);
    payload.email = Some("jane.doe@shop.test".into());
    let member = accounts::create_staff_with_credential(&db.pool, payload)
        .await
        .unwrap();

    let credential_id = member.credential_id.expect("credential linked");
    let cred = credential::find_by_id(&db.pool, credential_id)
        .await
        .unwrap()
        .expect("credential row");

    assert_eq!(cred.username, "jane.doe");
    assert_eq!(cred.first_name, "Jane");
    assert_eq!(cred.last_name, "Doe");
    assert_eq!(cred.email, "jane.doe@shop.test");
    assert!(cred.is_active);

    let groups = credential::group_role_ids(&db.pool, credential_id)
        .await
        .unwrap();
    assert_eq!(groups, vec![role_id]);
}

#[tokio::test]
async fn username_collisions_get_numeric_suffixes() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;

    let mut usernames = Vec::new();
    for _ in 0..3 {
        let member =
            accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
                .await
                .unwrap();
        let cred = credential::find_by_id(&db.pool, member.credential_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        usernames.push(cred.username);
    }

    assert_eq!(usernames, vec!["jane.doe", "jane.doe2", "jane.doe3"]);
}

#[tokio::test]
async fn username_strips_non_alphanumerics() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;

    let member = accounts::create_staff_with_credential(
        &db.pool,
        common::staff_payload("Mary Ann", "O'Brien", role_id),
    )
    .await
    .unwrap();

    let cred = credential::find_by_id(&db.pool, member.credential_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cred.username, "maryann.obrien");
}

#[tokio::test]
async fn rejected_password_leaves_no_rows() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;

    let mut payload = common::staff_payload("Jane", "Doe", role_id);
    payload.password = "short".into();
    let err = accounts::create_staff_with_credential(&db.pool, payload)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::PasswordTooShort);
    assert_eq!(table_count(&db.pool, "staff").await, 0);
    assert_eq!(table_count(&db.pool, "credential").await, 0);
}

#[tokio::test]
async fn unknown_role_rolls_back() {
    let db = common::setup().await;

    let err = accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", 9999))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::RoleGroupRequired);
    assert_eq!(table_count(&db.pool, "staff").await, 0);
    assert_eq!(table_count(&db.pool, "credential").await, 0);
}

#[tokio::test]
async fn invalid_email_rejected() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;

    let mut payload = common::staff_payload("Jane", "Doe", role_id);
    payload.email = Some("not-an-email".into());
    let err = accounts::create_staff_with_credential(&db.pool, payload)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn sync_is_idempotent() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let member =
        accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
            .await
            .unwrap();

    let first = accounts::sync_staff_credential(&db.pool, member.id)
        .await
        .unwrap()
        .expect("credential present");
    let second = accounts::sync_staff_credential(&db.pool, member.id)
        .await
        .unwrap()
        .expect("credential present");

    assert_eq!(first.username, "jane.doe");
    assert_eq!(second.username, "jane.doe");
    assert_eq!(table_count(&db.pool, "credential_group").await, 1);
}

#[tokio::test]
async fn sync_keeps_settled_suffix() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
        .await
        .unwrap();
    let second =
        accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
            .await
            .unwrap();

    // The suffix still encodes the current names, so it must survive a re-sync.
    let cred = accounts::sync_staff_credential(&db.pool, second.id)
        .await
        .unwrap()
        .expect("credential present");
    assert_eq!(cred.username, "jane.doe2");
}

#[tokio::test]
async fn rename_regenerates_username_and_mirrors_email() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let member =
        accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
            .await
            .unwrap();

    let mut update = empty_update();
    update.first_name = Some("Janet".into());
    update.email = Some("janet.doe@shop.test".into());
    let updated = accounts::update_staff(&db.pool, member.id, update)
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Janet");

    let cred = credential::find_by_id(&db.pool, member.credential_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cred.username, "janet.doe");
    assert_eq!(cred.first_name, "Janet");
    assert_eq!(cred.email, "janet.doe@shop.test");
}

#[tokio::test]
async fn role_change_replaces_membership() {
    let db = common::setup().await;
    let employee = common::seed_role(&db.pool, "employee").await;
    let manager = common::seed_role(&db.pool, "manager").await;
    let member =
        accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", employee))
            .await
            .unwrap();

    let mut update = empty_update();
    update.role_id = Some(manager);
    accounts::update_staff(&db.pool, member.id, update)
        .await
        .unwrap();

    let groups = credential::group_role_ids(&db.pool, member.credential_id.unwrap())
        .await
        .unwrap();
    assert_eq!(groups, vec![manager]);
}

#[tokio::test]
async fn sync_without_credential_is_noop() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;

    // Legacy staff rows can exist without a login credential.
    let staff_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO staff (first_name, last_name, role_id, created_at, updated_at) VALUES ('No', 'Login', ?, 0, 0) RETURNING id",
    )
    .bind(role_id)
    .fetch_one(&db.pool)
    .await
    .unwrap();

    let synced = accounts::sync_staff_credential(&db.pool, staff_id)
        .await
        .unwrap();
    assert!(synced.is_none());
    assert_eq!(table_count(&db.pool, "credential").await, 0);

    let member = staff::find_by_id(&db.pool, staff_id).await.unwrap().unwrap();
    assert!(member.credential_id.is_none());
}

#[tokio::test]
async fn set_password_requires_credential() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let staff_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO staff (first_name, last_name, role_id, created_at, updated_at) VALUES ('No', 'Login', ?, 0, 0) RETURNING id",
    )
    .bind(role_id)
    .fetch_one(&db.pool)
    .await
    .unwrap();

    let err = accounts::set_staff_password(&db.pool, staff_id, "longenough123")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CredentialMissing);
}

#[tokio::test]
async fn set_password_rotates_hash() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let member =
        accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
            .await
            .unwrap();

    accounts::set_staff_password(&db.pool, member.id, "mynewsecret1")
        .await
        .unwrap();

    let auth = credential::find_auth_by_username(&db.pool, "jane.doe")
        .await
        .unwrap()
        .expect("auth row");
    assert!(password::verify_password(&auth.password_hash, "mynewsecret1"));
    assert!(!password::verify_password(&auth.password_hash, "opensesame99"));
}

#[tokio::test]
async fn set_password_rejects_short() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let member =
        accounts::create_staff_with_credential(&db.pool, common::staff_payload("Jane", "Doe", role_id))
            .await
            .unwrap();

    let err = accounts::set_staff_password(&db.pool, member.id, "short")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PasswordTooShort);
}
