use dashboard::adapters::accounts_sea::{self, AccountCreate};
use dashboard::entities::accounts::AccountRole;
use test_support::{unique_auth_id, unique_email};

use crate::support::db::memory_db;

#[tokio::test]
async fn test_create_then_find_by_auth_id_and_id() {
    let conn = memory_db().await;
    let auth_id = unique_auth_id();
    let email = unique_email("acct");

    let created = accounts_sea::create_account(
        &conn,
        AccountCreate::new(auth_id.clone(), email.clone()).with_username("Hatchling"),
    )
    .await
    .unwrap();

    assert_eq!(created.auth_id, auth_id);
    assert_eq!(created.email, email);
    assert_eq!(created.username.as_deref(), Some("Hatchling"));
    assert_eq!(created.role, AccountRole::Player);
    assert!(created.last_login_at.is_none());

    let by_auth = accounts_sea::find_by_auth_id(&conn, &auth_id).await.unwrap();
    assert_eq!(by_auth.map(|a| a.id), Some(created.id));

    let by_id = accounts_sea::find_by_id(&conn, created.id).await.unwrap();
    assert_eq!(by_id.map(|a| a.auth_id), Some(auth_id));
}

#[tokio::test]
async fn test_admin_role_round_trips() {
    let conn = memory_db().await;
    let auth_id = unique_auth_id();

    accounts_sea::create_account(
        &conn,
        AccountCreate::new(auth_id.clone(), "").with_role(AccountRole::Admin),
    )
    .await
    .unwrap();

    let found = accounts_sea::find_by_auth_id(&conn, &auth_id)
        .await
        .unwrap()
        .expect("account");
    assert_eq!(found.role, AccountRole::Admin);
}

#[tokio::test]
async fn test_delete_by_auth_id_reports_rows() {
    let conn = memory_db().await;
    let auth_id = unique_auth_id();
    accounts_sea::create_account(&conn, AccountCreate::new(auth_id.clone(), ""))
        .await
        .unwrap();

    assert_eq!(accounts_sea::delete_by_auth_id(&conn, &auth_id).await.unwrap(), 1);
    assert_eq!(accounts_sea::delete_by_auth_id(&conn, &auth_id).await.unwrap(), 0);
    assert!(accounts_sea::find_by_auth_id(&conn, &auth_id)
        .await
        .unwrap()
        .is_none());
}
