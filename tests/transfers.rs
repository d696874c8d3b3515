//! Integration tests for the transfer service core.
//!
//! Each test runs against its own freshly migrated database provided by
//! `#[sqlx::test]`. Requires a PostgreSQL server reachable via DATABASE_URL.

use sqlx::PgPool;

use transfer_service::{
    error::AppError,
    models::account::Account,
    services::transfer_service::{
        execute_deposit, execute_transfer, get_transfer_by_id, list_transfers_for_account,
    },
};

async fn create_account(pool: &PgPool, name: &str, balance: i64) -> Account {
    sqlx::query_as(
        r#"
        INSERT INTO accounts (name, balance)
        VALUES ($1, $2)
        RETURNING id, name, balance, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(balance)
    .fetch_one(pool)
    .await
    .expect("account insert failed")
}

async fn balance_of(pool: &PgPool, account_id: i64) -> i64 {
    sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .expect("balance query failed")
}

async fn ledger_len(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

#[sqlx::test(migrations = "./migrations")]
async fn transfer_moves_funds_and_conserves_total(pool: PgPool) {
    let alice = create_account(&pool, "alice", 100).await;
    let bob = create_account(&pool, "bob", 50).await;

    let outcome = execute_transfer(&pool, alice.id, bob.id, 30)
        .await
        .expect("transfer should succeed");

    // Both updated accounts are returned
    assert_eq!(outcome.source.id, alice.id);
    assert_eq!(outcome.source.balance, 70);
    assert_eq!(outcome.destination.id, bob.id);
    assert_eq!(outcome.destination.balance, 80);

    // Conservation: the total is unchanged
    assert_eq!(
        outcome.source.balance + outcome.destination.balance,
        100 + 50
    );

    // The committed rows agree with what was returned
    assert_eq!(balance_of(&pool, alice.id).await, 70);
    assert_eq!(balance_of(&pool, bob.id).await, 80);

    // The ledger entry was written in the same transaction
    assert_eq!(outcome.record.kind, "transfer");
    assert_eq!(outcome.record.source_account_id, Some(alice.id));
    assert_eq!(outcome.record.dest_account_id, bob.id);
    assert_eq!(outcome.record.amount, 30);
}

#[sqlx::test(migrations = "./migrations")]
async fn self_transfer_is_rejected_and_balance_unchanged(pool: PgPool) {
    let alice = create_account(&pool, "alice", 100).await;

    let err = execute_transfer(&pool, alice.id, alice.id, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidOperation(_)));
    assert_eq!(balance_of(&pool, alice.id).await, 100);
    assert_eq!(ledger_len(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn insufficient_funds_leaves_both_balances_unchanged(pool: PgPool) {
    let alice = create_account(&pool, "alice", 10).await;
    let bob = create_account(&pool, "bob", 0).await;

    let err = execute_transfer(&pool, alice.id, bob.id, 50)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InsufficientFunds));
    assert_eq!(balance_of(&pool, alice.id).await, 10);
    assert_eq!(balance_of(&pool, bob.id).await, 0);
    assert_eq!(ledger_len(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_source_reports_its_id(pool: PgPool) {
    let bob = create_account(&pool, "bob", 50).await;

    let err = execute_transfer(&pool, 999, bob.id, 10).await.unwrap_err();

    assert!(matches!(err, AppError::AccountNotFound(999)));
    assert_eq!(balance_of(&pool, bob.id).await, 50);
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_destination_reports_its_id(pool: PgPool) {
    let alice = create_account(&pool, "alice", 100).await;

    let err = execute_transfer(&pool, alice.id, 999, 10).await.unwrap_err();

    assert!(matches!(err, AppError::AccountNotFound(999)));
    assert_eq!(balance_of(&pool, alice.id).await, 100);
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_transfers_never_overdraw(pool: PgPool) {
    let alice = create_account(&pool, "alice", 100).await;
    let bob = create_account(&pool, "bob", 0).await;
    let carol = create_account(&pool, "carol", 0).await;

    // Two transfers of 60 racing for a balance of 100. Exactly one may win.
    let p1 = pool.clone();
    let p2 = pool.clone();
    let (a, b, c) = (alice.id, bob.id, carol.id);

    let t1 = tokio::spawn(async move { execute_transfer(&p1, a, b, 60).await });
    let t2 = tokio::spawn(async move { execute_transfer(&p2, a, c, 60).await });

    let r1 = t1.await.expect("task panicked");
    let r2 = t2.await.expect("task panicked");

    let successes = [r1.is_ok(), r2.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one of the two transfers must commit");

    let failure = if r1.is_err() { r1 } else { r2 };
    assert!(matches!(failure.unwrap_err(), AppError::InsufficientFunds));

    // 100 - 60, never negative, never double-charged
    assert_eq!(balance_of(&pool, alice.id).await, 40);
    assert_eq!(
        balance_of(&pool, bob.id).await + balance_of(&pool, carol.id).await,
        60
    );
    assert_eq!(ledger_len(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_destination_write_rolls_back_source_decrement(pool: PgPool) {
    let alice = create_account(&pool, "alice", 100).await;
    // Crediting this account overflows BIGINT, so the destination update
    // fails inside the transaction after the source has been decremented.
    let vault = create_account(&pool, "vault", i64::MAX).await;

    let err = execute_transfer(&pool, alice.id, vault.id, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Storage(_)));

    // Full rollback: the source decrement never became visible
    assert_eq!(balance_of(&pool, alice.id).await, 100);
    assert_eq!(balance_of(&pool, vault.id).await, i64::MAX);
    assert_eq!(ledger_len(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn opposing_transfers_on_the_same_pair_both_complete(pool: PgPool) {
    let alice = create_account(&pool, "alice", 100).await;
    let bob = create_account(&pool, "bob", 100).await;

    // Opposite directions between the same pair. Fixed ascending-id lock
    // order means neither can deadlock the other.
    let p1 = pool.clone();
    let p2 = pool.clone();
    let (a, b) = (alice.id, bob.id);

    let t1 = tokio::spawn(async move { execute_transfer(&p1, a, b, 25).await });
    let t2 = tokio::spawn(async move { execute_transfer(&p2, b, a, 40).await });

    t1.await.expect("task panicked").expect("a -> b should succeed");
    t2.await.expect("task panicked").expect("b -> a should succeed");

    assert_eq!(balance_of(&pool, alice.id).await, 100 - 25 + 40);
    assert_eq!(balance_of(&pool, bob.id).await, 100 + 25 - 40);
}

#[sqlx::test(migrations = "./migrations")]
async fn deposit_credits_account_and_writes_ledger(pool: PgPool) {
    let alice = create_account(&pool, "alice", 5).await;

    let outcome = execute_deposit(&pool, alice.id, 95)
        .await
        .expect("deposit should succeed");

    assert_eq!(outcome.account.balance, 100);
    assert_eq!(outcome.record.kind, "deposit");
    assert_eq!(outcome.record.source_account_id, None);
    assert_eq!(outcome.record.dest_account_id, alice.id);

    let fetched = get_transfer_by_id(&pool, outcome.record.id)
        .await
        .expect("lookup should succeed")
        .expect("ledger entry should exist");
    assert_eq!(fetched.amount, 95);

    let history = list_transfers_for_account(&pool, alice.id)
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn deposit_rejects_non_positive_amount_and_missing_account(pool: PgPool) {
    let alice = create_account(&pool, "alice", 5).await;

    let err = execute_deposit(&pool, alice.id, 0).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidOperation(_)));

    let err = execute_deposit(&pool, 999, 10).await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(999)));

    assert_eq!(balance_of(&pool, alice.id).await, 5);
}
