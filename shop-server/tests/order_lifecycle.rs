//! Order lifecycle: total recomputation, completion checks and the
//! concurrent-completion race.

mod common;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{BookStatus, OrderCreate, OrderStatus, OrderUpdate, PaymentMethod};
use shop_server::accounts;
use shop_server::db::repository::{book, order, report};
use shop_server::orders::{self, OrderError};

async fn setup_sale() -> (common::TestDb, i64, i64) {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let member = accounts::create_staff_with_credential(
        &db.pool,
        common::staff_payload("Sam", "Seller", role_id),
    )
    .await
    .unwrap();
    let customer_id = common::seed_customer(&db.pool).await;
    (db, customer_id, member.id)
}

fn order_payload(customer_id: i64, staff_id: i64, book_ids: Vec<i64>) -> OrderCreate {
    OrderCreate {
        customer_id,
        staff_id,
        payment_method: PaymentMethod::Cash,
        book_ids,
    }
}

fn books_only(book_ids: Vec<i64>) -> OrderUpdate {
    OrderUpdate {
        customer_id: None,
        staff_id: None,
        payment_method: None,
        book_ids: Some(book_ids),
    }
}

#[tokio::test]
async fn create_computes_total() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let b2 = common::seed_book(&db.pool, "Emma", 15.50).await;

    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b2]))
        .await
        .unwrap();
    assert_eq!(created.status, OrderStatus::Open);
    assert_eq!(created.total_amount, 25.5);

    let total = orders::recompute_order_total(&db.pool, created.id)
        .await
        .unwrap();
    assert_eq!(total, Decimal::new(2550, 2));
}

#[tokio::test]
async fn update_replaces_books_and_recomputes() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let b2 = common::seed_book(&db.pool, "Emma", 15.50).await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b2]))
        .await
        .unwrap();

    let updated = orders::update_order(&db.pool, created.id, books_only(vec![b2]))
        .await
        .unwrap();
    assert_eq!(updated.total_amount, 15.5);

    let emptied = orders::update_order(&db.pool, created.id, books_only(vec![]))
        .await
        .unwrap();
    assert_eq!(emptied.total_amount, 0.0);
}

#[tokio::test]
async fn empty_order_totals_zero() {
    let (db, customer_id, staff_id) = setup_sale().await;

    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![]))
        .await
        .unwrap();
    assert_eq!(created.total_amount, 0.0);

    let total = orders::recompute_order_total(&db.pool, created.id)
        .await
        .unwrap();
    assert_eq!(total, Decimal::ZERO);
}

#[tokio::test]
async fn total_rounds_once_after_summing() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Pamphlet A", 0.335).await;
    let b2 = common::seed_book(&db.pool, "Pamphlet B", 0.335).await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b2]))
        .await
        .unwrap();

    // Rounding each price first would give 0.34 + 0.34 = 0.68.
    let total = orders::recompute_order_total(&db.pool, created.id)
        .await
        .unwrap();
    assert_eq!(total, Decimal::new(67, 2));
}

#[tokio::test]
async fn complete_rejects_empty_order() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![]))
        .await
        .unwrap();

    let err = orders::complete_order(&db.pool, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Empty(_)));
}

#[tokio::test]
async fn complete_names_unavailable_book() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let b2 = common::seed_book(&db.pool, "Emma", 15.50).await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b2]))
        .await
        .unwrap();

    // Sold out from under the order before completion.
    book::mark_sold(&db.pool, b1, 0).await.unwrap();

    let err = orders::complete_order(&db.pool, created.id)
        .await
        .unwrap_err();
    match err {
        OrderError::BookUnavailable { book_id, title } => {
            assert_eq!(book_id, b1);
            assert_eq!(title, "Dune");
        }
        other => panic!("expected BookUnavailable, got {other:?}"),
    }

    let reread = order::find_by_id(&db.pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.status, OrderStatus::Open);
    assert!(reread.completed_at.is_none());
}

#[tokio::test]
async fn completion_marks_books_sold_and_freezes_total() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let b2 = common::seed_book(&db.pool, "Emma", 15.50).await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b2]))
        .await
        .unwrap();

    let completed = orders::complete_order(&db.pool, created.id).await.unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.total_amount, 25.5);

    for id in [b1, b2] {
        let sold = book::find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(sold.status, BookStatus::Sold);
    }

    // The recorded sale total is history now.
    let err = orders::recompute_order_total(&db.pool, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyCompleted(_)));
}

#[tokio::test]
async fn second_complete_reports_already_completed() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1]))
        .await
        .unwrap();
    orders::complete_order(&db.pool, created.id).await.unwrap();

    // The order's books are sold by now, but the state check comes first.
    let err = orders::complete_order(&db.pool, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyCompleted(_)));
}

#[tokio::test]
async fn update_rejected_after_completion() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let created = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1]))
        .await
        .unwrap();
    orders::complete_order(&db.pool, created.id).await.unwrap();

    let err = orders::update_order(&db.pool, created.id, books_only(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyCompleted(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_completions_single_winner() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let shared = common::seed_book(&db.pool, "Contested", 20.00).await;
    let extra = common::seed_book(&db.pool, "Bystander", 5.00).await;

    let order_a = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![shared]))
        .await
        .unwrap();
    let order_b = orders::create_order(
        &db.pool,
        order_payload(customer_id, staff_id, vec![shared, extra]),
    )
    .await
    .unwrap();

    let pool_a = db.pool.clone();
    let pool_b = db.pool.clone();
    let task_a = tokio::spawn(async move { orders::complete_order(&pool_a, order_a.id).await });
    let task_b = tokio::spawn(async move { orders::complete_order(&pool_b, order_b.id).await });
    let result_a = task_a.await.unwrap();
    let result_b = task_b.await.unwrap();

    let winners = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one completion may win the shared book");

    let loser = if result_a.is_err() { result_a } else { result_b };
    match loser.unwrap_err() {
        OrderError::BookUnavailable { book_id, .. } => assert_eq!(book_id, shared),
        other => panic!("expected BookUnavailable, got {other:?}"),
    }

    let contested = book::find_by_id(&db.pool, shared).await.unwrap().unwrap();
    assert_eq!(contested.status, BookStatus::Sold);
}

#[tokio::test]
async fn duplicate_book_rejected() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;

    let err = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b1]))
        .await
        .unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::DuplicateOrderBook);
}

#[tokio::test]
async fn unknown_customer_rejected() {
    let (db, _, staff_id) = setup_sale().await;

    let err = orders::create_order(&db.pool, order_payload(9999, staff_id, vec![]))
        .await
        .unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn sales_report_counts_completed_only() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let b2 = common::seed_book(&db.pool, "Emma", 15.50).await;
    let b3 = common::seed_book(&db.pool, "Ulysses", 8.00).await;

    let sale = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1, b2]))
        .await
        .unwrap();
    orders::complete_order(&db.pool, sale.id).await.unwrap();
    orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b3]))
        .await
        .unwrap();

    let totals = report::staff_sales_totals(&db.pool, staff_id, None, None)
        .await
        .unwrap();
    assert_eq!(totals.orders_completed, 1);
    assert_eq!(totals.books_sold, 2);
    assert_eq!(totals.revenue, 25.5);
}

#[tokio::test]
async fn delete_refuses_completed() {
    let (db, customer_id, staff_id) = setup_sale().await;
    let b1 = common::seed_book(&db.pool, "Dune", 10.00).await;
    let sale = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![b1]))
        .await
        .unwrap();
    orders::complete_order(&db.pool, sale.id).await.unwrap();

    let err = order::delete(&db.pool, sale.id).await.unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::OrderAlreadyCompleted);

    let open = orders::create_order(&db.pool, order_payload(customer_id, staff_id, vec![]))
        .await
        .unwrap();
    assert!(order::delete(&db.pool, open.id).await.unwrap());
    assert!(order::find_by_id(&db.pool, open.id).await.unwrap().is_none());
}
