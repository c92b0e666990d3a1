//! Completion stress test: many orders racing over a small pool of
//! books. However the completions interleave, a book may be sold
//! through at most one order.

mod common;

use rand::Rng;
use rand::seq::SliceRandom;
use shop_server::accounts;
use shop_server::db::repository::order;
use shop_server::orders::{self, OrderError};
use sqlx::SqlitePool;

const BOOK_COUNT: usize = 12;
const ORDER_COUNT: usize = 30;

async fn count(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(pool)
        .await
        .expect("count query")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_completions_never_double_sell() {
    let db = common::setup().await;
    let role_id = common::seed_role(&db.pool, "employee").await;
    let member = accounts::create_staff_with_credential(
        &db.pool,
        common::staff_payload("Sam", "Seller", role_id),
    )
    .await
    .unwrap();
    let customer_id = common::seed_customer(&db.pool).await;

    let mut books = Vec::with_capacity(BOOK_COUNT);
    for i in 0..BOOK_COUNT {
        let price = 5.0 + i as f64;
        books.push(common::seed_book(&db.pool, &format!("Stock {i}"), price).await);
    }

    // Orders draw 1-3 distinct books each, so most share a book with
    // several others.
    let mut rng = rand::thread_rng();
    let mut order_ids = Vec::with_capacity(ORDER_COUNT);
    for _ in 0..ORDER_COUNT {
        let amount = rng.gen_range(1..=3);
        let picks: Vec<i64> = books.choose_multiple(&mut rng, amount).copied().collect();
        let created = orders::create_order(
            &db.pool,
            shared::models::OrderCreate {
                customer_id,
                staff_id: member.id,
                payment_method: shared::models::PaymentMethod::Cash,
                book_ids: picks,
            },
        )
        .await
        .unwrap();
        order_ids.push(created.id);
    }

    let mut tasks = Vec::with_capacity(ORDER_COUNT);
    for order_id in order_ids {
        let pool = db.pool.clone();
        tasks.push(tokio::spawn(async move {
            orders::complete_order(&pool, order_id).await
        }));
    }

    let mut completed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => completed += 1,
            Err(OrderError::BookUnavailable { .. }) => {}
            Err(other) => panic!("unexpected completion error: {other:?}"),
        }
    }
    println!("completed {completed}/{ORDER_COUNT} orders over {BOOK_COUNT} books");
    assert!(completed >= 1, "at least one completion must win");

    // No book may appear in more than one completed order.
    let double_sold = count(
        &db.pool,
        "SELECT COUNT(*) FROM (SELECT ob.book_id FROM order_book ob INNER JOIN shop_order o ON o.id = ob.order_id WHERE o.status = 'completed' GROUP BY ob.book_id HAVING COUNT(*) > 1)",
    )
    .await;
    assert_eq!(double_sold, 0, "a book was sold through two orders");

    // Every book on a completed order is marked sold.
    let unsold = count(
        &db.pool,
        "SELECT COUNT(*) FROM order_book ob INNER JOIN shop_order o ON o.id = ob.order_id INNER JOIN book b ON b.id = ob.book_id WHERE o.status = 'completed' AND b.status != 'sold'",
    )
    .await;
    assert_eq!(unsold, 0, "completed order holds an unsold book");

    let completed_rows = count(
        &db.pool,
        "SELECT COUNT(*) FROM shop_order WHERE status = 'completed'",
    )
    .await;
    assert_eq!(completed_rows as usize, completed);

    // Losers stay open and keep no completion timestamp.
    for row in sqlx::query_as::<_, (i64,)>("SELECT id FROM shop_order WHERE status = 'open'")
        .fetch_all(&db.pool)
        .await
        .unwrap()
    {
        let open = order::find_by_id(&db.pool, row.0).await.unwrap().unwrap();
        assert!(open.completed_at.is_none());
    }
}
