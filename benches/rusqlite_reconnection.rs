use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use todolist::database_init;
use todolist::database_init::Database;
use todolist::item_collection;
use todolist::item_collection::Page;
use todolist::todo_item::TodoItem;

/// What every list request does: open a fresh connection,
/// read the whole table and close the connection again.
fn list_with_fresh_connection(db: &Database) {
    let conn = db.connect().unwrap();
    let items = item_collection::list_items(&conn, Page::default()).unwrap();
    assert_eq!(items.len(), 100);
}

fn criterion_benchmark(c: &mut Criterion) {
    let db_address = "target/criterion/todolist-deleteme.sqlite";
    let _ = std::fs::remove_file(db_address);
    let db = database_init::initialize(db_address).unwrap();
    let conn = db.connect().unwrap();
    for i in 0..100 {
        TodoItem::create(format!("item {}", i), &conn);
    }
    conn.close().unwrap();

    c.bench_function("listing 100 items on a reopened SQLite connection", |b| {
        b.iter(|| list_with_fresh_connection(&db))
    });

    std::fs::remove_file(db_address).unwrap();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
