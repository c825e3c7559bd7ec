//! Print the SQL text liteorm generates for common statements.
//!
//! Run with: cargo run --example sql_preview

use liteorm::{LiteResult, Order, Record, SchemaRegistry, SqlType, TableSchema};

fn main() -> LiteResult<()> {
    let mut registry = SchemaRegistry::new();
    registry.register(
        TableSchema::builder("Person")
            .primary_key("id", SqlType::Integer)
            .column("name", SqlType::Text)
            .column("dob", SqlType::DateTime)
            .column("age", SqlType::Integer)
            .column("married", SqlType::Boolean)
            .column("salary", SqlType::Money)
            .build()?,
    );

    let people = registry.table("Person")?;

    println!("{}", people.create().sql());
    println!(
        "{}",
        people
            .insert(&Record::new().set("id", 1).set("name", "Foo"))?
            .sql()
    );
    println!(
        "{}",
        people
            .insert_many(&[
                Record::new().set("id", 2).set("name", "Bar"),
                Record::new().set("id", 3).set("name", "Meh"),
            ])?
            .sql()
    );
    println!(
        "{}",
        people
            .select(&["name", "salary"])?
            .filter(|c| {
                c.greater_or_equal("age", 18)?
                    .group(|c| c.starts_with("name", "F")?.or().equals("married", true))
            })?
            .order_by(&[("name", Order::Asc)])?
            .limit(10)
            .sql()
    );
    println!(
        "{}",
        people
            .update(&Record::new().set("married", true))?
            .filter(|c| c.equals("id", 1))?
            .sql()
    );
    println!(
        "{}",
        people.delete().filter(|c| c.less_than("age", 18))?.sql()
    );
    println!("{}", people.count().sql());

    Ok(())
}
