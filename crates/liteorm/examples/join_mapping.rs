//! Build a joined statement and reconstruct a nested result from a flat row.
//!
//! The decode/project path is pure, so this example walks it without a
//! database: the flat row below stands in for what a driver would return.
//!
//! Run with: cargo run --example join_mapping

use liteorm::{
    AliasMap, LiteResult, Projection, Row, SchemaRegistry, SqlType, TableSchema,
    decode_row_aliased, project,
};

fn main() -> LiteResult<()> {
    let mut registry = SchemaRegistry::new();
    registry.register(
        TableSchema::builder("Person")
            .primary_key("id", SqlType::Integer)
            .column("name", SqlType::Text)
            .column("married", SqlType::Boolean)
            .build()?,
    );
    registry.register(
        TableSchema::builder("Address")
            .primary_key("id", SqlType::Integer)
            .column("address", SqlType::Text)
            .build()?,
    );
    registry.register(
        TableSchema::builder("Role")
            .primary_key("id", SqlType::Integer)
            .column("role", SqlType::Text)
            .build()?,
    );

    let template = Projection::new()
        .field("id", "self.id")
        .field("married", "self.married")
        .nest(
            "attr",
            Projection::new()
                .field("address", "addr.address")
                .field("role", "role.role"),
        );

    let select = registry
        .table("Person")?
        .join(&registry)
        .with("addr", "Address")?
        .with("role", "Role")?
        .on(("self", "id"), ("role", "id"))?
        .on(("self", "id"), ("addr", "id"))?
        .map(template.clone())?;

    println!("SQL: {}", select.sql());

    // what the driver would hand back for one row
    let flat = Row::new()
        .with("self___id", 1)
        .with("self___married", 1)
        .with("addr___address", "12 Main St")
        .with("role___role", "Admin");

    // decode + project by hand, the same path fetch_all takes per row
    let mut aliases = AliasMap::new();
    aliases.bind("self", registry.get("Person")?)?;
    aliases.bind("addr", registry.get("Address")?)?;
    aliases.bind("role", registry.get("Role")?)?;

    let decoded = decode_row_aliased(flat, &aliases)?;
    let mapped = project(&template, &decoded);

    println!("Mapped: {}", mapped.into_json());

    Ok(())
}
