//! Example: Rendering Oracle actions offline
//!
//! This example demonstrates how to turn vendor-neutral statements into the
//! SQL an Oracle database would receive, without a live connection.
//!
//! Run with: cargo run --example oracle_actions -p oxide-actions

use std::sync::Arc;

use oxide_actions::prelude::*;
use tracing::Level;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let settings = DialectSettings::from_json(r#"{ "probe_timeout_ms": 5000 }"#)?;
    let dialect = OracleDialect::with_settings(settings);
    dialect.set_connection(
        OfflineConnection::new("offline:oracle?version=19")
            .user("APP")
            .catalog("APP")
            .into(),
    )?;
    let env = ExecutionEnvironment::new(Arc::new(dialect));

    let registry = GeneratorRegistry::with_builtin_generators();
    let statements: Vec<Box<dyn Statement>> = vec![
        Box::new(
            CreateSequenceStatement::new("order_seq")
                .start_value(1000)
                .increment_by(1),
        ),
        Box::new(AddPrimaryKeyStatement::new("orders", ["id"]).tablespace("INDX")),
        Box::new(AddPrimaryKeyStatement::new("user", ["uid"])),
        Box::new(RawSqlStatement::new("COMMENT ON TABLE orders IS 'Customer orders'")),
    ];

    for statement in &statements {
        let result = registry.validate(statement.as_ref(), &env);
        if result.has_errors() {
            print!("{result}");
            continue;
        }
        for action in registry.generate_actions(statement.as_ref(), &env) {
            println!("{}", action.describe());
        }
    }

    println!(
        "{}",
        env.dialect().date_literal("2024-01-31T12:30:00")
    );
    Ok(())
}
