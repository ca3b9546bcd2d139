// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Migration verification.
//!
//! The checks read the schema back through `sqlite_master` and the table
//! PRAGMAs rather than trusting the SQL text, so a migration that drops a
//! constraint is caught even if the file still mentions it.

use std::collections::BTreeMap;

use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

const EXPECTED_TABLES: [&str; 4] = ["academic_years", "audit_events", "enrollments", "periods"];

/// Keeps at most one operating year at rest.
const OPERATING_INDEX: &str = "idx_academic_years_single_operating";

/// Applies the migrations to an in-memory database, checks the schema,
/// reverts everything, and applies them again.
pub fn verify_migrations() -> Result<()> {
    tracing::info!("Verifying calendar migrations");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let problems = check_schema(&introspect(&mut conn)?);
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("  - {problem}");
        }
        return Err(eyre!("Schema verification failed: {} problem(s)", problems.len()));
    }
    tracing::info!("Schema enforces the calendar storage rules");

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let leftover: Vec<String> = introspect(&mut conn)?.into_keys().collect();
    if !leftover.is_empty() {
        return Err(eyre!("Down migrations left tables behind: {leftover:?}"));
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;

    tracing::info!("✓ Migrations apply, revert and re-apply cleanly");
    Ok(())
}

/// What the checks need to know about one table.
#[derive(Debug, Default)]
struct TableFacts {
    /// Column name to `NOT NULL` (primary keys count as not null).
    columns: BTreeMap<String, bool>,
    /// `(column, parent table, on delete)` per foreign key.
    foreign_keys: Vec<(String, String, String)>,
    indexes: Vec<IndexFacts>,
}

#[derive(Debug)]
struct IndexFacts {
    name: String,
    columns: Vec<String>,
    unique: bool,
    partial: bool,
    /// Created by a `UNIQUE` table constraint rather than `CREATE INDEX`.
    from_constraint: bool,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Integer)]
    notnull: i32,
    #[diesel(sql_type = Integer)]
    pk: i32,
}

#[derive(QueryableByName)]
struct ForeignKeyRow {
    #[diesel(sql_type = Text)]
    table: String,
    #[diesel(sql_type = Text)]
    from: String,
    #[diesel(sql_type = Text)]
    on_delete: String,
}

#[derive(QueryableByName)]
struct IndexRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Integer)]
    unique: i32,
    #[diesel(sql_type = Text)]
    origin: String,
    #[diesel(sql_type = Integer)]
    partial: i32,
}

fn introspect(conn: &mut SqliteConnection) -> Result<BTreeMap<String, TableFacts>> {
    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to list tables")?;

    let mut schema = BTreeMap::new();
    for NameRow { name: table } in tables {
        let mut facts = TableFacts::default();

        let columns: Vec<ColumnRow> = diesel::sql_query(format!("PRAGMA table_info({table})"))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read columns of {table}"))?;
        for column in columns {
            facts
                .columns
                .insert(column.name, column.notnull != 0 || column.pk > 0);
        }

        let foreign_keys: Vec<ForeignKeyRow> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read foreign keys of {table}"))?;
        facts.foreign_keys = foreign_keys
            .into_iter()
            .map(|fk| (fk.from, fk.table, fk.on_delete))
            .collect();

        let indexes: Vec<IndexRow> = diesel::sql_query(format!("PRAGMA index_list({table})"))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read indexes of {table}"))?;
        for index in indexes {
            let columns: Vec<NameRow> =
                diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                    .load(conn)
                    .wrap_err_with(|| format!("Failed to read columns of index {}", index.name))?;
            facts.indexes.push(IndexFacts {
                columns: columns.into_iter().map(|c| c.name).collect(),
                unique: index.unique != 0,
                partial: index.partial != 0,
                from_constraint: index.origin == "u",
                name: index.name,
            });
        }

        schema.insert(table, facts);
    }

    Ok(schema)
}

/// Lists every way `schema` falls short of the calendar's storage rules.
fn check_schema(schema: &BTreeMap<String, TableFacts>) -> Vec<String> {
    let mut problems: Vec<String> = EXPECTED_TABLES
        .iter()
        .filter(|name| !schema.contains_key(**name))
        .map(|name| format!("Missing table: {name}"))
        .collect();

    for child in ["periods", "enrollments"] {
        let Some(table) = schema.get(child) else {
            continue;
        };
        let cascades = table.foreign_keys.iter().any(|(from, parent, on_delete)| {
            from == "year_id" && parent == "academic_years" && on_delete == "CASCADE"
        });
        if !cascades {
            problems.push(format!(
                "{child}.year_id must reference academic_years with ON DELETE CASCADE"
            ));
        }
    }

    if let Some(years) = schema.get("academic_years") {
        for column in ["year_id", "year", "status", "is_operating"] {
            match years.columns.get(column) {
                Some(true) => {}
                Some(false) => problems.push(format!("academic_years.{column} must be NOT NULL")),
                None => problems.push(format!("Missing column academic_years.{column}")),
            }
        }

        let guarded = years.indexes.iter().any(|index| {
            index.name == OPERATING_INDEX
                && index.unique
                && index.partial
                && index.columns == ["is_operating"]
        });
        if !guarded {
            problems.push(format!(
                "{OPERATING_INDEX} must be a partial unique index on academic_years(is_operating)"
            ));
        }
    }

    if let Some(periods) = schema.get("periods") {
        let ordered = periods
            .indexes
            .iter()
            .any(|index| index.from_constraint && index.columns == ["year_id", "position"]);
        if !ordered {
            problems.push(String::from("periods(year_id, position) must be UNIQUE"));
        }
    }

    problems
}
