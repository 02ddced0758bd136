//! Table layout of the climate dataset.
//!
//! The dataset is never reflected at runtime. Instead the columns every query
//! relies on are declared here and checked once against the file at startup.
//! Extra columns in the file are ignored.

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

use crate::error::{Result, SurfsUpError};

/// SQLite column affinity as derived from a declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    /// Apply SQLite's affinity rules to a declared type name.
    ///
    /// The rules are checked in order: `INT`, then `CHAR`/`CLOB`/`TEXT`, then
    /// `BLOB` or no type, then `REAL`/`FLOA`/`DOUB`, and finally `NUMERIC`.
    pub fn from_declared_type(declared: &str) -> Self {
        let declared = declared.to_ascii_uppercase();

        if declared.contains("INT") {
            Affinity::Integer
        } else if declared.contains("CHAR") || declared.contains("CLOB") || declared.contains("TEXT")
        {
            Affinity::Text
        } else if declared.contains("BLOB") || declared.trim().is_empty() {
            Affinity::Blob
        } else if declared.contains("REAL") || declared.contains("FLOA") || declared.contains("DOUB")
        {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }
}

/// A column a query depends on
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub affinity: Affinity,
}

/// A table and the columns required from it
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

/// Daily observations: one row per station per date
pub const MEASUREMENT: TableSpec = TableSpec {
    name: "measurement",
    columns: &[
        ColumnSpec {
            name: "station",
            affinity: Affinity::Text,
        },
        ColumnSpec {
            name: "date",
            affinity: Affinity::Text,
        },
        ColumnSpec {
            name: "prcp",
            affinity: Affinity::Real,
        },
        ColumnSpec {
            name: "tobs",
            affinity: Affinity::Real,
        },
    ],
};

/// Station metadata; only the identifier is required
pub const STATION: TableSpec = TableSpec {
    name: "station",
    columns: &[ColumnSpec {
        name: "station",
        affinity: Affinity::Text,
    }],
};

/// Every table the server reads from
pub const TABLES: &[TableSpec] = &[MEASUREMENT, STATION];

/// A column as reported by the dataset itself
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[sqlx(rename = "type")]
    pub declared_type: String,
}

/// One row of the `measurement` table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Observation {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// One row of the `station` table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Read the column list of a table. An absent table yields no columns.
pub async fn table_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<ColumnInfo>> {
    let columns = sqlx::query_as::<_, ColumnInfo>(
        "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid",
    )
    .bind(table)
    .fetch_all(conn)
    .await?;

    Ok(columns)
}

/// Check a table's actual columns against its declaration
pub fn check_table(spec: &TableSpec, actual: &[ColumnInfo]) -> Result<()> {
    if actual.is_empty() {
        return Err(SurfsUpError::Schema {
            table: spec.name.to_string(),
            message: "table not found in dataset".to_string(),
        });
    }

    for column in spec.columns {
        let found = actual
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(column.name))
            .ok_or_else(|| SurfsUpError::Schema {
                table: spec.name.to_string(),
                message: format!("missing column '{}'", column.name),
            })?;

        let affinity = Affinity::from_declared_type(&found.declared_type);
        if affinity != column.affinity {
            return Err(SurfsUpError::Schema {
                table: spec.name.to_string(),
                message: format!(
                    "column '{}' has declared type '{}' ({:?} affinity), expected {:?}",
                    column.name, found.declared_type, affinity, column.affinity
                ),
            });
        }
    }

    Ok(())
}

/// Validate every declared table against the open dataset
pub async fn validate_schema(conn: &mut SqliteConnection) -> Result<()> {
    for spec in TABLES {
        let actual = table_columns(&mut *conn, spec.name).await?;
        check_table(spec, &actual)?;
    }
    Ok(())
}
