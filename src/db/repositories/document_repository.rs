use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct WorkoutDocumentRow {
    pub owner_key: String,
    pub document: String,
    pub updated_at: String,
}

impl TryFrom<&Row<'_>> for WorkoutDocumentRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            owner_key: row.get("owner_key")?,
            document: row.get("document")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

pub struct DocumentRepository;

impl DocumentRepository {
    pub fn get(conn: &Connection, owner_key: &str) -> AppResult<Option<WorkoutDocumentRow>> {
        let mut stmt = conn.prepare(
            "SELECT owner_key, document, updated_at FROM workout_documents WHERE owner_key = ?1",
        )?;

        let row = stmt
            .query_row([owner_key], |row| WorkoutDocumentRow::try_from(row))
            .optional()?;

        Ok(row)
    }

    pub fn upsert(conn: &Connection, owner_key: &str, document: &str) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO workout_documents (owner_key, document)
                VALUES (:owner_key, :document)
                ON CONFLICT(owner_key) DO UPDATE SET
                    document = excluded.document,
                    updated_at = CURRENT_TIMESTAMP
            "#,
            named_params! {":owner_key": owner_key, ":document": document},
        )?;

        Ok(())
    }

    pub fn delete(conn: &Connection, owner_key: &str) -> AppResult<()> {
        conn.execute(
            "DELETE FROM workout_documents WHERE owner_key = ?1",
            [owner_key],
        )?;
        Ok(())
    }
}
