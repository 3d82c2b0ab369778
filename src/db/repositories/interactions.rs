use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::db::{
    helpers::{format_datetime, parse_datetime, parse_kind},
    models::{Interaction, InteractionInput, InteractionPatch},
    Database,
};
use crate::ledger::{calculate_crumbs, reconcile, LedgerStats, Reconciliation};

const SELECT_COLUMNS: &str = "SELECT id, type, magnitude, crumbs, created_at FROM interactions";

fn row_to_interaction(row: &Row) -> Result<Interaction> {
    let kind: String = row.get("type")?;
    let created_at: String = row.get("created_at")?;

    Ok(Interaction {
        id: row.get("id")?,
        kind: parse_kind(&kind)?,
        magnitude: row.get("magnitude")?,
        crumbs: row.get("crumbs")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

fn sum_crumbs(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COALESCE(SUM(crumbs), 0) FROM interactions",
        [],
        |row| row.get(0),
    )
    .context("failed to sum crumbs")
}

fn fetch_interaction(conn: &Connection, interaction_id: i64) -> Result<Option<Interaction>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    let mut rows = stmt.query(params![interaction_id])?;
    let interaction = match rows.next()? {
        Some(row) => Some(row_to_interaction(row)?),
        None => None,
    };
    Ok(interaction)
}

impl Database {
    /// Append a new interaction with its crumbs reconciled against the current sum.
    ///
    /// The sum is read and the row inserted in one task and one transaction,
    /// so concurrent creates always see each other's effect.
    pub async fn create_interaction(
        &self,
        input: InteractionInput,
    ) -> Result<(Interaction, Reconciliation)> {
        self.execute(move |conn| {
            let tx = conn
                .transaction()
                .context("failed to open interaction transaction")?;

            let raw_sum = sum_crumbs(&tx)?;
            let outcome = reconcile(raw_sum, calculate_crumbs(input.kind, input.magnitude));
            let created_at = Utc::now();

            tx.execute(
                "INSERT INTO interactions (type, magnitude, crumbs, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    input.kind.as_str(),
                    input.magnitude,
                    outcome.required_delta,
                    format_datetime(&created_at),
                ],
            )
            .context("failed to insert interaction")?;
            let interaction_id = tx.last_insert_rowid();

            tx.commit().context("failed to commit interaction")?;

            let interaction = Interaction {
                id: interaction_id,
                kind: input.kind,
                magnitude: input.magnitude,
                crumbs: outcome.required_delta,
                created_at,
            };
            Ok((interaction, outcome))
        })
        .await
    }

    /// All interactions, newest first.
    pub async fn list_interactions(&self) -> Result<Vec<Interaction>> {
        self.execute(|conn| {
            let mut stmt =
                conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))?;

            let mut rows = stmt.query([])?;
            let mut interactions = Vec::new();
            while let Some(row) = rows.next()? {
                interactions.push(row_to_interaction(row)?);
            }

            Ok(interactions)
        })
        .await
    }

    pub async fn get_interaction(&self, interaction_id: i64) -> Result<Option<Interaction>> {
        self.execute(move |conn| fetch_interaction(conn, interaction_id))
            .await
    }

    /// Change the type and/or magnitude of a stored interaction.
    ///
    /// The stored `crumbs` value is left as it is and later rows are not
    /// reconciled again. Returns `None` when the row does not exist.
    pub async fn update_interaction(
        &self,
        interaction_id: i64,
        patch: InteractionPatch,
    ) -> Result<Option<Interaction>> {
        self.execute(move |conn| {
            let mut updates = Vec::new();
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(kind) = patch.kind {
                updates.push("type = ?");
                params_vec.push(Box::new(kind.as_str()));
            }
            if let Some(magnitude) = patch.magnitude {
                updates.push("magnitude = ?");
                params_vec.push(Box::new(magnitude));
            }

            if updates.is_empty() {
                bail!("No fields to update");
            }

            let query = format!("UPDATE interactions SET {} WHERE id = ?", updates.join(", "));
            params_vec.push(Box::new(interaction_id));

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();

            let rows_affected = conn
                .execute(&query, params_refs.as_slice())
                .context("failed to update interaction")?;
            if rows_affected == 0 {
                return Ok(None);
            }

            let interaction = fetch_interaction(conn, interaction_id)?
                .ok_or_else(|| anyhow!("Interaction not found after update"))?;
            Ok(Some(interaction))
        })
        .await
    }

    /// Remove a stored interaction. Returns `false` when it did not exist.
    pub async fn delete_interaction(&self, interaction_id: i64) -> Result<bool> {
        self.execute(move |conn| {
            let rows_affected = conn
                .execute(
                    "DELETE FROM interactions WHERE id = ?1",
                    params![interaction_id],
                )
                .context("failed to delete interaction")?;
            Ok(rows_affected > 0)
        })
        .await
    }

    /// Unclamped sum of every stored crumb value.
    pub async fn raw_crumb_sum(&self) -> Result<i64> {
        self.execute(|conn| sum_crumbs(conn)).await
    }

    pub async fn ledger_stats(&self) -> Result<LedgerStats> {
        let raw_sum = self.raw_crumb_sum().await?;
        Ok(LedgerStats::from_raw_sum(raw_sum))
    }
}
