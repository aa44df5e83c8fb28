//! Prediction database operations.

use rusqlite::{params, OptionalExtension};
use tracing::{info, warn};

use super::{Database, DbError, DbResult};
use crate::models::{NewPrediction, PredictionRecord, ProbabilityMap, SymptomVector};

impl Database {
    /// Insert a prediction and return the stored record.
    pub fn insert_prediction(&self, prediction: NewPrediction) -> DbResult<PredictionRecord> {
        let symptoms_json = prediction.symptoms.encode()?;
        let probabilities_json = serde_json::to_string(&prediction.probabilities)?;

        self.conn.execute(
            r#"
            INSERT INTO predictions (
                timestamp, patient_name, age, contact_number,
                symptoms, predicted_disease, probabilities
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                prediction.timestamp,
                prediction.patient_name,
                prediction.age,
                prediction.contact_number,
                symptoms_json,
                prediction.predicted_disease,
                probabilities_json,
            ],
        )?;

        let record = PredictionRecord::from_new(self.conn.last_insert_rowid(), prediction);
        info!(id = record.id, disease = %record.predicted_disease, "prediction recorded");
        Ok(record)
    }

    /// Get a prediction by ID.
    pub fn get_prediction(&self, id: i64) -> DbResult<Option<PredictionRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT id, timestamp, patient_name, age, contact_number,
                       symptoms, predicted_disease, probabilities
                FROM predictions
                WHERE id = ?
                "#,
                [id],
                prediction_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Most recent predictions, newest first.
    ///
    /// Unreadable JSON columns are listed as empty so the row can still be
    /// seen and deleted.
    pub fn get_recent_predictions(&self, limit: usize) -> DbResult<Vec<PredictionRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, timestamp, patient_name, age, contact_number,
                   symptoms, predicted_disease, probabilities
            FROM predictions
            ORDER BY id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map([limit as i64], prediction_row)?;
        rows.map(|row| row.map(PredictionRow::into_listed_record))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Delete a prediction. Returns false if it did not exist.
    pub fn remove_prediction(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM predictions WHERE id = ?", [id])?;
        if rows_affected > 0 {
            info!(id, "prediction deleted");
        }
        Ok(rows_affected > 0)
    }

    /// Prediction count per predicted disease, most frequent first.
    pub fn count_predicted_diseases(&self) -> DbResult<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT predicted_disease, COUNT(*) AS n, MIN(id) AS first_id
            FROM predictions
            GROUP BY predicted_disease
            ORDER BY n DESC, first_id ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let disease: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((disease, count as usize))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// Raw row before the JSON columns are parsed.
struct PredictionRow {
    id: i64,
    timestamp: String,
    // NULL in rows written before these columns existed
    patient_name: Option<String>,
    age: Option<u32>,
    contact_number: Option<String>,
    symptoms: String,
    predicted_disease: String,
    probabilities: String,
}

fn prediction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PredictionRow> {
    Ok(PredictionRow {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        patient_name: row.get(2)?,
        age: row.get(3)?,
        contact_number: row.get(4)?,
        symptoms: row.get(5)?,
        predicted_disease: row.get(6)?,
        probabilities: row.get(7)?,
    })
}

impl PredictionRow {
    fn into_record(
        self,
        symptoms: SymptomVector,
        probabilities: ProbabilityMap,
    ) -> PredictionRecord {
        PredictionRecord {
            id: self.id,
            timestamp: self.timestamp,
            patient_name: self.patient_name.unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            contact_number: self.contact_number.unwrap_or_default(),
            symptoms,
            predicted_disease: self.predicted_disease,
            probabilities,
        }
    }

    fn into_listed_record(self) -> PredictionRecord {
        let symptoms = SymptomVector::decode(&self.symptoms).unwrap_or_else(|e| {
            warn!(id = self.id, error = %e, "unreadable symptoms column");
            SymptomVector::new()
        });
        let probabilities = serde_json::from_str(&self.probabilities).unwrap_or_else(|e| {
            warn!(id = self.id, error = %e, "unreadable probabilities column");
            ProbabilityMap::new()
        });
        self.into_record(symptoms, probabilities)
    }
}

impl TryFrom<PredictionRow> for PredictionRecord {
    type Error = DbError;

    fn try_from(row: PredictionRow) -> Result<Self, Self::Error> {
        let symptoms = SymptomVector::decode(&row.symptoms)?;
        let probabilities: ProbabilityMap = serde_json::from_str(&row.probabilities)?;
        Ok(row.into_record(symptoms, probabilities))
    }
}
