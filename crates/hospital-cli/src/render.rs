//! Plain-text tables and bar charts for the console.

use hospital_core::analytics::CategoryCount;
use hospital_core::classifier::RankedDisease;
use hospital_core::models::{Doctor, Patient, PredictionRecord};

/// Width of a full bar in the analytics charts.
pub const BAR_WIDTH: usize = 30;

/// Render rows under a header, columns padded to the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let border: String = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+\n", border);

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut out = border.clone();
    out.push_str(&line(headers.to_vec()));
    out.push_str(&border);
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out.push_str(&border);
    out
}

pub fn doctors_table(doctors: &[Doctor]) -> String {
    let rows: Vec<Vec<String>> = doctors
        .iter()
        .map(|d| vec![d.id.to_string(), d.name.clone(), d.specialization.clone()])
        .collect();
    table(&["ID", "Name", "Specialization"], &rows)
}

pub fn patients_table(patients: &[Patient]) -> String {
    let rows: Vec<Vec<String>> = patients
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.age.to_string(),
                p.problem.clone(),
                p.assigned_doctor.clone(),
                p.assigned_specialization.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "Name", "Age", "Problem", "Doctor", "Specialization"],
        &rows,
    )
}

pub fn predictions_table(records: &[PredictionRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.timestamp.clone(),
                r.patient_name.clone(),
                r.age.to_string(),
                r.contact_number.clone(),
                r.symptoms.present().collect::<Vec<_>>().join(", "),
                r.predicted_disease.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "Time", "Patient", "Age", "Contact", "Symptoms", "Prediction"],
        &rows,
    )
}

/// Ranked diseases with percentages.
pub fn ranking_list(ranking: &[RankedDisease]) -> String {
    ranking
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({:.1}%)\n", i + 1, r.disease, r.probability * 100.0))
        .collect()
}

/// Horizontal bar per category, scaled to the largest count, with its share.
pub fn bar_chart(counts: &[CategoryCount]) -> String {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let label_width = counts
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(0);

    counts
        .iter()
        .map(|c| {
            let len = if max == 0 { 0 } else { c.count * BAR_WIDTH / max };
            format!(
                "{:<width$} | {} {} ({:.1}%)\n",
                c.category,
                "#".repeat(len),
                c.count,
                c.share(total),
                width = label_width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(category: &str, count: usize) -> CategoryCount {
        CategoryCount {
            category: category.to_string(),
            count,
        }
    }

    #[test]
    fn test_table_pads_columns() {
        let out = table(
            &["ID", "Name"],
            &[vec!["1".into(), "Dr. Mehta".into()]],
        );
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "+----+-----------+");
        assert_eq!(lines[1], "| ID | Name      |");
        assert_eq!(lines[3], "| 1  | Dr. Mehta |");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_empty_table_has_header() {
        let out = doctors_table(&[]);
        assert!(out.contains("Specialization"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let out = bar_chart(&[count("Fever", 2), count("Heart", 1)]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], format!("Fever | {} 2 (66.7%)", "#".repeat(BAR_WIDTH)));
        assert_eq!(lines[1], format!("Heart | {} 1 (33.3%)", "#".repeat(BAR_WIDTH / 2)));
    }

    #[test]
    fn test_ranking_list_percentages() {
        let ranking = vec![
            RankedDisease {
                disease: "Asthma".into(),
                probability: 0.5,
            },
            RankedDisease {
                disease: "Common Cold".into(),
                probability: 0.5,
            },
        ];
        assert_eq!(
            ranking_list(&ranking),
            "1. Asthma (50.0%)\n2. Common Cold (50.0%)\n"
        );
    }
}
