//! Numbered console menu.
//!
//! The console reads from any `BufRead` and writes to any `Write`, so a
//! whole session can be scripted in tests.

use std::io::{self, BufRead, Write};

use hospital_core::analytics::{self, CategoryCount};
use hospital_core::intake::{self, IntakeError, PatientForm, SymptomForm};
use hospital_core::models::SymptomVector;
use hospital_core::routing::SpecialistRouter;
use hospital_core::store::{DirectoryStore, PredictionLog};
use hospital_core::ClassifierAdapter;
use tracing::{debug, error};

use crate::config::{APP_NAME, HISTORY_LIMIT};
use crate::render;

/// Menu entries in display order.
pub const MENU_ITEMS: [&str; 9] = [
    "View Doctors",
    "Add Doctor",
    "Add Patient",
    "View Patients",
    "Search Patient",
    "Analytics Dashboard",
    "Symptom Checker",
    "Prediction History",
    "Exit",
];

/// Selected menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewDoctors,
    AddDoctor,
    AddPatient,
    ViewPatients,
    SearchPatient,
    Analytics,
    SymptomChecker,
    PredictionHistory,
    Exit,
}

impl MenuChoice {
    /// Parse a typed selection ("1" to "9").
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => Self::ViewDoctors,
            "2" => Self::AddDoctor,
            "3" => Self::AddPatient,
            "4" => Self::ViewPatients,
            "5" => Self::SearchPatient,
            "6" => Self::Analytics,
            "7" => Self::SymptomChecker,
            "8" => Self::PredictionHistory,
            "9" => Self::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Whether the session should keep going.
enum Flow {
    Continue,
    Quit,
}

/// One interactive session over a store.
pub struct Console<'a, S: ?Sized, R, W> {
    store: &'a mut S,
    router: SpecialistRouter,
    classifier: &'a ClassifierAdapter,
    input: R,
    output: W,
}

impl<'a, S, R, W> Console<'a, S, R, W>
where
    S: DirectoryStore + PredictionLog + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a mut S, classifier: &'a ClassifierAdapter, input: R, output: W) -> Self {
        Self {
            store,
            router: SpecialistRouter::new(),
            classifier,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice! Try again.")?;
                continue;
            };
            debug!(?choice, "menu selection");

            if let Flow::Quit = self.dispatch(choice)? {
                break;
            }
        }

        writeln!(self.output, "\nThank you for using {}! Stay healthy.", APP_NAME)?;
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n==============================")?;
        writeln!(self.output, "{}", APP_NAME.to_uppercase())?;
        writeln!(self.output, "==============================")?;
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        Ok(())
    }

    /// Print `label` and read one line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        let result = match choice {
            MenuChoice::ViewDoctors => self.view_doctors(),
            MenuChoice::AddDoctor => self.add_doctor(),
            MenuChoice::AddPatient => self.add_patient(),
            MenuChoice::ViewPatients => self.view_patients(),
            MenuChoice::SearchPatient => self.search_patient(),
            MenuChoice::Analytics => self.analytics(),
            MenuChoice::SymptomChecker => self.symptom_checker(),
            MenuChoice::PredictionHistory => self.prediction_history(),
            MenuChoice::Exit => return Ok(Flow::Quit),
        };

        match result {
            Ok(flow) => Ok(flow),
            Err(ScreenError::Io(e)) => Err(e),
            Err(ScreenError::Intake(e)) => {
                if let IntakeError::Store(inner) = &e {
                    error!(error = %inner, "store operation failed");
                }
                writeln!(self.output, "Error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn view_doctors(&mut self) -> ScreenResult {
        let doctors = self.store.list_doctors().map_err(IntakeError::from)?;
        writeln!(self.output, "\n--- Available Doctors ---")?;
        write!(self.output, "{}", render::doctors_table(&doctors))?;
        Ok(Flow::Continue)
    }

    fn add_doctor(&mut self) -> ScreenResult {
        writeln!(self.output, "\nEnter Doctor Details:")?;
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(specialization) = self.prompt("Specialization: ")? else {
            return Ok(Flow::Quit);
        };

        let doctor = intake::register_doctor(&mut *self.store, &name, &specialization)?;
        writeln!(self.output, "\nDoctor '{}' successfully added!", doctor.name)?;
        Ok(Flow::Continue)
    }

    fn add_patient(&mut self) -> ScreenResult {
        writeln!(self.output, "\nEnter Patient Details:")?;
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(age) = self.prompt("Age: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(problem) = self.prompt("Health Issue (Fever/Heart/Skin/Ortho/ENT): ")? else {
            return Ok(Flow::Quit);
        };

        let form = PatientForm { name, age, problem };
        let admission = intake::admit_patient(&mut *self.store, &self.router, &form)?;

        writeln!(
            self.output,
            "\nPatient '{}' successfully added!",
            admission.patient.name
        )?;
        match &admission.doctor {
            Some(doctor) => writeln!(
                self.output,
                "Assigned Doctor: {} ({})",
                doctor.name, doctor.specialization
            )?,
            None => writeln!(self.output, "No doctor available for this issue.")?,
        }
        Ok(Flow::Continue)
    }

    fn view_patients(&mut self) -> ScreenResult {
        let patients = self.store.list_patients().map_err(IntakeError::from)?;
        writeln!(self.output, "\n--- Registered Patients ---")?;
        if patients.is_empty() {
            writeln!(self.output, "No patients registered yet.")?;
        } else {
            write!(self.output, "{}", render::patients_table(&patients))?;
        }
        Ok(Flow::Continue)
    }

    fn search_patient(&mut self) -> ScreenResult {
        let Some(query) = self.prompt("\nEnter Patient Name or ID to Search: ")? else {
            return Ok(Flow::Quit);
        };

        let found = self.store.search(&query).map_err(IntakeError::from)?;
        if found.is_empty() {
            writeln!(self.output, "No matching patient found.")?;
        } else {
            writeln!(self.output, "\n--- Search Result ---")?;
            write!(self.output, "{}", render::patients_table(&found))?;
        }
        Ok(Flow::Continue)
    }

    fn analytics(&mut self) -> ScreenResult {
        let patients = self.store.list_patients().map_err(IntakeError::from)?;
        let Some(summary) = analytics::summarize(&patients) else {
            writeln!(self.output, "\nNo data to analyze yet!")?;
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "\n--- Patient Analytics ---")?;
        writeln!(self.output, "Total Patients: {}", summary.total_patients)?;
        writeln!(
            self.output,
            "Average Patient Age: {:.2} years",
            summary.average_age
        )?;

        writeln!(self.output, "\nPatients per Health Issue:")?;
        write!(self.output, "{}", render::bar_chart(&summary.by_problem))?;
        writeln!(self.output, "\nPatients per Specialization:")?;
        write!(self.output, "{}", render::bar_chart(&summary.by_specialization))?;

        let diseases: Vec<CategoryCount> = self
            .store
            .disease_counts()
            .map_err(IntakeError::from)?
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        if !diseases.is_empty() {
            writeln!(self.output, "\nPredicted Diseases:")?;
            write!(self.output, "{}", render::bar_chart(&diseases))?;
        }
        Ok(Flow::Continue)
    }

    fn symptom_checker(&mut self) -> ScreenResult {
        writeln!(self.output, "\n--- Symptom Checker ---")?;
        let Some(patient_name) = self.prompt("Patient Name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(age) = self.prompt("Age: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(contact_number) = self.prompt("Contact Number: ")? else {
            return Ok(Flow::Quit);
        };

        let mut symptoms = SymptomVector::new();
        for feature in self.classifier.features() {
            let Some(answer) = self.prompt(&format!("{}? (y/n): ", feature))? else {
                return Ok(Flow::Quit);
            };
            symptoms.set(feature.clone(), is_yes(&answer));
        }

        let form = SymptomForm {
            patient_name,
            age,
            contact_number,
            symptoms,
        };
        let report = intake::check_symptoms(&mut *self.store, self.classifier, &form)?;

        writeln!(self.output, "\nTop predictions:")?;
        write!(self.output, "{}", render::ranking_list(report.top()))?;
        writeln!(self.output, "[{}] {}", report.suggestion, report.suggestion.message())?;
        writeln!(self.output, "Saved as prediction #{}", report.record.id)?;
        Ok(Flow::Continue)
    }

    fn prediction_history(&mut self) -> ScreenResult {
        let records = self
            .store
            .recent_predictions(HISTORY_LIMIT)
            .map_err(IntakeError::from)?;
        writeln!(self.output, "\n--- Prediction History ---")?;
        if records.is_empty() {
            writeln!(self.output, "No predictions recorded yet.")?;
            return Ok(Flow::Continue);
        }
        write!(self.output, "{}", render::predictions_table(&records))?;

        let Some(answer) = self.prompt("Enter prediction ID to delete (blank to skip): ")? else {
            return Ok(Flow::Quit);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(Flow::Continue);
        }

        match answer.parse::<i64>() {
            Ok(id) => {
                if self.store.delete_prediction(id).map_err(IntakeError::from)? {
                    writeln!(self.output, "Prediction #{} deleted.", id)?;
                } else {
                    writeln!(self.output, "No prediction with ID {}.", id)?;
                }
            }
            Err(_) => writeln!(self.output, "Invalid ID '{}'.", answer)?,
        }
        Ok(Flow::Continue)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Why a screen stopped early.
enum ScreenError {
    /// Console I/O failed; ends the session
    Io(io::Error),
    /// Bad input or store failure; reported and the menu continues
    Intake(IntakeError),
}

impl From<io::Error> for ScreenError {
    fn from(e: io::Error) -> Self {
        ScreenError::Io(e)
    }
}

impl From<IntakeError> for ScreenError {
    fn from(e: IntakeError) -> Self {
        ScreenError::Intake(e)
    }
}

type ScreenResult = Result<Flow, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_core::store::MemoryDirectory;
    use hospital_core::Database;
    use std::io::Cursor;

    fn run_session<S>(store: &mut S, script: &str) -> String
    where
        S: DirectoryStore + PredictionLog,
    {
        let classifier = ClassifierAdapter::reference().unwrap();
        let mut output = Vec::new();
        Console::new(store, &classifier, Cursor::new(script), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::ViewDoctors));
        assert_eq!(MenuChoice::parse(" 9 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("10"), None);
        assert_eq!(MenuChoice::parse("abc"), None);
    }

    #[test]
    fn test_exit_and_eof_end_session() {
        let mut store = MemoryDirectory::new();
        assert!(run_session(&mut store, "9\n").contains("Thank you"));
        assert!(run_session(&mut store, "").contains("Thank you"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut store = MemoryDirectory::new();
        let out = run_session(&mut store, "42\n9\n");
        assert!(out.contains("Invalid choice! Try again."));
        assert_eq!(out.matches("Enter your choice: ").count(), 2);
    }

    #[test]
    fn test_view_default_doctors() {
        let mut store = MemoryDirectory::with_default_doctors();
        let out = run_session(&mut store, "1\n9\n");
        assert!(out.contains("Dr. Mehta"));
        assert!(out.contains("ENT Specialist"));
    }

    #[test]
    fn test_add_patient_assigns_doctor() {
        let mut store = MemoryDirectory::with_default_doctors();
        let out = run_session(&mut store, "3\nAsha\n54\nheart\n4\n9\n");

        assert!(out.contains("Patient 'Asha' successfully added!"));
        assert!(out.contains("Assigned Doctor: Dr. Sharma (Cardiologist)"));
        assert_eq!(store.list_patients().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_age_reported_without_write() {
        let mut store = MemoryDirectory::with_default_doctors();
        let out = run_session(&mut store, "3\nAsha\nfifty\nheart\n9\n");

        assert!(out.contains("Error: Age must be a whole number"));
        assert!(store.list_patients().unwrap().is_empty());
    }

    #[test]
    fn test_search_by_id_and_name() {
        let mut store = MemoryDirectory::new();
        store.add_patient("Max", 20, "Fever", None).unwrap();
        store.add_patient("Luna", 40, "Heart", None).unwrap();

        let out = run_session(&mut store, "5\n2\n5\nzzz\n9\n");
        assert!(out.contains("Luna"));
        assert!(out.contains("No matching patient found."));
    }

    #[test]
    fn test_analytics_dashboard() {
        let mut store = MemoryDirectory::new();
        assert!(run_session(&mut store, "6\n9\n").contains("No data to analyze yet!"));

        store.add_patient("A", 20, "Fever", None).unwrap();
        store.add_patient("B", 31, "Fever", None).unwrap();
        let out = run_session(&mut store, "6\n9\n");
        assert!(out.contains("Total Patients: 2"));
        assert!(out.contains("Average Patient Age: 25.50 years"));
    }

    #[test]
    fn test_symptom_checker_then_history_delete() {
        let mut db = Database::open_in_memory().unwrap();
        let answers = "y\n".repeat(9);
        let script = format!("7\nAsha\n40\n555-0100\n{}8\n1\n8\n9\n", answers);

        let out = run_session(&mut db, &script);
        assert!(out.contains("1. Flu (100.0%)"));
        assert!(out.contains("[ROUTINE]"));
        assert!(out.contains("Prediction #1 deleted."));
        assert!(out.contains("No predictions recorded yet."));
        assert!(db.recent_predictions(10).unwrap().is_empty());
    }

    #[test]
    fn test_history_deletes_unreadable_row() {
        let mut db = Database::open_in_memory().unwrap();
        let script = format!("7\nAsha\n40\n555-0100\n{}9\n", "n\n".repeat(9));
        run_session(&mut db, &script);
        db.conn()
            .execute("UPDATE predictions SET symptoms = '{''Fever'': True}'", [])
            .unwrap();

        let out = run_session(&mut db, "8\n1\n9\n");
        assert!(out.contains("Asha"));
        assert!(out.contains("Prediction #1 deleted."));
        assert!(db.recent_predictions(10).unwrap().is_empty());
    }

    #[test]
    fn test_yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
