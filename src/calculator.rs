//! Grade book bound to a storage slot
//!
//! [`Calculator`] is what the front-ends drive. It loads the semester list
//! once, forwards each edit to the [`GradeBook`], and writes the whole list
//! back after every edit.

use crate::gradebook::{GradeBook, Semester, SubjectField};
use crate::persistence::{self, Storage, StorageError};
use crate::settings::Settings;
use crate::ui::view::CalculatorView;

/// The grade book plus the storage it is mirrored to
pub struct Calculator<S: Storage> {
    book: GradeBook,
    storage: S,
    key: String,
}

impl<S: Storage> Calculator<S> {
    /// Restore the saved semester list, or start with one blank semester
    pub fn load(storage: S, settings: &Settings) -> Self {
        let key = settings.storage_key.clone();
        let book = match persistence::load_json::<Vec<Semester>, _>(&storage, &key) {
            Some(semesters) => {
                log::info!("Loaded {} semesters", semesters.len());
                GradeBook::from_semesters(semesters)
            }
            None => {
                log::info!("No saved semesters, starting fresh");
                GradeBook::new(&settings.initial_semester_name)
            }
        };
        Self { book, storage, key }
    }

    pub fn semesters(&self) -> &[Semester] {
        self.book.semesters()
    }

    pub fn book(&self) -> &GradeBook {
        &self.book
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Snapshot for rendering
    pub fn view(&self) -> CalculatorView {
        CalculatorView::build(self.book.semesters())
    }

    /// Append a blank semester, returning its id
    pub fn add_semester(&mut self) -> Result<u32, StorageError> {
        let id = self.book.add_semester();
        self.save()?;
        Ok(id)
    }

    pub fn update_semester_name(&mut self, id: u32, name: &str) -> Result<bool, StorageError> {
        let matched = self.book.update_semester_name(id, name);
        self.save()?;
        Ok(matched)
    }

    pub fn add_subject(&mut self, id: u32) -> Result<bool, StorageError> {
        let matched = self.book.add_subject(id);
        self.save()?;
        Ok(matched)
    }

    pub fn handle_input_change(
        &mut self,
        semester_id: u32,
        subject_index: usize,
        field: SubjectField,
        value: &str,
    ) -> Result<bool, StorageError> {
        let matched = self
            .book
            .handle_input_change(semester_id, subject_index, field, value);
        if matched {
            log::debug!(
                "Semester {} subject {} {} = {:?}",
                semester_id,
                subject_index,
                field,
                value
            );
        }
        self.save()?;
        Ok(matched)
    }

    /// Delete the saved copy, then drop back to one blank semester.
    ///
    /// Nothing is written afterwards, so a reload before the next edit sees
    /// an empty slot, exactly like a first run.
    pub fn reset_data(&mut self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)?;
        self.book.reset();
        log::info!("Grade data reset");
        Ok(())
    }

    fn save(&mut self) -> Result<(), StorageError> {
        persistence::save_json(&mut self.storage, &self.key, self.book.semesters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn fresh() -> Calculator<MemoryStorage> {
        Calculator::load(MemoryStorage::new(), &Settings::default())
    }

    fn reload(calc: Calculator<MemoryStorage>) -> Calculator<MemoryStorage> {
        Calculator::load(calc.into_storage(), &Settings::default())
    }

    #[test]
    fn test_first_run_default() {
        let calc = fresh();
        assert_eq!(calc.semesters(), &[Semester::new(1, "")]);
        assert!(calc.storage().is_empty());
    }

    #[test]
    fn test_first_run_uses_configured_name() {
        let settings = Settings {
            initial_semester_name: "2024년 1학기".into(),
            ..Settings::default()
        };
        let calc = Calculator::load(MemoryStorage::new(), &settings);
        assert_eq!(calc.semesters()[0].name, "2024년 1학기");
    }

    #[test]
    fn test_every_edit_is_persisted() {
        let mut calc = fresh();
        calc.update_semester_name(1, "1학기").unwrap();
        calc.handle_input_change(1, 0, SubjectField::Credit, "3").unwrap();
        calc.handle_input_change(1, 0, SubjectField::Score, "4.0").unwrap();
        calc.add_subject(1).unwrap();
        let id = calc.add_semester().unwrap();
        assert_eq!(id, 2);

        let expected = calc.semesters().to_vec();
        let calc = reload(calc);
        assert_eq!(calc.semesters(), expected.as_slice());
    }

    #[test]
    fn test_reset_then_reload_is_first_run() {
        let mut calc = fresh();
        calc.add_semester().unwrap();
        calc.handle_input_change(2, 0, SubjectField::Name, "물리").unwrap();
        calc.reset_data().unwrap();
        assert_eq!(calc.semesters(), &[Semester::new(1, "")]);
        assert!(!calc.storage().contains_key("semesters"));

        let calc = reload(calc);
        assert_eq!(calc.book(), &GradeBook::default());
    }

    #[test]
    fn test_corrupt_save_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set_item("semesters", "[{\"id\":").unwrap();
        let calc = Calculator::load(storage, &Settings::default());
        assert_eq!(calc.book(), &GradeBook::default());
    }

    #[test]
    fn test_custom_storage_key() {
        let settings = Settings {
            storage_key: "gpa".into(),
            ..Settings::default()
        };
        let mut calc = Calculator::load(MemoryStorage::new(), &settings);
        calc.add_semester().unwrap();
        assert!(calc.storage().contains_key("gpa"));
        assert!(!calc.storage().contains_key("semesters"));
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut calc = Calculator::load(FailingStorage, &Settings::default());
        assert_eq!(calc.book(), &GradeBook::default());
        assert!(matches!(
            calc.add_subject(1),
            Err(StorageError::Unavailable)
        ));
        // The in-memory edit still happened
        assert_eq!(calc.semesters()[0].subjects.len(), 2);
        assert!(calc.reset_data().is_err());
    }
}
