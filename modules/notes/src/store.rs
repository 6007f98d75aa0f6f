//! NoteStore — in-memory note collection
//!
//! Notes are kept in insertion order and looked up by case-insensitive
//! title with a linear scan. Mutations hold the write lock for the whole
//! check-then-modify sequence so two writers can never both claim a title.

use crate::error::{NoteError, NoteResult};
use chrono::Utc;
use notes_types::{ListNotesQuery, Note, NoteCreate, NoteStats};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct NoteStore {
    notes: RwLock<Vec<Note>>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    /// List notes, optionally filtered by category (case-insensitive) and importance
    pub fn list(&self, query: &ListNotesQuery) -> Vec<Note> {
        let category = query
            .categoria
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);

        self.notes
            .read()
            .iter()
            .filter(|n| match &category {
                Some(c) => n.categoria.to_lowercase() == *c,
                None => true,
            })
            .filter(|n| match query.importante {
                Some(important) => n.importante == important,
                None => true,
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, title: &str) -> NoteResult<Note> {
        let notes = self.notes.read();
        position_of(&notes, title)
            .map(|i| notes[i].clone())
            .ok_or_else(NoteError::not_found)
    }

    /// Create a note and append it to the end of the collection
    pub fn create(&self, req: NoteCreate) -> NoteResult<Note> {
        validate(&req)?;

        let mut notes = self.notes.write();
        if position_of(&notes, &req.titulo).is_some() {
            return Err(NoteError::duplicate_title());
        }

        let now = Utc::now();
        let note = Note {
            categoria: req.category_or_default(),
            importante: req.important_or_default(),
            titulo: req.titulo,
            contenido: req.contenido,
            autor: req.autor,
            fecha_creacion: now,
            fecha_actualizacion: now,
        };

        notes.push(note.clone());
        log::info!("[NOTES] Created note '{}'", note.titulo);
        Ok(note)
    }

    /// Replace every field of the note matching `title` except its creation time.
    /// The note keeps its position in the collection.
    pub fn update(&self, title: &str, req: NoteCreate) -> NoteResult<Note> {
        let mut notes = self.notes.write();
        let index = position_of(&notes, title).ok_or_else(NoteError::not_found)?;

        validate(&req)?;

        let renamed = req.titulo.to_lowercase() != notes[index].titulo.to_lowercase();
        if renamed {
            let wanted = req.titulo.to_lowercase();
            let taken = notes
                .iter()
                .enumerate()
                .any(|(i, n)| i != index && n.titulo.to_lowercase() == wanted);
            if taken {
                return Err(NoteError::duplicate_title());
            }
        }

        let previous = &notes[index];
        let updated = Note {
            categoria: req.category_or_default(),
            importante: req.important_or_default(),
            titulo: req.titulo,
            contenido: req.contenido,
            autor: req.autor,
            fecha_creacion: previous.fecha_creacion,
            // Never earlier than the last update, even if the clock steps back
            fecha_actualizacion: Utc::now().max(previous.fecha_actualizacion),
        };

        log::info!("[NOTES] Updated note '{}' -> '{}'", previous.titulo, updated.titulo);
        notes[index] = updated.clone();
        Ok(updated)
    }

    /// Remove the note matching `title`, returning its state before removal
    pub fn delete(&self, title: &str) -> NoteResult<Note> {
        let mut notes = self.notes.write();
        let index = position_of(&notes, title).ok_or_else(NoteError::not_found)?;
        let removed = notes.remove(index);
        log::info!("[NOTES] Deleted note '{}'", removed.titulo);
        Ok(removed)
    }

    /// Notes whose title or content contains `text`, ignoring case.
    /// An empty `text` matches every note.
    pub fn search(&self, text: &str) -> Vec<Note> {
        let needle = text.to_lowercase();
        self.notes
            .read()
            .iter()
            .filter(|n| {
                n.titulo.to_lowercase().contains(&needle)
                    || n.contenido.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> NoteStats {
        let notes = self.notes.read();

        let total = notes.len();
        let important = notes.iter().filter(|n| n.importante).count();

        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for note in notes.iter() {
            *categories.entry(note.categoria.clone()).or_insert(0) += 1;
        }

        NoteStats {
            total_notas: total,
            notas_importantes: important,
            notas_normales: total - important,
            categorias: categories,
        }
    }
}

fn position_of(notes: &[Note], title: &str) -> Option<usize> {
    let wanted = title.to_lowercase();
    notes.iter().position(|n| n.titulo.to_lowercase() == wanted)
}

fn validate(req: &NoteCreate) -> NoteResult<()> {
    if req.titulo.trim().is_empty() {
        return Err(NoteError::InvalidInput("El título es requerido".to_string()));
    }
    if req.contenido.trim().is_empty() {
        return Err(NoteError::InvalidInput("El contenido es requerido".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn note(title: &str, content: &str, author: &str) -> NoteCreate {
        NoteCreate::new(title, content, author)
    }

    fn filed(title: &str, category: &str, important: bool) -> NoteCreate {
        NoteCreate::new(title, "c", "x")
            .with_category(category)
            .with_important(important)
    }

    #[test]
    fn test_create_and_get() {
        let store = NoteStore::new();
        let created = store
            .create(note("Todo", "Buy milk", "Alice"))
            .expect("Failed to create note");

        assert_eq!(created.categoria, "General");
        assert!(!created.importante);
        assert_eq!(created.fecha_creacion, created.fecha_actualizacion);

        let fetched = store.get("todo").expect("Failed to get note");
        assert_eq!(fetched, created);
        assert_eq!(fetched.autor, "Alice");
    }

    #[test]
    fn test_create_duplicate_title_any_case() {
        let store = NoteStore::new();
        store.create(note("Shopping", "eggs", "Alice")).unwrap();

        let result = store.create(note("shopping", "bread", "Bob"));
        assert_eq!(result.unwrap_err(), NoteError::duplicate_title());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("SHOPPING").unwrap().contenido, "eggs");
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let store = NoteStore::new();

        for (title, content) in [("", "x"), ("   ", "x"), ("x", ""), ("x", " \t\n")] {
            let result = store.create(note(title, content, "a"));
            assert!(matches!(result, Err(NoteError::InvalidInput(_))));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_keeps_explicit_category_and_flag() {
        let store = NoteStore::new();
        let created = store.create(filed("Plan", "Work", true)).unwrap();
        assert_eq!(created.categoria, "Work");
        assert!(created.importante);
    }

    #[test]
    fn test_get_missing() {
        let store = NoteStore::new();
        assert_eq!(store.get("nope").unwrap_err(), NoteError::not_found());
    }

    #[test]
    fn test_update_preserves_creation_and_position() {
        let store = NoteStore::new();
        store.create(note("First", "1", "a")).unwrap();
        let original = store.create(note("Second", "2", "a")).unwrap();
        store.create(note("Third", "3", "a")).unwrap();

        let updated = store
            .update("second", note("Second v2", "two", "b").with_important(true))
            .expect("Failed to update note");

        assert_eq!(updated.fecha_creacion, original.fecha_creacion);
        assert!(updated.fecha_actualizacion >= original.fecha_actualizacion);
        assert_eq!(updated.autor, "b");
        assert!(updated.importante);

        let titles: Vec<String> = store
            .list(&ListNotesQuery::default())
            .into_iter()
            .map(|n| n.titulo)
            .collect();
        assert_eq!(titles, vec!["First", "Second v2", "Third"]);
        assert!(store.get("second").is_err());
    }

    #[test]
    fn test_update_rename_conflict() {
        let store = NoteStore::new();
        store.create(note("Alpha", "a", "x")).unwrap();
        store.create(note("Beta", "b", "x")).unwrap();

        let result = store.update("alpha", note("BETA", "changed", "x"));
        assert_eq!(result.unwrap_err(), NoteError::duplicate_title());
        assert_eq!(store.get("alpha").unwrap().contenido, "a");
    }

    #[test]
    fn test_update_same_title_different_case() {
        let store = NoteStore::new();
        store.create(note("Alpha", "a", "x")).unwrap();

        let same = store.update("ALPHA", note("Alpha", "a2", "x")).unwrap();
        assert_eq!(same.contenido, "a2");

        let recased = store.update("alpha", note("ALPHA", "a3", "x")).unwrap();
        assert_eq!(recased.titulo, "ALPHA");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_missing_and_invalid() {
        let store = NoteStore::new();
        assert_eq!(
            store.update("ghost", note("ghost", "c", "a")).unwrap_err(),
            NoteError::not_found()
        );

        store.create(note("Real", "c", "a")).unwrap();
        let result = store.update("real", note("Real", "  ", "a"));
        assert!(matches!(result, Err(NoteError::InvalidInput(_))));
        assert_eq!(store.get("real").unwrap().contenido, "c");
    }

    #[test]
    fn test_delete_returns_prior_state() {
        let store = NoteStore::new();
        let created = store.create(note("Todo", "Buy milk", "Alice")).unwrap();

        let removed = store.delete("TODO").expect("Failed to delete note");
        assert_eq!(removed, created);
        assert_eq!(store.get("todo").unwrap_err(), NoteError::not_found());
        assert_eq!(store.delete("todo").unwrap_err(), NoteError::not_found());
    }

    #[test]
    fn test_list_filters() {
        let store = NoteStore::new();
        store.create(filed("a", "Work", true)).unwrap();
        store.create(filed("b", "work", false)).unwrap();
        store.create(filed("c", "Personal", true)).unwrap();

        let all = store.list(&ListNotesQuery::default());
        assert_eq!(all.len(), 3);

        let work = store.list(&ListNotesQuery {
            categoria: Some("WORK".to_string()),
            importante: None,
        });
        assert_eq!(work.len(), 2);

        let important = store.list(&ListNotesQuery {
            categoria: None,
            importante: Some(true),
        });
        assert_eq!(important.len(), store.stats().notas_importantes);
        assert!(important.iter().all(|n| n.importante));

        let both = store.list(&ListNotesQuery {
            categoria: Some("work".to_string()),
            importante: Some(false),
        });
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].titulo, "b");

        let empty_category = store.list(&ListNotesQuery {
            categoria: Some(String::new()),
            importante: None,
        });
        assert_eq!(empty_category.len(), 3);
    }

    #[test]
    fn test_search() {
        let store = NoteStore::new();
        store.create(note("Groceries", "Buy MILK and eggs", "x")).unwrap();
        store.create(note("Milkshake recipe", "blend", "x")).unwrap();
        store.create(note("Taxes", "file forms", "x")).unwrap();

        assert_eq!(store.search("").len(), 3);

        let hits: Vec<String> = store.search("milk").into_iter().map(|n| n.titulo).collect();
        assert_eq!(hits, vec!["Groceries", "Milkshake recipe"]);

        assert!(store.search("nothing here").is_empty());
    }

    #[test]
    fn test_stats() {
        let store = NoteStore::new();
        store.create(filed("1", "Work", true)).unwrap();
        store.create(filed("2", "Work", false)).unwrap();
        store.create(filed("3", "Personal", true)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_notas, 3);
        assert_eq!(stats.notas_importantes, 2);
        assert_eq!(stats.notas_normales, 1);
        assert_eq!(stats.categorias.len(), 2);
        assert_eq!(stats.categorias["Work"], 2);
        assert_eq!(stats.categorias["Personal"], 1);
    }

    #[test]
    fn test_stats_categories_are_case_sensitive() {
        let store = NoteStore::new();
        store.create(filed("1", "Work", false)).unwrap();
        store.create(filed("2", "work", false)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.categorias["Work"], 1);
        assert_eq!(stats.categorias["work"], 1);
        assert_eq!(NoteStore::new().stats(), NoteStats::default());
    }

    #[test]
    fn test_concurrent_create_same_title() {
        let store = Arc::new(NoteStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let title = if i % 2 == 0 { "Race" } else { "RACE" };
                    store.create(note(title, "c", "x")).is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(store.len(), 1);
    }
}
