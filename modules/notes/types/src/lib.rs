//! Shared types for the notes service and its HTTP clients.
//!
//! Field names are part of the public JSON contract and stay in Spanish.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Category assigned when a request does not name one
pub const DEFAULT_CATEGORY: &str = "General";

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /notas` and `PUT /notas/:titulo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteCreate {
    pub titulo: String,
    pub contenido: String,
    pub autor: String,
    /// Falls back to [`DEFAULT_CATEGORY`] when missing or null
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub importante: Option<bool>,
}

impl NoteCreate {
    pub fn new(
        titulo: impl Into<String>,
        contenido: impl Into<String>,
        autor: impl Into<String>,
    ) -> Self {
        Self {
            titulo: titulo.into(),
            contenido: contenido.into(),
            autor: autor.into(),
            categoria: None,
            importante: None,
        }
    }

    pub fn with_category(mut self, categoria: impl Into<String>) -> Self {
        self.categoria = Some(categoria.into());
        self
    }

    pub fn with_important(mut self, importante: bool) -> Self {
        self.importante = Some(importante);
        self
    }

    pub fn category_or_default(&self) -> String {
        self.categoria
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }

    pub fn important_or_default(&self) -> bool {
        self.importante.unwrap_or(false)
    }
}

/// Query string of `GET /notas`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotesQuery {
    pub categoria: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub importante: Option<bool>,
}

/// Parse the boolean spellings HTML forms and query strings commonly use
/// (`1`/`0`, `yes`/`no`, `on`/`off`, `t`/`f`, ...), ignoring case.
pub fn parse_lenient_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// An empty value counts as absent, like an empty `categoria`.
fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_lenient_bool(value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("`{}` is not a valid boolean", value))),
    }
}

// =====================================================
// Response Types
// =====================================================

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub titulo: String,
    pub contenido: String,
    pub autor: String,
    pub categoria: String,
    pub importante: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Aggregate counters returned by `GET /estadisticas`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub total_notas: usize,
    pub notas_importantes: usize,
    pub notas_normales: usize,
    /// Grouped by the raw category string (case-sensitive)
    pub categorias: BTreeMap<String, usize>,
}

/// Response of `DELETE /notas/:titulo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedNote {
    pub mensaje: String,
    pub nota_eliminada: Note,
}

impl DeletedNote {
    pub fn new(nota_eliminada: Note) -> Self {
        Self {
            mensaje: "Nota eliminada exitosamente".to_string(),
            nota_eliminada,
        }
    }
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub mensaje: String,
}

impl Default for WelcomeMessage {
    fn default() -> Self {
        Self {
            mensaje: "Bienvenido a la API de Notas".to_string(),
        }
    }
}

/// Body of every client error response, including rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
