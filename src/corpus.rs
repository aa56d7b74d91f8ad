//! Documents and corpus loading
use crate::error::{CvscanError, Result};
use crate::normalize;
use crate::walker::walk_text_files;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Normalized text of one resume, keyed by a caller-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub text: String,
}

/// Documents in iteration order, unique by id.
///
/// The iteration order is the tie-break order used when ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
    index: HashMap<u64, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document; an existing id keeps its position and takes the new text.
    pub fn insert(&mut self, id: u64, text: impl Into<String>) {
        let text = text.into();
        match self.index.get(&id) {
            Some(&pos) => self.documents[pos].text = text,
            None => {
                self.index.insert(id, self.documents.len());
                self.documents.push(Document { id, text });
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.index
            .get(&id)
            .map(|&pos| self.documents[pos].text.as_str())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Load raw text from a directory of `.txt` files or a JSON `{ "id": "text" }`
    /// object, cleaning every document with [`normalize::clean`].
    ///
    /// Directory files get ids `1..` in sorted path order. An unreadable file is
    /// skipped with a warning but still consumes its id.
    pub fn load(path: &Path, recursive: bool) -> Result<Self> {
        if path.is_dir() {
            Ok(Self::load_dir(path, recursive))
        } else {
            Self::load_json(path)
        }
    }

    fn load_dir(path: &Path, recursive: bool) -> Self {
        let mut corpus = Corpus::new();
        for (idx, file) in walk_text_files(path, recursive).into_iter().enumerate() {
            let id = idx as u64 + 1;
            match fs::read_to_string(&file) {
                Ok(raw) => {
                    debug!("Loaded document {id} from {}", file.display());
                    corpus.insert(id, normalize::clean(&raw));
                }
                Err(e) => warn!("Skipping unreadable document {}: {e}", file.display()),
            }
        }
        corpus
    }

    fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CvscanError::Corpus {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let raw: BTreeMap<u64, String> =
            serde_json::from_str(&content).map_err(|e| CvscanError::Corpus {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        Ok(raw
            .into_iter()
            .map(|(id, text)| (id, normalize::clean(&text)))
            .collect())
    }
}

impl<S: Into<String>> FromIterator<(u64, S)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (u64, S)>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for (id, text) in iter {
            corpus.insert(id, text);
        }
        corpus
    }
}
