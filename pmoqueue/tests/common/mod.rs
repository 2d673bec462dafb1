//! Collaborateurs instrumentés pour les tests d'intégration

#![allow(dead_code)]

use anyhow::anyhow;
use pmoqueue::{
    DecoderRegistry, InputOpener, InputStream, LibraryPaths, PathMapper, PlaylistProvider, Song,
};
use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Journal partagé des ouvertures/fermetures et des appels aux collaborateurs
#[derive(Default)]
pub struct Journal {
    events: Mutex<Vec<String>>,
}

impl Journal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    pub fn stream_opens(&self) -> usize {
        self.count("stream:open")
    }

    pub fn stream_closes(&self) -> usize {
        self.count("stream:close")
    }

    pub fn source_opens(&self) -> usize {
        self.count("source:open")
    }

    pub fn source_closes(&self) -> usize {
        self.count("source:close")
    }
}

/// Contenu de playlist : une URI par ligne, préfixe `lib:` pour un morceau de la bibliothèque
pub fn parse_songs(content: &str) -> Vec<Song> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix("lib:") {
            Some(uri) => Song::library(uri),
            None => Song::remote(line),
        })
        .collect()
}

/// Source de playlist qui journalise sa fermeture et compte les morceaux produits
pub struct CountedSource {
    songs: std::vec::IntoIter<Song>,
    journal: Arc<Journal>,
}

impl CountedSource {
    pub fn new(songs: Vec<Song>, journal: Arc<Journal>) -> Self {
        journal.push("source:open");
        Self {
            songs: songs.into_iter(),
            journal,
        }
    }
}

impl Iterator for CountedSource {
    type Item = Song;

    fn next(&mut self) -> Option<Song> {
        let song = self.songs.next();
        if song.is_some() {
            self.journal.push("song:read");
        }
        song
    }
}

impl Drop for CountedSource {
    fn drop(&mut self) {
        self.journal.push("source:close");
    }
}

/// Registre de décodeurs factice
///
/// - `open_uri` / `open_path` réussissent pour les entrées déclarées
/// - `open_stream` reconnaît les flux commençant par `#LIST`
pub struct FakeRegistry {
    journal: Arc<Journal>,
    by_uri: HashMap<String, String>,
    by_path: HashMap<PathBuf, String>,
}

pub const MAGIC: &str = "#LIST\n";

impl FakeRegistry {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self {
            journal,
            by_uri: HashMap::new(),
            by_path: HashMap::new(),
        }
    }

    pub fn with_uri(mut self, uri: &str, content: &str) -> Self {
        self.by_uri.insert(uri.to_string(), content.to_string());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.by_path.insert(path.into(), content.to_string());
        self
    }
}

impl DecoderRegistry for FakeRegistry {
    fn open_uri(&self, uri: &str) -> Option<Box<dyn PlaylistProvider>> {
        self.journal.push(format!("registry:uri:{uri}"));
        let content = self.by_uri.get(uri)?;
        Some(Box::new(CountedSource::new(
            parse_songs(content),
            self.journal.clone(),
        )))
    }

    fn open_path(&self, path: &Path) -> Option<Box<dyn PlaylistProvider>> {
        self.journal
            .push(format!("registry:path:{}", path.display()));
        let content = self.by_path.get(path)?;
        Some(Box::new(CountedSource::new(
            parse_songs(content),
            self.journal.clone(),
        )))
    }

    fn open_stream(
        &self,
        stream: &mut dyn InputStream,
        hint: &str,
    ) -> Option<Box<dyn PlaylistProvider>> {
        self.journal.push(format!("registry:stream:{hint}"));
        let mut content = String::new();
        stream.read_to_string(&mut content).ok()?;
        let body = content.strip_prefix(MAGIC)?;
        Some(Box::new(CountedSource::new(
            parse_songs(body),
            self.journal.clone(),
        )))
    }
}

/// Flux en mémoire qui journalise sa fermeture
pub struct MemoryInput {
    uri: String,
    data: Cursor<Vec<u8>>,
    journal: Arc<Journal>,
}

impl Read for MemoryInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl InputStream for MemoryInput {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.data.set_position(0);
        Ok(())
    }
}

impl Drop for MemoryInput {
    fn drop(&mut self) {
        self.journal.push(format!("stream:close:{}", self.uri));
    }
}

/// Ouvreur de flux servant des contenus en mémoire, indexés par URI ou chemin
pub struct FakeInput {
    journal: Arc<Journal>,
    resources: HashMap<String, String>,
}

impl FakeInput {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self {
            journal,
            resources: HashMap::new(),
        }
    }

    pub fn with(mut self, location: impl Into<String>, content: &str) -> Self {
        self.resources.insert(location.into(), content.to_string());
        self
    }

    fn open_location(&self, location: &str) -> anyhow::Result<Box<dyn InputStream>> {
        self.journal.push(format!("input:{location}"));
        let content = self
            .resources
            .get(location)
            .ok_or_else(|| anyhow!("connection refused"))?;
        self.journal.push(format!("stream:open:{location}"));
        Ok(Box::new(MemoryInput {
            uri: location.to_string(),
            data: Cursor::new(content.as_bytes().to_vec()),
            journal: self.journal.clone(),
        }))
    }
}

impl InputOpener for FakeInput {
    fn open(&self, uri: &str) -> anyhow::Result<Box<dyn InputStream>> {
        self.open_location(uri)
    }

    fn open_path(&self, path: &Path) -> anyhow::Result<Box<dyn InputStream>> {
        self.open_location(&path.to_string_lossy())
    }
}

/// Racines fixes dont chaque consultation est journalisée
pub struct RecordingPaths {
    inner: LibraryPaths,
    journal: Arc<Journal>,
}

impl RecordingPaths {
    pub fn new(inner: LibraryPaths, journal: Arc<Journal>) -> Self {
        Self { inner, journal }
    }
}

impl PathMapper for RecordingPaths {
    fn stored_playlist_root(&self) -> Option<PathBuf> {
        self.journal.push("paths:stored_root");
        self.inner.stored_playlist_root()
    }

    fn map_library_path(&self, path: &str) -> Option<PathBuf> {
        self.journal.push(format!("paths:map:{path}"));
        self.inner.map_library_path(path)
    }
}

/// Racines utilisées par la plupart des tests
pub fn default_paths() -> LibraryPaths {
    LibraryPaths::default()
        .with_music_directory("/music")
        .with_playlist_directory("/playlists")
}

pub fn uris(queue: &pmoqueue::MemoryQueue) -> Vec<String> {
    queue.iter().map(|s| s.uri().to_string()).collect()
}
