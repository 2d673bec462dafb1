//! Flux d'entrée génériques (octets bruts d'une ressource locale ou distante)
//!
//! Le chargeur n'ouvre un flux que lorsqu'aucun plugin n'a su ouvrir la
//! playlist directement ; le flux est alors fermé (drop) par celui qui l'a
//! ouvert, après la source de playlist construite dessus.

use crate::uri::{uri_scheme, uri_suffix};
use anyhow::{bail, Context};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Flux d'octets ouvert
pub trait InputStream: Read + Send {
    /// URI (ou chemin) d'origine du flux
    fn uri(&self) -> &str;

    /// Type MIME annoncé par le transport, s'il est connu
    fn mime_type(&self) -> Option<&str> {
        None
    }

    /// Revient au début du flux
    ///
    /// Utilisé par le registre entre deux tentatives de détection de format.
    fn rewind(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stream is not seekable",
        ))
    }
}

/// Ouvreur de flux d'entrée
pub trait InputOpener: Send + Sync {
    /// Ouvre un flux sur une URI
    fn open(&self, uri: &str) -> anyhow::Result<Box<dyn InputStream>>;

    /// Ouvre un flux sur un chemin du système de fichiers
    fn open_path(&self, path: &Path) -> anyhow::Result<Box<dyn InputStream>>;
}

/// Type MIME des formats de playlist courants, d'après l'extension
pub fn playlist_mime_type(suffix: &str) -> Option<&'static str> {
    match suffix.to_ascii_lowercase().as_str() {
        "m3u" => Some("audio/x-mpegurl"),
        "m3u8" => Some("application/vnd.apple.mpegurl"),
        "pls" => Some("audio/x-scpls"),
        "xspf" => Some("application/xspf+xml"),
        "asx" => Some("video/x-ms-asf"),
        _ => None,
    }
}

/// Flux sur un fichier local
pub struct FileInput {
    uri: String,
    mime_type: Option<&'static str>,
    reader: BufReader<File>,
}

impl FileInput {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let uri = path.to_string_lossy().into_owned();
        let mime_type = uri_suffix(&uri).and_then(playlist_mime_type);
        Ok(Self {
            uri,
            mime_type,
            reader: BufReader::new(file),
        })
    }
}

impl Read for FileInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl InputStream for FileInput {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0)).map(|_| ())
    }
}

/// Ouvreur limité au système de fichiers local
///
/// Accepte les chemins absolus et les URI `file://` ; tout autre schéma est
/// une erreur (le transport distant est fourni par l'application).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsInputOpener;

impl InputOpener for FsInputOpener {
    fn open(&self, uri: &str) -> anyhow::Result<Box<dyn InputStream>> {
        let path = match uri_scheme(uri) {
            Some(scheme) if scheme.eq_ignore_ascii_case("file") => {
                PathBuf::from(&uri[scheme.len() + "://".len()..])
            }
            Some(scheme) => bail!("Unsupported scheme '{}' in {}", scheme, uri),
            None if uri.starts_with('/') => PathBuf::from(uri),
            None => bail!("Not an absolute path: {}", uri),
        };
        self.open_path(&path)
    }

    fn open_path(&self, path: &Path) -> anyhow::Result<Box<dyn InputStream>> {
        Ok(Box::new(FileInput::open(path)?))
    }
}
