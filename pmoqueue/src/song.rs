//! Song : morceau produit par un plugin de playlist, et filtre d'acceptation

use crate::uri::{is_local_file_uri, UriPolicy};
use std::time::Duration;

/// Provenance d'un morceau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongOrigin {
    /// Morceau décrit par une URI, hors base de données
    Remote,
    /// Fichier référencé par la base de la bibliothèque musicale
    Library,
}

/// Un morceau lu dans une playlist
///
/// `Song` n'est volontairement pas `Clone` : un morceau est soit transféré
/// dans la file de destination, soit libéré par la boucle de chargement.
#[derive(Debug, PartialEq, Eq)]
pub struct Song {
    uri: String,
    origin: SongOrigin,
    title: Option<String>,
    duration: Option<Duration>,
}

impl Song {
    /// Crée un morceau distant (hors base)
    pub fn remote(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            origin: SongOrigin::Remote,
            title: None,
            duration: None,
        }
    }

    /// Crée un morceau appartenant à la bibliothèque locale
    pub fn library(uri: impl Into<String>) -> Self {
        Self {
            origin: SongOrigin::Library,
            ..Self::remote(uri)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn origin(&self) -> SongOrigin {
        self.origin
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Vrai si le morceau désigne un fichier du système de fichiers local
    pub fn is_file(&self) -> bool {
        self.origin == SongOrigin::Library || is_local_file_uri(&self.uri)
    }
}

/// Détermine si un morceau peut être ajouté à la file
///
/// Les fichiers locaux sont refusés : le contenu d'une playlist ne doit pas
/// permettre d'injecter des chemins arbitraires. Le morceau doit ensuite
/// porter un schéma, et ce schéma doit être supporté.
pub fn accept_song(song: &Song, policy: &dyn UriPolicy) -> bool {
    !song.is_file() && policy.has_scheme(song.uri()) && policy.scheme_is_supported(song.uri())
}
