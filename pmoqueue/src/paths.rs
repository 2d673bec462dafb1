//! Correspondance entre identifiants et chemins locaux

use std::path::{Path, PathBuf};

/// Racines locales utilisées pour résoudre les identifiants sans schéma
pub trait PathMapper: Send + Sync {
    /// Répertoire des playlists enregistrées, `None` si la fonctionnalité est désactivée
    fn stored_playlist_root(&self) -> Option<PathBuf>;

    /// Chemin absolu d'un chemin relatif à la bibliothèque
    ///
    /// Le chemin a déjà été validé ; aucune vérification de confinement
    /// n'est faite ici.
    fn map_library_path(&self, path: &str) -> Option<PathBuf>;
}

/// Racines fixes : répertoire musical et répertoire des playlists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryPaths {
    music_directory: Option<PathBuf>,
    playlist_directory: Option<PathBuf>,
}

impl LibraryPaths {
    pub fn new(music_directory: Option<PathBuf>, playlist_directory: Option<PathBuf>) -> Self {
        Self {
            music_directory,
            playlist_directory,
        }
    }

    pub fn with_music_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.music_directory = Some(dir.into());
        self
    }

    pub fn with_playlist_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.playlist_directory = Some(dir.into());
        self
    }

    pub fn music_directory(&self) -> Option<&Path> {
        self.music_directory.as_deref()
    }

    pub fn playlist_directory(&self) -> Option<&Path> {
        self.playlist_directory.as_deref()
    }
}

impl PathMapper for LibraryPaths {
    fn stored_playlist_root(&self) -> Option<PathBuf> {
        self.playlist_directory.clone()
    }

    fn map_library_path(&self, path: &str) -> Option<PathBuf> {
        self.music_directory.as_ref().map(|root| root.join(path))
    }
}
