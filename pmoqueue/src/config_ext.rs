//! Extension de pmoconfig pour le chargement de playlists
//!
//! ```yaml
//! library:
//!   music_directory: /srv/music      # vide : bibliothèque indisponible
//!   playlist_directory: playlists    # vide : playlists enregistrées désactivées
//! input:
//!   schemes: [http, https, mms, mmsh, mmst, mmsu]
//! queue:
//!   max_length: 16384
//! ```

use crate::loader::PlaylistLoader;
use crate::paths::LibraryPaths;
use crate::queue::{MemoryQueue, DEFAULT_MAX_LENGTH};
use crate::registry::DecoderRegistry;
use crate::uri::{StandardUriPolicy, DEFAULT_SCHEMES};
use anyhow::Result;
use pmoconfig::Config;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait d'extension pour pmoconfig::Config
pub trait QueueConfigExt {
    /// Racine de la bibliothèque musicale
    fn get_music_directory(&self) -> Result<Option<PathBuf>>;

    /// Répertoire des playlists enregistrées
    fn get_playlist_directory(&self) -> Result<Option<PathBuf>>;

    /// Schémas acceptés pour les morceaux chargés depuis une playlist
    fn get_supported_schemes(&self) -> Result<Vec<String>>;

    /// Nombre maximal de morceaux dans une file
    fn get_queue_max_length(&self) -> Result<usize>;
}

impl QueueConfigExt for Config {
    fn get_music_directory(&self) -> Result<Option<PathBuf>> {
        self.get_dir(&["library", "music_directory"])
    }

    fn get_playlist_directory(&self) -> Result<Option<PathBuf>> {
        self.get_dir(&["library", "playlist_directory"])
    }

    fn get_supported_schemes(&self) -> Result<Vec<String>> {
        match self.get_string_list(&["input", "schemes"])? {
            Some(schemes) => Ok(schemes),
            None => Ok(DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn get_queue_max_length(&self) -> Result<usize> {
        Ok(self
            .get_usize(&["queue", "max_length"])?
            .unwrap_or(DEFAULT_MAX_LENGTH))
    }
}

impl LibraryPaths {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.get_music_directory()?,
            config.get_playlist_directory()?,
        ))
    }
}

impl StandardUriPolicy {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.get_supported_schemes()?))
    }
}

impl MemoryQueue {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.get_queue_max_length()?))
    }
}

impl PlaylistLoader {
    /// Crée un chargeur dont les racines et les schémas viennent de la configuration
    pub fn from_config(config: &Config, decoders: Arc<dyn DecoderRegistry>) -> Result<Self> {
        let paths = LibraryPaths::from_config(config)?;
        tracing::info!(
            music_directory = ?paths.music_directory(),
            playlist_directory = ?paths.playlist_directory(),
            "Playlist loader configured"
        );
        Ok(Self::new(decoders, Arc::new(paths))
            .with_policy(Arc::new(StandardUriPolicy::from_config(config)?)))
    }
}
