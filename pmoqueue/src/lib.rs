//! # pmoqueue - Chargement de playlists dans une file de lecture
//!
//! Cette crate résout un identifiant de playlist et ajoute les morceaux
//! qu'elle contient à une file de destination :
//! - URI distante (`http://…/radio.pls`), ouverte par un plugin ou par flux
//! - Nom de playlist enregistrée, dans le répertoire des playlists
//! - Chemin relatif à la bibliothèque musicale
//!
//! # Architecture
//!
//! - **PlaylistLoader** : point d'entrée, ordre de résolution et paliers d'ouverture
//! - **PluginRegistry** : choix du décodeur (schéma, extension, type MIME)
//! - **load_into_queue** : boucle de chargement et filtre d'acceptation
//! - **SongQueue** : file de destination (`MemoryQueue` fournie)
//!
//! Le décodage des formats et le transport distant sont fournis par
//! l'application via [`PlaylistPlugin`] et [`InputOpener`]. Les morceaux
//! désignant des fichiers locaux ne sont jamais ajoutés depuis une playlist.
//!
//! # Exemple d'utilisation
//!
//! ```no_run
//! use pmoqueue::{MemoryQueue, PlaylistLoader, PluginRegistry};
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = pmoconfig::get_config();
//! let registry = Arc::new(PluginRegistry::new());
//! let loader = PlaylistLoader::from_config(&config, registry)?;
//!
//! let mut queue = MemoryQueue::from_config(&config)?;
//! loader.open_into_queue("favorites", &mut queue)?;
//! for song in &queue {
//!     println!("{}", song.uri());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod load;
mod loader;
mod paths;
mod queue;
mod registry;
mod song;

pub mod input;
pub mod uri;

#[cfg(feature = "pmoconfig")]
mod config_ext;

// Réexports publics
pub use error::{LoadError, QueueError, Result};
pub use input::{FsInputOpener, InputOpener, InputStream};
pub use load::{load_into_queue, LoadStats};
pub use loader::PlaylistLoader;
pub use paths::{LibraryPaths, PathMapper};
pub use queue::{MemoryQueue, Rejected, SongQueue, DEFAULT_MAX_LENGTH};
pub use registry::{DecoderRegistry, PlaylistPlugin, PlaylistProvider, PluginRegistry};
pub use song::{accept_song, Song, SongOrigin};
pub use uri::{StandardUriPolicy, UriPolicy};

#[cfg(feature = "pmoconfig")]
pub use config_ext::QueueConfigExt;
