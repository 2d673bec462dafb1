//! PlaylistLoader : résolution d'un identifiant et chargement dans une file
//!
//! L'identifiant est interprété, dans cet ordre :
//!
//! 1. URI avec schéma → ouverture distante (résultat définitif)
//! 2. nom de playlist enregistrée → répertoire des playlists ; seul un
//!    `NoSuchPlaylist` fait passer à l'étape suivante
//! 3. chemin sûr relatif à la bibliothèque → répertoire musical
//! 4. sinon `NoSuchPlaylist`
//!
//! Chaque ouverture essaie une liste ordonnée de paliers (`OpenTier`) ;
//! le premier qui produit une source de playlist la charge, la ferme, puis
//! ferme le flux qu'il a lui-même ouvert.

use crate::error::{LoadError, Result};
use crate::input::{FsInputOpener, InputOpener};
use crate::load::{load_into_queue, LoadStats};
use crate::paths::PathMapper;
use crate::queue::SongQueue;
use crate::registry::{DecoderRegistry, PlaylistProvider};
use crate::uri::{StandardUriPolicy, UriPolicy};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Manière d'ouvrir une playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenTier {
    /// Plugin gérant son propre transport, choisi d'après le schéma
    Uri,
    /// Plugin gérant ses propres I/O sur un fichier local
    Path,
    /// Flux d'entrée générique puis détection du format
    Stream,
}

const REMOTE_TIERS: &[OpenTier] = &[OpenTier::Uri, OpenTier::Stream];
const LOCAL_TIERS: &[OpenTier] = &[OpenTier::Path, OpenTier::Stream];

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Uri(&'a str),
    Path(&'a Path),
}

impl Target<'_> {
    fn hint(&self) -> Cow<'_, str> {
        match self {
            Target::Uri(uri) => Cow::Borrowed(*uri),
            Target::Path(path) => path.to_string_lossy(),
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Uri(uri) => f.write_str(uri),
            Target::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raison pour laquelle un palier n'a rien ouvert
///
/// Diagnostic seulement : l'appelant ne voit que `NoSuchPlaylist`.
#[derive(Debug)]
enum Miss {
    /// Aucun plugin n'a pris en charge l'URI ou le chemin
    NoHandler,
    /// Le flux d'entrée n'a pas pu être ouvert
    Input(anyhow::Error),
    /// Flux ouvert mais format non reconnu
    Unrecognized,
}

enum Attempt {
    Loaded(Result<LoadStats>),
    Missed(Miss),
}

/// Résout des identifiants de playlist et charge leurs morceaux dans une file
///
/// Les collaborateurs (décodeurs, flux, racines, règles de classification)
/// sont passés explicitement ; le chargeur ne conserve aucun état mutable et
/// peut être partagé entre threads.
///
/// # Exemple
///
/// ```no_run
/// use pmoqueue::{LibraryPaths, MemoryQueue, PlaylistLoader, PluginRegistry};
/// use std::sync::Arc;
///
/// let registry = PluginRegistry::new(); // + plugins de l'application
/// let paths = LibraryPaths::default()
///     .with_music_directory("/srv/music")
///     .with_playlist_directory("/srv/playlists");
/// let loader = PlaylistLoader::new(Arc::new(registry), Arc::new(paths));
///
/// let mut queue = MemoryQueue::default();
/// match loader.open_into_queue("http://radio.example/live.pls", &mut queue) {
///     Ok(stats) => println!("{} morceaux ajoutés", stats.appended),
///     Err(e) => eprintln!("Chargement impossible : {}", e),
/// }
/// ```
#[derive(Clone)]
pub struct PlaylistLoader {
    decoders: Arc<dyn DecoderRegistry>,
    input: Arc<dyn InputOpener>,
    paths: Arc<dyn PathMapper>,
    policy: Arc<dyn UriPolicy>,
}

impl PlaylistLoader {
    /// Crée un chargeur avec les flux locaux et la politique par défaut
    pub fn new(decoders: Arc<dyn DecoderRegistry>, paths: Arc<dyn PathMapper>) -> Self {
        Self {
            decoders,
            input: Arc::new(FsInputOpener),
            paths,
            policy: Arc::new(StandardUriPolicy::default()),
        }
    }

    /// Remplace l'ouvreur de flux (transport distant de l'application)
    pub fn with_input(mut self, input: Arc<dyn InputOpener>) -> Self {
        self.input = input;
        self
    }

    /// Remplace les règles de classification et de filtrage
    pub fn with_policy(mut self, policy: Arc<dyn UriPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &dyn UriPolicy {
        self.policy.as_ref()
    }

    /// Résout `uri` et ajoute les morceaux acceptés à `dest`
    ///
    /// Aucune erreur ne déclenche de nouvelle tentative, à l'exception du
    /// passage « playlist enregistrée introuvable » → bibliothèque.
    pub fn open_into_queue(&self, uri: &str, dest: &mut dyn SongQueue) -> Result<LoadStats> {
        debug!(uri, "Resolving playlist");

        if self.policy.has_scheme(uri) {
            return self.open_remote_into_queue(uri, dest);
        }

        if self.policy.is_valid_stored_playlist_name(uri) {
            match self.open_stored_into_queue(uri, dest) {
                Err(LoadError::NoSuchPlaylist) => {}
                other => return other,
            }
        }

        if self.policy.is_safe_library_path(uri) {
            return self.open_library_into_queue(uri, dest);
        }

        Err(LoadError::NoSuchPlaylist)
    }

    /// Charge une source déjà ouverte ; la fermer reste à la charge de l'appelant
    pub fn load_source_into_queue(
        &self,
        source: &mut dyn PlaylistProvider,
        dest: &mut dyn SongQueue,
    ) -> Result<LoadStats> {
        load_into_queue(source, dest, self.policy.as_ref())
    }

    fn open_remote_into_queue(&self, uri: &str, dest: &mut dyn SongQueue) -> Result<LoadStats> {
        debug_assert!(self.policy.has_scheme(uri));
        self.open_with_tiers(Target::Uri(uri), REMOTE_TIERS, dest)
    }

    fn open_path_into_queue(&self, path: &Path, dest: &mut dyn SongQueue) -> Result<LoadStats> {
        self.open_with_tiers(Target::Path(path), LOCAL_TIERS, dest)
    }

    /// Playlist du répertoire des playlists enregistrées
    fn open_stored_into_queue(&self, name: &str, dest: &mut dyn SongQueue) -> Result<LoadStats> {
        debug_assert!(self.policy.is_valid_stored_playlist_name(name));

        let Some(root) = self.paths.stored_playlist_root() else {
            debug!(name, "No playlist directory configured");
            return Err(LoadError::Disabled);
        };
        self.open_path_into_queue(&root.join(name), dest)
    }

    /// Playlist du répertoire musical
    fn open_library_into_queue(&self, path: &str, dest: &mut dyn SongQueue) -> Result<LoadStats> {
        debug_assert!(self.policy.is_safe_library_path(path));

        match self.paths.map_library_path(path) {
            Some(path_fs) => self.open_path_into_queue(&path_fs, dest),
            None => {
                debug!(path, "Library path cannot be mapped");
                Err(LoadError::NoSuchPlaylist)
            }
        }
    }

    fn open_with_tiers(
        &self,
        target: Target<'_>,
        tiers: &[OpenTier],
        dest: &mut dyn SongQueue,
    ) -> Result<LoadStats> {
        for &tier in tiers {
            match self.try_tier(tier, target, dest) {
                Attempt::Loaded(result) => return result,
                Attempt::Missed(miss) => report_miss(tier, target, miss),
            }
        }
        Err(LoadError::NoSuchPlaylist)
    }

    fn try_tier(&self, tier: OpenTier, target: Target<'_>, dest: &mut dyn SongQueue) -> Attempt {
        let direct = match (tier, target) {
            (OpenTier::Uri, Target::Uri(uri)) => self.decoders.open_uri(uri),
            (OpenTier::Path, Target::Path(path)) => self.decoders.open_path(path),
            (OpenTier::Stream, _) => return self.try_stream(target, dest),
            _ => None,
        };

        match direct {
            Some(provider) => self.drain(provider, dest),
            None => Attempt::Missed(Miss::NoHandler),
        }
    }

    fn try_stream(&self, target: Target<'_>, dest: &mut dyn SongQueue) -> Attempt {
        let opened = match target {
            Target::Uri(uri) => self.input.open(uri),
            Target::Path(path) => self.input.open_path(path),
        };
        let mut stream = match opened {
            Ok(stream) => stream,
            Err(e) => return Attempt::Missed(Miss::Input(e)),
        };

        let attempt = match self.decoders.open_stream(stream.as_mut(), &target.hint()) {
            Some(provider) => self.drain(provider, dest),
            None => Attempt::Missed(Miss::Unrecognized),
        };

        // la source est déjà fermée, le flux ouvert par ce palier suit
        drop(stream);
        attempt
    }

    /// Charge puis ferme la source
    fn drain(&self, mut provider: Box<dyn PlaylistProvider>, dest: &mut dyn SongQueue) -> Attempt {
        let result = self.load_source_into_queue(provider.as_mut(), dest);
        drop(provider);
        Attempt::Loaded(result)
    }
}

fn report_miss(tier: OpenTier, target: Target<'_>, miss: Miss) {
    match (miss, target) {
        (Miss::Input(e), Target::Uri(_)) => warn!("Failed to open {}: {:#}", target, e),
        (miss, _) => debug!(?tier, target = %target, reason = ?miss, "Open tier missed"),
    }
}
