//! Registre des plugins de playlist
//!
//! Le décodage d'un format donné (M3U, PLS, XSPF…) est délégué à des
//! [`PlaylistPlugin`] fournis par l'application. Le registre choisit le
//! plugin à utiliser :
//!
//! - `open_uri` : d'après le schéma de l'URI (plugins gérant leur propre transport)
//! - `open_path` : d'après l'extension du fichier
//! - `open_stream` : d'après le type MIME du flux, puis d'après l'extension
//!   de l'URI, en rembobinant le flux entre deux candidats

use crate::input::InputStream;
use crate::song::Song;
use crate::uri::{uri_scheme, uri_suffix};
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Source de playlist ouverte
///
/// Fermée par `Drop`, exactement une fois, par le code qui l'a ouverte.
pub trait PlaylistProvider: Send {
    /// Morceau suivant, `None` quand la playlist est épuisée
    fn read(&mut self) -> Option<Song>;
}

impl<I> PlaylistProvider for I
where
    I: Iterator<Item = Song> + Send,
{
    fn read(&mut self) -> Option<Song> {
        self.next()
    }
}

/// Accès aux décodeurs de playlist
pub trait DecoderRegistry: Send + Sync {
    /// Ouverture directe d'une URI, sans flux générique
    fn open_uri(&self, uri: &str) -> Option<Box<dyn PlaylistProvider>>;

    /// Ouverture directe d'un fichier local par un plugin gérant ses propres I/O
    fn open_path(&self, path: &Path) -> Option<Box<dyn PlaylistProvider>>;

    /// Détection du format sur un flux déjà ouvert
    ///
    /// `hint` est l'URI ou le chemin d'origine, utilisé pour l'extension.
    fn open_stream(
        &self,
        stream: &mut dyn InputStream,
        hint: &str,
    ) -> Option<Box<dyn PlaylistProvider>>;
}

/// Décodeur d'un format de playlist
///
/// Toutes les méthodes ont une implémentation par défaut : un plugin ne
/// déclare que les capacités qu'il possède.
pub trait PlaylistPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Schémas pris en charge par `open_uri`
    fn schemes(&self) -> &[&str] {
        &[]
    }

    /// Extensions reconnues (sans le point)
    fn suffixes(&self) -> &[&str] {
        &[]
    }

    /// Types MIME reconnus
    fn mime_types(&self) -> &[&str] {
        &[]
    }

    fn open_uri(&self, _uri: &str) -> Option<Box<dyn PlaylistProvider>> {
        None
    }

    fn open_path(&self, _path: &Path) -> Option<Box<dyn PlaylistProvider>> {
        None
    }

    /// Le plugin lit dans `stream` ce dont il a besoin ; la source renvoyée
    /// ne conserve pas de référence vers le flux.
    fn open_stream(&self, _stream: &mut dyn InputStream) -> Option<Box<dyn PlaylistProvider>> {
        None
    }
}

/// Registre ordonné de plugins (premier enregistré, premier essayé)
#[derive(Default, Clone)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn PlaylistPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un plugin en fin de liste
    pub fn register(&mut self, plugin: Arc<dyn PlaylistPlugin>) -> &mut Self {
        debug!(plugin = plugin.name(), "Registering playlist plugin");
        self.plugins.push(plugin);
        self
    }

    pub fn with_plugin(mut self, plugin: impl PlaylistPlugin + 'static) -> Self {
        self.register(Arc::new(plugin));
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Essaie les candidats dans l'ordre
    ///
    /// `Break` arrête la détection : source trouvée, ou flux impossible à
    /// rembobiner après une tentative (`Break(None)`). `Continue` : aucun
    /// candidat n'a reconnu le flux, qui est revenu au début.
    fn try_candidates<'a>(
        &self,
        candidates: impl Iterator<Item = &'a Arc<dyn PlaylistPlugin>>,
        stream: &mut dyn InputStream,
    ) -> ControlFlow<Option<Box<dyn PlaylistProvider>>> {
        for plugin in candidates {
            if let Some(provider) = plugin.open_stream(stream) {
                debug!(plugin = plugin.name(), uri = stream.uri(), "Playlist detected");
                return ControlFlow::Break(Some(provider));
            }
            // le plugin a pu consommer des octets
            if let Err(e) = stream.rewind() {
                debug!(uri = stream.uri(), error = %e, "Cannot rewind stream, detection stopped");
                return ControlFlow::Break(None);
            }
        }
        ControlFlow::Continue(())
    }
}

fn contains_ignore_case(list: &[&str], value: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(value))
}

/// `audio/x-mpegurl; charset=utf-8` → `audio/x-mpegurl`
fn base_mime_type(mime: &str) -> &str {
    mime.split(';').next().unwrap_or(mime).trim()
}

impl DecoderRegistry for PluginRegistry {
    fn open_uri(&self, uri: &str) -> Option<Box<dyn PlaylistProvider>> {
        let scheme = uri_scheme(uri)?;
        self.plugins
            .iter()
            .filter(|p| contains_ignore_case(p.schemes(), scheme))
            .find_map(|p| {
                trace!(plugin = p.name(), uri, "Trying open_uri");
                p.open_uri(uri)
            })
    }

    fn open_path(&self, path: &Path) -> Option<Box<dyn PlaylistProvider>> {
        let suffix = path.extension()?.to_str()?;
        self.plugins
            .iter()
            .filter(|p| contains_ignore_case(p.suffixes(), suffix))
            .find_map(|p| {
                trace!(plugin = p.name(), path = %path.display(), "Trying open_path");
                p.open_path(path)
            })
    }

    fn open_stream(
        &self,
        stream: &mut dyn InputStream,
        hint: &str,
    ) -> Option<Box<dyn PlaylistProvider>> {
        let mime = stream.mime_type().map(|m| base_mime_type(m).to_string());
        let matches_mime = |plugin: &Arc<dyn PlaylistPlugin>| {
            mime.as_deref()
                .is_some_and(|mime| contains_ignore_case(plugin.mime_types(), mime))
        };

        let by_mime = self.plugins.iter().filter(|p| matches_mime(*p));
        if let ControlFlow::Break(found) = self.try_candidates(by_mime, stream) {
            return found;
        }

        // un plugin déjà essayé d'après le type MIME ne l'est pas une seconde fois
        let suffix = uri_suffix(hint)?;
        let by_suffix = self
            .plugins
            .iter()
            .filter(|p| !matches_mime(*p) && contains_ignore_case(p.suffixes(), suffix));
        match self.try_candidates(by_suffix, stream) {
            ControlFlow::Break(found) => found,
            ControlFlow::Continue(()) => None,
        }
    }
}
