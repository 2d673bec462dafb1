//! Boucle de chargement d'une source de playlist dans une file

use crate::error::{LoadError, Result};
use crate::queue::SongQueue;
use crate::registry::PlaylistProvider;
use crate::song::accept_song;
use crate::uri::UriPolicy;
use tracing::{debug, trace};

/// Bilan d'un chargement réussi
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Morceaux transférés dans la file
    pub appended: usize,
    /// Morceaux écartés par le filtre d'acceptation
    pub skipped: usize,
}

/// Vide `source` dans `dest`
///
/// Les morceaux refusés par [`accept_song`] sont libérés sans erreur. Le
/// premier échec d'ajout interrompt la boucle et est renvoyé tel quel ; les
/// morceaux déjà ajoutés restent dans la file. La source n'est pas fermée
/// ici : c'est à celui qui l'a ouverte de la libérer.
pub fn load_into_queue(
    source: &mut dyn PlaylistProvider,
    dest: &mut dyn SongQueue,
    policy: &dyn UriPolicy,
) -> Result<LoadStats> {
    let mut stats = LoadStats::default();

    while let Some(song) = source.read() {
        if !accept_song(&song, policy) {
            trace!(uri = song.uri(), "Skipping song");
            stats.skipped += 1;
            continue;
        }

        if let Err(rejected) = dest.append(song, None) {
            debug!(
                uri = rejected.song.uri(),
                error = %rejected.error,
                appended = stats.appended,
                "Queue refused song, aborting load"
            );
            return Err(LoadError::Queue(rejected.error));
        }
        stats.appended += 1;
    }

    debug!(appended = stats.appended, skipped = stats.skipped, "Playlist loaded");
    Ok(stats)
}
