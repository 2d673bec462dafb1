//! Types d'erreurs pour pmoqueue

/// Erreurs renvoyées par la file de destination lors d'un ajout
///
/// Elles sont remontées telles quelles à l'appelant de
/// [`PlaylistLoader::open_into_queue`](crate::PlaylistLoader::open_into_queue).
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is full")]
    TooLarge,

    #[error("Position out of range: {0}")]
    BadRange(usize),

    #[error("Song refused by queue: {0}")]
    Denied(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Résultat d'une résolution/chargement de playlist
///
/// Taxonomie fermée : toute cause d'échec d'ouverture (I/O, format inconnu,
/// identifiant non reconnu) est ramenée à `NoSuchPlaylist`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("No such playlist")]
    NoSuchPlaylist,

    #[error("Stored playlists are disabled")]
    Disabled,

    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl LoadError {
    /// Vrai si l'erreur signifie « rien n'a pu être ouvert »
    pub fn is_no_such_playlist(&self) -> bool {
        matches!(self, LoadError::NoSuchPlaylist)
    }
}

/// Type Result spécialisé pour pmoqueue
pub type Result<T> = std::result::Result<T, LoadError>;
