//! File de destination des morceaux chargés

use crate::error::QueueError;
use crate::song::Song;

/// Longueur maximale par défaut d'une file
pub const DEFAULT_MAX_LENGTH: usize = 16384;

/// Morceau refusé par la file, rendu à l'appelant avec la cause
#[derive(Debug)]
pub struct Rejected {
    pub song: Song,
    pub error: QueueError,
}

impl Rejected {
    pub fn new(song: Song, error: QueueError) -> Self {
        Self { song, error }
    }
}

/// File de destination
///
/// En cas de succès la file devient propriétaire du morceau. En cas d'échec
/// elle ne le conserve pas : il est rendu dans [`Rejected`].
pub trait SongQueue {
    /// Ajoute un morceau en fin de file, ou à `position` si elle est fournie
    fn append(&mut self, song: Song, position: Option<usize>) -> Result<(), Rejected>;
}

/// File en mémoire bornée
#[derive(Debug)]
pub struct MemoryQueue {
    songs: Vec<Song>,
    max_length: usize,
}

impl MemoryQueue {
    pub fn new(max_length: usize) -> Self {
        Self {
            songs: Vec::new(),
            max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    /// Vide la file et rend les morceaux
    pub fn drain(&mut self) -> Vec<Song> {
        std::mem::take(&mut self.songs)
    }

    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl SongQueue for MemoryQueue {
    fn append(&mut self, song: Song, position: Option<usize>) -> Result<(), Rejected> {
        if self.songs.len() >= self.max_length {
            return Err(Rejected::new(song, QueueError::TooLarge));
        }

        match position {
            None => self.songs.push(song),
            Some(pos) if pos <= self.songs.len() => self.songs.insert(pos, song),
            Some(pos) => return Err(Rejected::new(song, QueueError::BadRange(pos))),
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MemoryQueue {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}
