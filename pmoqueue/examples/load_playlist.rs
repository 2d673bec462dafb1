//! Charge les playlists passées en arguments dans une file en mémoire
//!
//! ```bash
//! cargo run -p pmoqueue --example load_playlist -- favorites rock/best.m3u /tmp/x.m3u
//! ```
//!
//! Les répertoires viennent de la configuration pmoconfig
//! (`library.music_directory`, `library.playlist_directory`).

use std::sync::Arc;

use pmoqueue::{
    InputStream, MemoryQueue, PlaylistLoader, PlaylistPlugin, PlaylistProvider, PluginRegistry,
    Song,
};
use tracing_subscriber::EnvFilter;

/// Lecteur M3U rudimentaire : une URI par ligne
struct M3uPlugin;

impl PlaylistPlugin for M3uPlugin {
    fn name(&self) -> &str {
        "m3u"
    }

    fn suffixes(&self) -> &[&str] {
        &["m3u", "m3u8"]
    }

    fn mime_types(&self) -> &[&str] {
        &["audio/x-mpegurl", "application/vnd.apple.mpegurl"]
    }

    fn open_stream(&self, stream: &mut dyn InputStream) -> Option<Box<dyn PlaylistProvider>> {
        let mut content = String::new();
        stream.read_to_string(&mut content).ok()?;
        let songs: Vec<Song> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Song::remote)
            .collect();
        Some(Box::new(songs.into_iter()))
    }
}

fn main() -> anyhow::Result<()> {
    let config = pmoconfig::get_config();

    let level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "INFO".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase())),
        )
        .try_init();

    let registry = PluginRegistry::new().with_plugin(M3uPlugin);
    let loader = PlaylistLoader::from_config(&config, Arc::new(registry))?;
    let mut queue = MemoryQueue::from_config(&config)?;

    let identifiers: Vec<String> = std::env::args().skip(1).collect();
    if identifiers.is_empty() {
        eprintln!("usage: load_playlist <playlist>...");
        std::process::exit(2);
    }

    for identifier in &identifiers {
        match loader.open_into_queue(identifier, &mut queue) {
            Ok(stats) => println!(
                "{identifier}: {} ajouté(s), {} ignoré(s)",
                stats.appended, stats.skipped
            ),
            Err(e) => println!("{identifier}: {e}"),
        }
    }

    println!("=====================");
    println!("File : {} morceau(x)", queue.len());
    for (pos, song) in queue.iter().enumerate() {
        println!("{:>4}  {}", pos, song.uri());
    }

    Ok(())
}
