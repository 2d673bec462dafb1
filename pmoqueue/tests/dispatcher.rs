mod common;

use common::*;
use pmoqueue::{LibraryPaths, LoadError, MemoryQueue, PlaylistLoader, QueueError};
use std::sync::Arc;

fn loader(
    journal: &Arc<Journal>,
    registry: FakeRegistry,
    input: FakeInput,
    paths: LibraryPaths,
) -> PlaylistLoader {
    PlaylistLoader::new(
        Arc::new(registry),
        Arc::new(RecordingPaths::new(paths, journal.clone())),
    )
    .with_input(Arc::new(input))
}

fn path_events(journal: &Journal) -> Vec<String> {
    journal
        .events()
        .into_iter()
        .filter(|e| e.starts_with("paths:"))
        .collect()
}

#[test]
fn test_scheme_uri_never_consults_local_roots() {
    let journal = Journal::new();
    let registry = FakeRegistry::new(journal.clone()).with_uri("http://x/y.m3u", "http://x/a.mp3");
    let loader = loader(&journal, registry, FakeInput::new(journal.clone()), default_paths());

    let mut queue = MemoryQueue::default();
    loader.open_into_queue("http://x/y.m3u", &mut queue).unwrap();

    assert_eq!(uris(&queue), vec!["http://x/a.mp3"]);
    assert!(path_events(&journal).is_empty());
}

#[test]
fn test_scheme_uri_failure_is_final() {
    let journal = Journal::new();
    let loader = loader(
        &journal,
        FakeRegistry::new(journal.clone()),
        FakeInput::new(journal.clone()),
        default_paths(),
    );

    let mut queue = MemoryQueue::default();
    let err = loader
        .open_into_queue("http://x/y.m3u", &mut queue)
        .unwrap_err();

    assert!(matches!(err, LoadError::NoSuchPlaylist));
    assert!(path_events(&journal).is_empty());
    assert_eq!(
        journal.events(),
        vec!["registry:uri:http://x/y.m3u", "input:http://x/y.m3u"]
    );
}

#[test]
fn test_missing_stored_playlist_falls_through_to_library() {
    let journal = Journal::new();
    let input = FakeInput::new(journal.clone()).with("/music/myplaylist", "#LIST\nhttp://x/a.mp3");
    let loader = loader(
        &journal,
        FakeRegistry::new(journal.clone()),
        input,
        default_paths(),
    );

    let mut queue = MemoryQueue::default();
    loader.open_into_queue("myplaylist", &mut queue).unwrap();

    assert_eq!(uris(&queue), vec!["http://x/a.mp3"]);
    assert_eq!(
        path_events(&journal),
        vec!["paths:stored_root", "paths:map:myplaylist"]
    );
    // la playlist enregistrée a bien été cherchée avant la bibliothèque
    let events = journal.events();
    let stored = events
        .iter()
        .position(|e| e == "input:/playlists/myplaylist")
        .unwrap();
    let library = events
        .iter()
        .position(|e| e == "input:/music/myplaylist")
        .unwrap();
    assert!(stored < library);
}

#[test]
fn test_stored_playlist_found_skips_library() {
    let journal = Journal::new();
    let input = FakeInput::new(journal.clone())
        .with("/playlists/myplaylist", "#LIST\nhttp://x/stored.mp3")
        .with("/music/myplaylist", "#LIST\nhttp://x/library.mp3");
    let loader = loader(
        &journal,
        FakeRegistry::new(journal.clone()),
        input,
        default_paths(),
    );

    let mut queue = MemoryQueue::default();
    loader.open_into_queue("myplaylist", &mut queue).unwrap();

    assert_eq!(uris(&queue), vec!["http://x/stored.mp3"]);
    assert_eq!(path_events(&journal), vec!["paths:stored_root"]);
}

#[test]
fn test_disabled_playlist_directory_is_final() {
    let journal = Journal::new();
    let input = FakeInput::new(journal.clone()).with("/music/myplaylist", "#LIST\nhttp://x/a.mp3");
    let loader = loader(
        &journal,
        FakeRegistry::new(journal.clone()),
        input,
        LibraryPaths::default().with_music_directory("/music"),
    );

    let mut queue = MemoryQueue::default();
    let err = loader.open_into_queue("myplaylist", &mut queue).unwrap_err();

    assert!(matches!(err, LoadError::Disabled));
    assert!(queue.is_empty());
    assert_eq!(path_events(&journal), vec!["paths:stored_root"]);
}

#[test]
fn test_stored_playlist_queue_failure_is_final() {
    let journal = Journal::new();
    let input = FakeInput::new(journal.clone())
        .with("/playlists/myplaylist", "#LIST\nhttp://x/a.mp3")
        .with("/music/myplaylist", "#LIST\nhttp://x/b.mp3");
    let loader = loader(
        &journal,
        FakeRegistry::new(journal.clone()),
        input,
        default_paths(),
    );

    let mut queue = MemoryQueue::new(0);
    let err = loader.open_into_queue("myplaylist", &mut queue).unwrap_err();

    assert!(matches!(err, LoadError::Queue(QueueError::TooLarge)));
    assert_eq!(path_events(&journal), vec!["paths:stored_root"]);
}

#[test]
fn test_unsafe_paths_rejected_without_io() {
    for identifier in ["../etc/passwd", "/etc/passwd", "a/../../b", ""] {
        let journal = Journal::new();
        let input = FakeInput::new(journal.clone()).with("/etc/passwd", "#LIST\nhttp://x/a.mp3");
        let loader = loader(
            &journal,
            FakeRegistry::new(journal.clone()),
            input,
            default_paths(),
        );

        let mut queue = MemoryQueue::default();
        let err = loader.open_into_queue(identifier, &mut queue).unwrap_err();

        assert!(matches!(err, LoadError::NoSuchPlaylist), "{identifier:?}");
        assert!(journal.events().is_empty(), "{identifier:?}: {:?}", journal.events());
    }
}

#[test]
fn test_nested_library_path_skips_stored_playlists() {
    let journal = Journal::new();
    let registry =
        FakeRegistry::new(journal.clone()).with_path("/music/rock/best.m3u", "http://x/a.mp3");
    let loader = loader(&journal, registry, FakeInput::new(journal.clone()), default_paths());

    let mut queue = MemoryQueue::default();
    loader.open_into_queue("rock/best.m3u", &mut queue).unwrap();

    assert_eq!(uris(&queue), vec!["http://x/a.mp3"]);
    assert_eq!(path_events(&journal), vec!["paths:map:rock/best.m3u"]);
}

#[test]
fn test_unmapped_library_path() {
    let journal = Journal::new();
    let loader = loader(
        &journal,
        FakeRegistry::new(journal.clone()),
        FakeInput::new(journal.clone()),
        LibraryPaths::default(),
    );

    let mut queue = MemoryQueue::default();
    let err = loader
        .open_into_queue("rock/best.m3u", &mut queue)
        .unwrap_err();

    assert!(matches!(err, LoadError::NoSuchPlaylist));
    assert_eq!(journal.events(), vec!["paths:map:rock/best.m3u"]);
}
