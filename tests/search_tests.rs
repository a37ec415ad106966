use medialib_search::core::config::Config;
use medialib_search::entity::{Artist, File, LikedTrack, Track};
use medialib_search::search::query::{Query, QueryMode};
use medialib_search::{SearchOutcome, SearchService};
use tempfile::TempDir;

fn service(dir: &TempDir) -> SearchService {
    SearchService::new(Config::with_root(dir.path())).unwrap()
}

fn track(id: &str, title: &str, artist: &str) -> Track {
    Track {
        id: id.into(),
        path: format!("/music/{}.flac", id),
        title: title.into(),
        artist: artist.into(),
        album: "A Night at the Opera".into(),
        album_artist: artist.into(),
        bitrate: 1411,
        track_number: 11,
        year: 1975,
        year_string: "1975".into(),
        genre: "Rock".into(),
        md5: format!("md5-{}", id),
        artist_id: Some(format!("ar-{}", artist.to_lowercase().replace(' ', "-"))),
        created_at: "2024-01-01T00:00:00Z".into(),
        updated_at: "2024-01-01T00:00:00Z".into(),
        ..Default::default()
    }
}

fn ids<E>(outcome: SearchOutcome<E>, id: impl Fn(&E) -> String) -> Vec<String> {
    outcome.into_result().unwrap().iter().map(id).collect()
}

#[test]
fn word_prefix_and_phrase_both_find_the_track() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    service.index_entity(&track("t1", "Bohemian Rhapsody", "Queen")).unwrap();

    let by_prefix = ids(service.search::<Track>("Bohemian"), |t| t.id.clone());
    assert_eq!(by_prefix, vec!["t1"]);

    let by_phrase = ids(service.search::<Track>("Bohemian Rhapsody"), |t| t.id.clone());
    assert_eq!(by_phrase, vec!["t1"]);
}

#[test]
fn term_shape_selects_the_mode() {
    assert_eq!(Query::from_term("Bohemian").mode(), QueryMode::Prefix);
    assert_eq!(Query::from_term("Bohemian Rhapsody").mode(), QueryMode::Match);
    assert_eq!(Query::from_term("a\tb").mode(), QueryMode::Match);
    assert_eq!(Query::from_term("").mode(), QueryMode::Prefix);
}

#[test]
fn prefix_covers_partial_words_any_field_and_case() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    service.index_entity(&track("t1", "Bohemian Rhapsody", "Queen")).unwrap();
    service.index_entity(&track("t2", "Heroes", "David Bowie")).unwrap();

    assert_eq!(ids(service.search::<Track>("bohem"), |t| t.id.clone()), vec!["t1"]);
    assert_eq!(ids(service.search::<Track>("QUE"), |t| t.id.clone()), vec!["t1"]);
    assert_eq!(ids(service.search::<Track>("bowie"), |t| t.id.clone()), vec!["t2"]);
    assert!(service.search::<Track>("zeppelin").into_result().unwrap().is_empty());
}

#[test]
fn match_ranks_documents_with_more_terms_first() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    service.index_entity(&track("t1", "Rhapsody in Blue", "Gershwin")).unwrap();
    service.index_entity(&track("t2", "Bohemian Rhapsody", "Queen")).unwrap();
    service.index_entity(&track("t3", "Heroes", "David Bowie")).unwrap();

    let found = ids(service.search::<Track>("bohemian rhapsody"), |t| t.id.clone());
    assert_eq!(found, vec!["t2", "t1"]);
}

#[test]
fn empty_term_lists_the_store_up_to_the_page_size() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    for i in 0..15 {
        service.index_entity(&Artist { id: format!("ar{:02}", i), name: format!("Artist {}", i), ..Default::default() }).unwrap();
    }

    let found = service.search::<Artist>("").into_result().unwrap();
    assert_eq!(found.len(), 10);
}

#[test]
fn hits_decode_back_to_the_indexed_entity() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    let original = track("t1", "Bohemian Rhapsody", "Queen");
    service.index_entity(&original).unwrap();

    let found = service.search::<Track>("t1").into_result().unwrap();
    assert_eq!(found, vec![original]);
}

#[test]
fn files_keep_integer_and_boolean_fields() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    let file = File {
        id: "/music/notes.txt".into(),
        name: "notes.txt".into(),
        time_write: 1_700_000_000,
        is_directory: false,
    };
    let folder = File {
        id: "/music/queen".into(),
        name: "queen".into(),
        time_write: -1,
        is_directory: true,
    };
    service.index_entity(&file).unwrap();
    service.index_entity(&folder).unwrap();

    assert_eq!(service.search::<File>("notes").into_result().unwrap(), vec![file]);
    assert_eq!(service.search::<File>("queen").into_result().unwrap(), vec![folder]);
}

#[test]
fn categories_do_not_share_documents() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    service.index_entity(&LikedTrack::from(track("t1", "Bohemian Rhapsody", "Queen"))).unwrap();

    assert!(service.search::<Track>("bohemian").into_result().unwrap().is_empty());
    let liked = service.search::<LikedTrack>("bohemian").into_result().unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].id, "t1");
}

#[test]
fn encoded_search_of_an_unopenable_store_is_an_empty_list() {
    let dir = TempDir::new().unwrap();
    // A regular file where the root directory should be.
    let root = dir.path().join("not-a-dir");
    std::fs::write(&root, b"x").unwrap();
    let service = SearchService::new(Config::with_root(&root)).unwrap();

    let encoded = service.search_encoded::<Track>("bohemian");
    assert!(encoded.bytes.is_empty());
    assert_eq!(encoded.error.unwrap().kind, medialib_search::ErrorKind::StoreOpen);

    assert!(service.search::<Track>("bohemian").is_failed());
}
