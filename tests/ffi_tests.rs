use std::ffi::CString;
use prost::Message;
use medialib_search::codec;
use medialib_search::entity::{Album, AlbumList};
use medialib_search::ffi::{self, SearchBuffer};
use tempfile::TempDir;

fn album(id: &str, title: &str) -> Album {
    Album {
        id: id.into(),
        title: title.into(),
        artist: "The Beatles".into(),
        year: 1969,
        year_string: "1969".into(),
        ..Default::default()
    }
}

fn search_albums(term: &str) -> (i32, Vec<Album>) {
    let term = CString::new(term).unwrap();
    unsafe {
        let buffer: SearchBuffer = ffi::search_album(term.as_ptr());
        assert_eq!(*buffer.data.add(buffer.len), 0);
        let status = buffer.status;
        let albums = AlbumList::decode(buffer.as_bytes()).unwrap().albums;
        ffi::search_buffer_free(buffer);
        (status, albums)
    }
}

// The exports share one process-wide service, so everything runs in a
// single test.
#[test]
fn export_surface() {
    let dir = TempDir::new().unwrap();
    let root = CString::new(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(unsafe { ffi::search_init(root.as_ptr()) }, ffi::STATUS_OK);

    let payload = album("al1", "Abbey Road").encode_to_vec();
    assert_eq!(unsafe { ffi::index_album(payload.as_ptr(), payload.len()) }, ffi::STATUS_OK);

    let (status, found) = search_albums("Abbey");
    assert_eq!(status, ffi::STATUS_OK);
    assert_eq!(found, vec![album("al1", "Abbey Road")]);

    let (status, found) = search_albums("nothing here");
    assert_eq!(status, ffi::STATUS_OK);
    assert!(found.is_empty());

    let batch = codec::encode_list(vec![album("al2", "Let It Be"), album("", "Untitled")]);
    assert_eq!(unsafe { ffi::index_albums(batch.as_ptr(), batch.len()) }, ffi::STATUS_INDEX_WRITE);
    assert_eq!(search_albums("let").1.len(), 1);

    let garbage = [0x0a, 0x0a, b'a', b'b'];
    assert_eq!(unsafe { ffi::index_album(garbage.as_ptr(), garbage.len()) }, ffi::STATUS_DECODE);
    assert_eq!(unsafe { ffi::index_album(std::ptr::null(), 0) }, ffi::STATUS_INVALID_ARGUMENT);

    let empty = unsafe { ffi::search_album(std::ptr::null()) };
    assert_eq!(empty.status, ffi::STATUS_INVALID_ARGUMENT);
    assert_eq!(empty.len, 0);
    unsafe { ffi::search_buffer_free(empty) };

    assert_eq!(ffi::index_playlist(), ffi::STATUS_UNSUPPORTED);
    assert_eq!(ffi::index_playlists(), ffi::STATUS_UNSUPPORTED);

    assert_eq!(ffi::search_shutdown(), ffi::STATUS_OK);
    assert!(dir.path().join("albums.idx").join("snapshot.bin").exists());

    // After shutdown the next init reopens the same data.
    assert_eq!(unsafe { ffi::search_init(root.as_ptr()) }, ffi::STATUS_OK);
    assert_eq!(search_albums("abbey").1.len(), 1);
    assert_eq!(ffi::search_shutdown(), ffi::STATUS_OK);
}
