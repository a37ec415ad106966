//! C ABI exported by the shared library.
//!
//! Index exports take a pointer and length of an encoded entity (or list)
//! message and return a status code. Search exports take a NUL-terminated
//! term and return a `SearchBuffer`, which the caller releases with
//! `search_buffer_free`. No panic crosses this boundary.

pub mod buffer;
pub mod status;

use std::ffi::{CStr, c_char};
use std::panic::{self, AssertUnwindSafe};
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockWriteGuard};
use crate::core::category::Category;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::logging;
use crate::entity::{Album, Artist, Entity, File, LikedAlbum, LikedTrack, Track};
use crate::service::SearchService;

pub use buffer::SearchBuffer;
pub use status::*;

static SERVICE: Lazy<RwLock<Option<SearchService>>> = Lazy::new(|| RwLock::new(None));

/// Run `f` against the process-wide service, creating it from the
/// environment on first use.
fn with_service<T>(f: impl FnOnce(&SearchService) -> T) -> Result<T> {
    {
        let guard = SERVICE.read();
        if let Some(service) = guard.as_ref() {
            return Ok(f(service));
        }
    }

    let mut guard = SERVICE.write();
    if guard.is_none() {
        logging::init();
        *guard = Some(SearchService::new(Config::from_env())?);
    }

    let guard = RwLockWriteGuard::downgrade(guard);
    match guard.as_ref() {
        Some(service) => Ok(f(service)),
        None => Err(Error::new(ErrorKind::Internal, "search service unavailable")),
    }
}

fn guarded<T>(op: &str, fallback: impl FnOnce() -> T, f: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            tracing::error!("panic in {}", op);
            fallback()
        }
    }
}

/// # Safety
/// `ptr` must be null or valid for `len` bytes.
unsafe fn payload<'a>(ptr: *const u8, len: usize) -> Result<&'a [u8]> {
    if ptr.is_null() {
        return Err(Error::new(ErrorKind::InvalidArgument, "null payload"));
    }
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// # Safety
/// `term` must be null or a valid NUL-terminated string.
unsafe fn term<'a>(term: *const c_char) -> Result<&'a str> {
    if term.is_null() {
        return Err(Error::new(ErrorKind::InvalidArgument, "null search term"));
    }
    unsafe { CStr::from_ptr(term) }
        .to_str()
        .map_err(|e| Error::new(ErrorKind::InvalidArgument, format!("search term is not UTF-8: {}", e)))
}

unsafe fn index_one<E: Entity>(op: &str, ptr: *const u8, len: usize) -> i32 {
    guarded(op, || STATUS_INTERNAL, || {
        let result = unsafe { payload(ptr, len) }
            .and_then(|bytes| with_service(|service| service.index::<E>(bytes))?);
        status_of_result(&result)
    })
}

unsafe fn index_many<E: Entity>(op: &str, ptr: *const u8, len: usize) -> i32 {
    guarded(op, || STATUS_INTERNAL, || {
        let result = unsafe { payload(ptr, len) }
            .and_then(|bytes| with_service(|service| service.index_batch::<E>(bytes))?);

        match result {
            Ok(report) if report.is_complete() => STATUS_OK,
            Ok(_) => STATUS_INDEX_WRITE,
            Err(e) => status_of(&e),
        }
    })
}

unsafe fn search<E: Entity>(op: &str, raw_term: *const c_char) -> SearchBuffer {
    guarded(op, || SearchBuffer::empty(STATUS_INTERNAL), || {
        let encoded = unsafe { term(raw_term) }
            .and_then(|term| with_service(|service| service.search_encoded::<E>(term)));

        match encoded {
            Ok(encoded) => {
                let status = encoded.error.as_ref().map(status_of).unwrap_or(STATUS_OK);
                SearchBuffer::new(encoded.bytes, status)
            }
            Err(e) => SearchBuffer::empty(status_of(&e)),
        }
    })
}

/// Configure the store root. A null `root` keeps the environment's root.
/// Any service already running is shut down first.
///
/// # Safety
/// `root` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_init(root: *const c_char) -> i32 {
    guarded("search_init", || STATUS_INTERNAL, || {
        logging::init();

        let mut config = Config::from_env();
        if !root.is_null() {
            match unsafe { term(root) } {
                Ok(path) if !path.is_empty() => config = Config { root_dir: path.into(), ..config },
                Ok(_) => {}
                Err(e) => return status_of(&e),
            }
        }

        let mut guard = SERVICE.write();
        if let Some(previous) = guard.take() {
            if let Err(e) = previous.shutdown() {
                tracing::warn!("previous search service closed with errors: {}", e);
            }
        }

        match SearchService::new(config) {
            Ok(service) => {
                *guard = Some(service);
                STATUS_OK
            }
            Err(e) => status_of(&e),
        }
    })
}

/// Close every store. The next call starts a fresh service.
#[unsafe(no_mangle)]
pub extern "C" fn search_shutdown() -> i32 {
    guarded("search_shutdown", || STATUS_INTERNAL, || {
        let Some(service) = SERVICE.write().take() else {
            return STATUS_OK;
        };
        status_of_result(&service.shutdown())
    })
}

/// # Safety
/// `buffer` must come from a search export and be released once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_buffer_free(buffer: SearchBuffer) {
    unsafe { buffer.release() }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_album(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_one::<Album>("index_album", ptr, len) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_albums(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_many::<Album>("index_albums", ptr, len) }
}

/// # Safety
/// `term` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_album(term: *const c_char) -> SearchBuffer {
    unsafe { search::<Album>("search_album", term) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_artist(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_one::<Artist>("index_artist", ptr, len) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_artists(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_many::<Artist>("index_artists", ptr, len) }
}

/// # Safety
/// `term` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_artist(term: *const c_char) -> SearchBuffer {
    unsafe { search::<Artist>("search_artist", term) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_track(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_one::<Track>("index_track", ptr, len) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_tracks(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_many::<Track>("index_tracks", ptr, len) }
}

/// # Safety
/// `term` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_track(term: *const c_char) -> SearchBuffer {
    unsafe { search::<Track>("search_track", term) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_file(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_one::<File>("index_file", ptr, len) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_files(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_many::<File>("index_files", ptr, len) }
}

/// # Safety
/// `term` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_file(term: *const c_char) -> SearchBuffer {
    unsafe { search::<File>("search_file", term) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_liked_track(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_one::<LikedTrack>("index_liked_track", ptr, len) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_liked_tracks(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_many::<LikedTrack>("index_liked_tracks", ptr, len) }
}

/// # Safety
/// `term` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_liked_track(term: *const c_char) -> SearchBuffer {
    unsafe { search::<LikedTrack>("search_liked_track", term) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_liked_album(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_one::<LikedAlbum>("index_liked_album", ptr, len) }
}

/// # Safety
/// `ptr` must be valid for `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn index_liked_albums(ptr: *const u8, len: usize) -> i32 {
    unsafe { index_many::<LikedAlbum>("index_liked_albums", ptr, len) }
}

/// # Safety
/// `term` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn search_liked_album(term: *const c_char) -> SearchBuffer {
    unsafe { search::<LikedAlbum>("search_liked_album", term) }
}

fn playlist_unsupported(op: &str) -> i32 {
    guarded(op, || STATUS_INTERNAL, || {
        tracing::debug!("{}: {} are not indexed", op, Category::Playlists);
        STATUS_UNSUPPORTED
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn index_playlist() -> i32 {
    playlist_unsupported("index_playlist")
}

#[unsafe(no_mangle)]
pub extern "C" fn index_playlists() -> i32 {
    playlist_unsupported("index_playlists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_exports_do_not_start_the_service() {
        assert_eq!(index_playlist(), STATUS_UNSUPPORTED);
        assert_eq!(index_playlists(), STATUS_UNSUPPORTED);
        assert!(SERVICE.read().is_none());
    }
}
