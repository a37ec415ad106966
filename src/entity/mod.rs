//! Entity messages shared with the host application, and the explicit
//! conversions between them and stored documents.
//!
//! The message definitions are the wire contract: field names, types and tags
//! must match the host's schema exactly.

pub mod fields;
pub mod album;
pub mod artist;
pub mod track;
pub mod file;
pub mod liked_album;
pub mod liked_track;

pub use album::{Album, AlbumList};
pub use artist::{Artist, ArtistList};
pub use file::{File, FileList};
pub use liked_album::{LikedAlbum, LikedAlbumList};
pub use liked_track::{LikedTrack, LikedTrackList};
pub use track::{Track, TrackList};

use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::fields::{FieldMismatch, FieldReader};
use crate::search::results::Hit;

/// A searchable domain object with a mandatory `id`.
pub trait Entity: prost::Message + Default + Clone + Send + Sync + Sized + 'static {
    /// The store this entity lives in.
    const CATEGORY: Category;

    /// Wire wrapper used for batches and search results.
    type List: EntityList<Item = Self>;

    fn id(&self) -> &str;

    /// Every field, by name. Optional fields that are unset are omitted.
    fn to_document(&self) -> Document;

    /// Typed field-by-field decode. Absent fields take the zero value;
    /// mismatched ones too, and are recorded on the reader.
    fn from_fields(fields: &mut FieldReader<'_>) -> Self;
}

pub trait EntityList: prost::Message + Default + Sized {
    type Item;

    fn from_items(items: Vec<Self::Item>) -> Self;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Decoded entity plus any fields that were present with the wrong type.
#[derive(Debug, Clone)]
pub struct Decoded<E> {
    pub entity: E,
    pub mismatches: Vec<FieldMismatch>,
}

pub fn decode_hit<E: Entity>(hit: &Hit) -> Decoded<E> {
    let mut reader = FieldReader::new(&hit.fields);
    let entity = E::from_fields(&mut reader);
    let mismatches = reader.finish();

    for mismatch in &mismatches {
        tracing::warn!(
            "{} hit {}: field {} expected {}, found {}",
            E::CATEGORY, hit.key, mismatch.field, mismatch.expected, mismatch.found
        );
    }

    Decoded { entity, mismatches }
}
