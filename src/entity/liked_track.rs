use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::fields::FieldReader;
use crate::entity::track::Track;
use crate::entity::{Entity, EntityList};

/// Same shape as `Track`, kept in its own store.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LikedTrack {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub path: String,
    #[prost(string, tag = "3")]
    pub title: String,
    #[prost(string, tag = "4")]
    pub artist: String,
    #[prost(string, tag = "5")]
    pub album: String,
    #[prost(string, tag = "6")]
    pub album_artist: String,
    #[prost(uint32, tag = "7")]
    pub bitrate: u32,
    #[prost(string, tag = "8")]
    pub composer: String,
    #[prost(uint32, tag = "9")]
    pub disc_number: u32,
    #[prost(uint32, tag = "10")]
    pub filesize: u32,
    #[prost(uint32, tag = "11")]
    pub frequency: u32,
    #[prost(uint32, tag = "12")]
    pub length: u32,
    #[prost(uint32, tag = "13")]
    pub track_number: u32,
    #[prost(uint32, tag = "14")]
    pub year: u32,
    #[prost(string, tag = "15")]
    pub year_string: String,
    #[prost(string, tag = "16")]
    pub genre: String,
    #[prost(string, tag = "17")]
    pub md5: String,
    #[prost(string, optional, tag = "18")]
    pub album_art: Option<String>,
    #[prost(string, optional, tag = "19")]
    pub artist_id: Option<String>,
    #[prost(string, optional, tag = "20")]
    pub album_id: Option<String>,
    #[prost(string, optional, tag = "21")]
    pub genre_id: Option<String>,
    #[prost(string, tag = "22")]
    pub created_at: String,
    #[prost(string, tag = "23")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LikedTrackList {
    #[prost(message, repeated, tag = "1")]
    pub tracks: Vec<LikedTrack>,
}

impl From<Track> for LikedTrack {
    fn from(track: Track) -> Self {
        LikedTrack {
            id: track.id,
            path: track.path,
            title: track.title,
            artist: track.artist,
            album: track.album,
            album_artist: track.album_artist,
            bitrate: track.bitrate,
            composer: track.composer,
            disc_number: track.disc_number,
            filesize: track.filesize,
            frequency: track.frequency,
            length: track.length,
            track_number: track.track_number,
            year: track.year,
            year_string: track.year_string,
            genre: track.genre,
            md5: track.md5,
            album_art: track.album_art,
            artist_id: track.artist_id,
            album_id: track.album_id,
            genre_id: track.genre_id,
            created_at: track.created_at,
            updated_at: track.updated_at,
        }
    }
}

impl From<LikedTrack> for Track {
    fn from(track: LikedTrack) -> Self {
        Track {
            id: track.id,
            path: track.path,
            title: track.title,
            artist: track.artist,
            album: track.album,
            album_artist: track.album_artist,
            bitrate: track.bitrate,
            composer: track.composer,
            disc_number: track.disc_number,
            filesize: track.filesize,
            frequency: track.frequency,
            length: track.length,
            track_number: track.track_number,
            year: track.year,
            year_string: track.year_string,
            genre: track.genre,
            md5: track.md5,
            album_art: track.album_art,
            artist_id: track.artist_id,
            album_id: track.album_id,
            genre_id: track.genre_id,
            created_at: track.created_at,
            updated_at: track.updated_at,
        }
    }
}

impl Entity for LikedTrack {
    const CATEGORY: Category = Category::LikedTracks;

    type List = LikedTrackList;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        Track::from(self.clone()).to_document()
    }

    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Track::from_fields(fields).into()
    }
}

impl EntityList for LikedTrackList {
    type Item = LikedTrack;

    fn from_items(tracks: Vec<LikedTrack>) -> Self {
        LikedTrackList { tracks }
    }

    fn into_items(self) -> Vec<LikedTrack> {
        self.tracks
    }
}
