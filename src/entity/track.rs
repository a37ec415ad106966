use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::fields::FieldReader;
use crate::entity::{Entity, EntityList};

#[derive(Clone, PartialEq, prost::Message)]
pub struct Track {
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
pub struct TrackList {
    #[prost(message, repeated, tag = "1")]
    pub tracks: Vec<Track>,
}

impl Entity for Track {
    const CATEGORY: Category = Category::Tracks;

    type List = TrackList;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new(self.id.clone())
            .with_field("id", self.id.as_str())
            .with_field("path", self.path.as_str())
            .with_field("title", self.title.as_str())
            .with_field("artist", self.artist.as_str())
            .with_field("album", self.album.as_str())
            .with_field("album_artist", self.album_artist.as_str())
            .with_field("bitrate", self.bitrate)
            .with_field("composer", self.composer.as_str())
            .with_field("disc_number", self.disc_number)
            .with_field("filesize", self.filesize)
            .with_field("frequency", self.frequency)
            .with_field("length", self.length)
            .with_field("track_number", self.track_number)
            .with_field("year", self.year)
            .with_field("year_string", self.year_string.as_str())
            .with_field("genre", self.genre.as_str())
            .with_field("md5", self.md5.as_str())
            .with_field("created_at", self.created_at.as_str())
            .with_field("updated_at", self.updated_at.as_str());

        doc.add_optional("album_art", self.album_art.clone());
        doc.add_optional("artist_id", self.artist_id.clone());
        doc.add_optional("album_id", self.album_id.clone());
        doc.add_optional("genre_id", self.genre_id.clone());
        doc
    }

    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Track {
            id: fields.text("id"),
            path: fields.text("path"),
            title: fields.text("title"),
            artist: fields.text("artist"),
            album: fields.text("album"),
            album_artist: fields.text("album_artist"),
            bitrate: fields.u32("bitrate"),
            composer: fields.text("composer"),
            disc_number: fields.u32("disc_number"),
            filesize: fields.u32("filesize"),
            frequency: fields.u32("frequency"),
            length: fields.u32("length"),
            track_number: fields.u32("track_number"),
            year: fields.u32("year"),
            year_string: fields.text("year_string"),
            genre: fields.text("genre"),
            md5: fields.text("md5"),
            album_art: fields.optional_text("album_art"),
            artist_id: fields.optional_text("artist_id"),
            album_id: fields.optional_text("album_id"),
            genre_id: fields.optional_text("genre_id"),
            created_at: fields.text("created_at"),
            updated_at: fields.text("updated_at"),
        }
    }
}

impl EntityList for TrackList {
    type Item = Track;

    fn from_items(tracks: Vec<Track>) -> Self {
        TrackList { tracks }
    }

    fn into_items(self) -> Vec<Track> {
        self.tracks
    }
}
