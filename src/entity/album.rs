use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::fields::FieldReader;
use crate::entity::{Entity, EntityList};

#[derive(Clone, PartialEq, prost::Message)]
pub struct Album {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub artist: String,
    #[prost(uint32, tag = "4")]
    pub year: u32,
    #[prost(string, tag = "5")]
    pub year_string: String,
    #[prost(string, optional, tag = "6")]
    pub album_art: Option<String>,
    #[prost(string, tag = "7")]
    pub md5: String,
    #[prost(string, tag = "8")]
    pub artist_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AlbumList {
    #[prost(message, repeated, tag = "1")]
    pub albums: Vec<Album>,
}

impl Entity for Album {
    const CATEGORY: Category = Category::Albums;

    type List = AlbumList;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new(self.id.clone())
            .with_field("id", self.id.as_str())
            .with_field("title", self.title.as_str())
            .with_field("artist", self.artist.as_str())
            .with_field("year", self.year)
            .with_field("year_string", self.year_string.as_str())
            .with_field("md5", self.md5.as_str())
            .with_field("artist_id", self.artist_id.as_str());
        doc.add_optional("album_art", self.album_art.clone());
        doc
    }

    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Album {
            id: fields.text("id"),
            title: fields.text("title"),
            artist: fields.text("artist"),
            year: fields.u32("year"),
            year_string: fields.text("year_string"),
            album_art: fields.optional_text("album_art"),
            md5: fields.text("md5"),
            artist_id: fields.text("artist_id"),
        }
    }
}

impl EntityList for AlbumList {
    type Item = Album;

    fn from_items(albums: Vec<Album>) -> Self {
        AlbumList { albums }
    }

    fn into_items(self) -> Vec<Album> {
        self.albums
    }
}
