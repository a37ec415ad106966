use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::album::Album;
use crate::entity::fields::FieldReader;
use crate::entity::{Entity, EntityList};

/// Same shape as `Album`, kept in its own store.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LikedAlbum {
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
pub struct LikedAlbumList {
    #[prost(message, repeated, tag = "1")]
    pub albums: Vec<LikedAlbum>,
}

impl From<Album> for LikedAlbum {
    fn from(album: Album) -> Self {
        LikedAlbum {
            id: album.id,
            title: album.title,
            artist: album.artist,
            year: album.year,
            year_string: album.year_string,
            album_art: album.album_art,
            md5: album.md5,
            artist_id: album.artist_id,
        }
    }
}

impl From<LikedAlbum> for Album {
    fn from(album: LikedAlbum) -> Self {
        Album {
            id: album.id,
            title: album.title,
            artist: album.artist,
            year: album.year,
            year_string: album.year_string,
            album_art: album.album_art,
            md5: album.md5,
            artist_id: album.artist_id,
        }
    }
}

impl Entity for LikedAlbum {
    const CATEGORY: Category = Category::LikedAlbums;

    type List = LikedAlbumList;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        Album::from(self.clone()).to_document()
    }

    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Album::from_fields(fields).into()
    }
}

impl EntityList for LikedAlbumList {
    type Item = LikedAlbum;

    fn from_items(albums: Vec<LikedAlbum>) -> Self {
        LikedAlbumList { albums }
    }

    fn into_items(self) -> Vec<LikedAlbum> {
        self.albums
    }
}
