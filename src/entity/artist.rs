use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::fields::FieldReader;
use crate::entity::{Entity, EntityList};

#[derive(Clone, PartialEq, prost::Message)]
pub struct Artist {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, optional, tag = "3")]
    pub bio: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub image: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArtistList {
    #[prost(message, repeated, tag = "1")]
    pub artists: Vec<Artist>,
}

impl Entity for Artist {
    const CATEGORY: Category = Category::Artists;

    type List = ArtistList;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new(self.id.clone())
            .with_field("id", self.id.as_str())
            .with_field("name", self.name.as_str());
        doc.add_optional("bio", self.bio.clone());
        doc.add_optional("image", self.image.clone());
        doc
    }

    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Artist {
            id: fields.text("id"),
            name: fields.text("name"),
            bio: fields.optional_text("bio"),
            image: fields.optional_text("image"),
        }
    }
}

impl EntityList for ArtistList {
    type Item = Artist;

    fn from_items(artists: Vec<Artist>) -> Self {
        ArtistList { artists }
    }

    fn into_items(self) -> Vec<Artist> {
        self.artists
    }
}
