use crate::core::category::Category;
use crate::core::types::Document;
use crate::entity::fields::FieldReader;
use crate::entity::{Entity, EntityList};

/// A filesystem entry from the library browser.
#[derive(Clone, PartialEq, prost::Message)]
pub struct File {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub time_write: i64,
    #[prost(bool, tag = "4")]
    pub is_directory: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FileList {
    #[prost(message, repeated, tag = "1")]
    pub files: Vec<File>,
}

impl Entity for File {
    const CATEGORY: Category = Category::Files;

    type List = FileList;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        Document::new(self.id.clone())
            .with_field("id", self.id.as_str())
            .with_field("name", self.name.as_str())
            .with_field("time_write", self.time_write)
            .with_field("is_directory", self.is_directory)
    }

    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        File {
            id: fields.text("id"),
            name: fields.text("name"),
            time_write: fields.i64("time_write"),
            is_directory: fields.bool("is_directory"),
        }
    }
}

impl EntityList for FileList {
    type Item = File;

    fn from_items(files: Vec<File>) -> Self {
        FileList { files }
    }

    fn into_items(self) -> Vec<File> {
        self.files
    }
}
