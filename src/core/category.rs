use std::fmt;

/// Entity class backed by its own index store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Albums,
    Artists,
    Tracks,
    Files,
    LikedTracks,
    LikedAlbums,
    /// Recognized by the export surface, never indexed.
    Playlists,
}

impl Category {
    /// Categories that own a store on disk.
    pub const INDEXED: [Category; 6] = [
        Category::Albums,
        Category::Artists,
        Category::Tracks,
        Category::Files,
        Category::LikedTracks,
        Category::LikedAlbums,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Albums => "albums",
            Category::Artists => "artists",
            Category::Tracks => "tracks",
            Category::Files => "files",
            Category::LikedTracks => "liked_tracks",
            Category::LikedAlbums => "liked_albums",
            Category::Playlists => "playlists",
        }
    }

    pub fn is_indexed(&self) -> bool {
        !matches!(self, Category::Playlists)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
