use crate::core::error::{Error, ErrorKind};

pub const STATUS_OK: i32 = 0;
pub const STATUS_DECODE: i32 = 1;
pub const STATUS_STORE_OPEN: i32 = 2;
pub const STATUS_INDEX_WRITE: i32 = 3;
pub const STATUS_SEARCH: i32 = 4;
pub const STATUS_INVALID_ARGUMENT: i32 = 5;
pub const STATUS_UNSUPPORTED: i32 = 6;
pub const STATUS_INTERNAL: i32 = 7;

pub fn status_of(err: &Error) -> i32 {
    match err.kind {
        ErrorKind::Decode => STATUS_DECODE,
        ErrorKind::StoreOpen => STATUS_STORE_OPEN,
        ErrorKind::IndexWrite => STATUS_INDEX_WRITE,
        ErrorKind::SearchExecution => STATUS_SEARCH,
        ErrorKind::InvalidArgument => STATUS_INVALID_ARGUMENT,
        ErrorKind::Unsupported => STATUS_UNSUPPORTED,
        ErrorKind::Io | ErrorKind::Parse | ErrorKind::Internal => STATUS_INTERNAL,
    }
}

pub fn status_of_result<T>(result: &Result<T, Error>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(err) => status_of(err),
    }
}
