use std::ptr;

/// Owned search result handed across the C boundary.
///
/// `data` points at `len` bytes of an encoded list message followed by one
/// NUL byte. The caller owns it until it is passed to `search_buffer_free`.
#[repr(C)]
#[derive(Debug)]
pub struct SearchBuffer {
    pub data: *mut u8,
    pub len: usize,
    pub status: i32,
}

impl SearchBuffer {
    pub fn new(mut bytes: Vec<u8>, status: i32) -> Self {
        let len = bytes.len();
        bytes.push(0);
        let data = Box::into_raw(bytes.into_boxed_slice()).cast::<u8>();

        SearchBuffer { data, len, status }
    }

    pub fn empty(status: i32) -> Self {
        SearchBuffer::new(Vec::new(), status)
    }

    /// # Safety
    /// The buffer must come from `SearchBuffer::new` and not be released yet.
    pub unsafe fn as_bytes(&self) -> &[u8] {
        if self.data.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.data, self.len) }
    }

    /// # Safety
    /// The buffer must come from `SearchBuffer::new` and be released once.
    pub unsafe fn release(self) {
        if self.data.is_null() {
            return;
        }
        let slice = ptr::slice_from_raw_parts_mut(self.data, self.len + 1);
        drop(unsafe { Box::from_raw(slice) });
    }
}
