// Shared helpers for reading tag data
pub mod encoding;
pub mod io;

pub use encoding::TextEncoding;
pub use io::ByteReader;
