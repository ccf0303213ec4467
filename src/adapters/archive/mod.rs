//! Session artifact adapters.

mod file_archive;

pub use file_archive::FileSessionArchive;
