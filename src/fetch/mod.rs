pub mod downloader;

pub use downloader::{download, download_stamp, ensure_source};
