//! Validation modules

pub mod filename;

pub use filename::{
    allowed_file, file_extension, sanitize_filename, validate_upload_filename, UploadRejection,
    MAX_FILENAME_LENGTH,
};
