use std::path::PathBuf;

/// Exit status for inputs that cannot be opened or contain no frames.
pub const EXIT_INPUT_NOT_FOUND: i32 = -1;
/// Exit status for still images that are not 8-bit three-channel.
pub const EXIT_UNSUPPORTED_FORMAT: i32 = 1;
/// Exit status for any failure after startup (display backend).
pub const EXIT_RUNTIME: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Image '{}' not found!", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Video '{}' not found or contains no frames!", .path.display())]
    EmptyVideo { path: PathBuf },

    #[error("Ops, format '{format}' not supported!")]
    UnsupportedFormat { format: String },

    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("row {row} is outside a frame of height {height}")]
    RowOutOfBounds { row: u32, height: u32 },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("display backend: {0}")]
    Backend(String),
}

impl ProfileError {
    /// Process exit status the viewer reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProfileError::InputNotFound { .. } | ProfileError::EmptyVideo { .. } => EXIT_INPUT_NOT_FOUND,
            ProfileError::UnsupportedFormat { .. } => EXIT_UNSUPPORTED_FORMAT,
            _ => EXIT_RUNTIME,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
