//! Renderer errors

/// Failure to place mesh data on the GPU
#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadError {
    #[error("Out of GPU memory uploading {label}")]
    OutOfMemory { label: String },
    #[error("Validation failed uploading {label}: {message}")]
    Validation { label: String, message: String },
}

impl UploadError {
    pub(crate) fn from_wgpu(label: &str, error: wgpu::Error) -> Self {
        match error {
            wgpu::Error::OutOfMemory { .. } => UploadError::OutOfMemory {
                label: label.to_string(),
            },
            other => UploadError::Validation {
                label: label.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Renderer errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("Shader '{label}' failed to compile: {message}")]
    Shader { label: String, message: String },
    #[error("Pipeline '{label}' could not be created: {message}")]
    Pipeline { label: String, message: String },
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("Pick readback failed: {0}")]
    Readback(String),
}
