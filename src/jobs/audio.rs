//! Background sound upload job.
//!
//! The pool knows nothing about audio; it moves a [`SoundUploadArgs`]
//! into a closure, runs it on a worker, and hands the caller a
//! [`SoundUploadResult`]. The decode and device upload themselves
//! belong to the [`AudioBackend`] collaborator invoked from inside the
//! closure.

use std::sync::Arc;

use crate::thread_pool::{DeferredResult, Pool, Status};

/// Everything a worker needs to decode and upload one sound file.
///
/// Plain values only; ownership moves into the submitted closure and
/// the result travels back through the deferred handle.
#[derive(Debug, Clone)]
pub struct SoundUploadArgs {
    pub path: String,
    pub stereo: bool,
    pub looping: bool,
    pub pitch: f32,
    pub gain: f32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub orientation_at: [f32; 3],
    pub orientation_up: [f32; 3],
}

impl Default for SoundUploadArgs {
    fn default() -> Self {
        Self {
            path: String::new(),
            stereo: false,
            looping: false,
            pitch: 1.0,
            gain: 1.0,
            position: [0.0; 3],
            velocity: [0.0; 3],
            orientation_at: [0.0; 3],
            orientation_up: [0.0; 3],
        }
    }
}

/// Outcome of a sound upload job.
///
/// `buffer_id` and `source_id` are device handles minted by the
/// backend; both are zero when `status` is [`Status::Error`].
#[derive(Debug, Clone, Copy)]
pub struct SoundUploadResult {
    pub status: Status,
    pub buffer_id: u32,
    pub source_id: u32,
}

/// Failure modes of the decode/upload collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioUploadError {
    #[error("bit depth {0} is unsupported, convert the file to 8 or 16")]
    UnsupportedBitDepth(u32),

    #[error("failed to read '{path}': {reason}")]
    FileRead { path: String, reason: String },

    #[error("device rejected upload: {0}")]
    Device(String),
}

/// Decode-and-upload collaborator invoked from inside the submitted
/// closure.
///
/// Implementations talk to the actual audio device. The pool never
/// serializes access to that device; a backend shared between
/// concurrent jobs must do its own locking.
pub trait AudioBackend: Send + Sync {
    /// Decodes the file named by `args` and uploads it, returning the
    /// generated `(buffer_id, source_id)` pair.
    fn upload_wave(&self, args: &SoundUploadArgs) -> Result<(u32, u32), AudioUploadError>;
}

/// Submits a decode-and-upload job for `args` to `pool`.
///
/// The returned handle resolves to [`Status::Success`] with the device
/// identifiers, or [`Status::Error`] when the backend refuses the file.
/// Callers polling before completion see [`Status::NotReady`].
pub fn submit_sound_upload(
    pool: &Pool,
    backend: Arc<dyn AudioBackend>,
    args: SoundUploadArgs,
) -> DeferredResult<SoundUploadResult> {
    pool.submit(move || match backend.upload_wave(&args) {
        Ok((buffer_id, source_id)) => SoundUploadResult {
            status: Status::Success,
            buffer_id,
            source_id,
        },
        Err(err) => {
            log::error!("sound upload for '{}' failed: {}", args.path, err);
            SoundUploadResult {
                status: Status::Error,
                buffer_id: 0,
                source_id: 0,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeBackend {
        next_id: AtomicU32,
    }

    impl AudioBackend for FakeBackend {
        fn upload_wave(&self, args: &SoundUploadArgs) -> Result<(u32, u32), AudioUploadError> {
            if args.path.ends_with(".wav") {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                Ok((id, id + 100))
            } else {
                Err(AudioUploadError::FileRead {
                    path: args.path.clone(),
                    reason: "not a wave file".to_string(),
                })
            }
        }
    }

    #[test]
    fn test_upload_success() {
        let pool = Pool::named("audio", 1);
        let backend = Arc::new(FakeBackend {
            next_id: AtomicU32::new(1),
        });

        let args = SoundUploadArgs {
            path: "sounds/step.wav".to_string(),
            looping: true,
            ..Default::default()
        };
        let result = submit_sound_upload(&pool, backend, args)
            .wait()
            .expect("upload task ran");

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.buffer_id, 1);
        assert_eq!(result.source_id, 101);
    }

    #[test]
    fn test_upload_failure_maps_to_error_status() {
        let pool = Pool::named("audio", 1);
        let backend = Arc::new(FakeBackend {
            next_id: AtomicU32::new(1),
        });

        let args = SoundUploadArgs {
            path: "sounds/step.ogg".to_string(),
            ..Default::default()
        };
        let result = submit_sound_upload(&pool, backend, args)
            .wait()
            .expect("upload task ran");

        assert_eq!(result.status, Status::Error);
        assert_eq!(result.buffer_id, 0);
        assert_eq!(result.source_id, 0);
    }

    #[test]
    fn test_args_defaults() {
        let args = SoundUploadArgs::default();
        assert_eq!(args.pitch, 1.0);
        assert_eq!(args.gain, 1.0);
        assert!(!args.looping);
        assert!(!args.stereo);
        assert_eq!(args.position, [0.0; 3]);
    }

    #[test]
    fn test_upload_error_display() {
        let err = AudioUploadError::UnsupportedBitDepth(24);
        assert_eq!(
            err.to_string(),
            "bit depth 24 is unsupported, convert the file to 8 or 16"
        );
    }
}
