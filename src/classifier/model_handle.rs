use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::config::{IMAGE_SIZE, INPUT_LEN};
use crate::network::{InputType, Network};

use super::Classifier;

/// Outcome of the one-time model load.
pub enum ModelState {
    Loaded(Box<dyn Classifier>),
    /// No usable model; the reason is kept for logs and diagnostics.
    Unavailable { reason: String },
}

impl ModelState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelState::Loaded(_))
    }
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Loaded(_) => f.write_str("Loaded"),
            ModelState::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

type Loader = Box<dyn Fn() -> ModelState + Send + Sync>;

/// Lazily loaded, process-shared classifier.
///
/// The loader runs at most once, on the first call to `state()`, even when
/// several threads arrive together; the others block until it finishes and
/// then observe the same result. Neither outcome is ever retried.
pub struct ModelHandle {
    loader: Loader,
    state: OnceLock<ModelState>,
}

impl ModelHandle {
    /// Loads a JSON network from `path` on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> ModelHandle {
        let path = path.into();
        ModelHandle::with_loader(move || load_network(&path))
    }

    pub fn with_loader<F>(loader: F) -> ModelHandle
    where
        F: Fn() -> ModelState + Send + Sync + 'static,
    {
        ModelHandle { loader: Box::new(loader), state: OnceLock::new() }
    }

    /// A handle that is already loaded with `classifier`.
    pub fn with_classifier(classifier: impl Classifier + 'static) -> ModelHandle {
        let handle = ModelHandle::with_loader(|| ModelState::Unavailable {
            reason: "loader replaced by preloaded classifier".into(),
        });
        let _ = handle.state.set(ModelState::Loaded(Box::new(classifier)));
        handle
    }

    /// A handle that never has a model.
    pub fn unavailable(reason: impl Into<String>) -> ModelHandle {
        let reason = reason.into();
        ModelHandle::with_loader(move || ModelState::Unavailable { reason: reason.clone() })
    }

    pub fn state(&self) -> &ModelState {
        self.state.get_or_init(|| (self.loader)())
    }

    /// True once a load has been attempted, whatever its outcome.
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.get() {
            Some(state) => f.debug_tuple("ModelHandle").field(state).finish(),
            None => f.write_str("ModelHandle(Uninitialized)"),
        }
    }
}

fn unavailable(reason: String) -> ModelState {
    warn!("{}; serving stub predictions", reason);
    ModelState::Unavailable { reason }
}

/// Reads and checks a network artifact. Every failure becomes `Unavailable`.
pub fn load_network(path: &Path) -> ModelState {
    if !path.exists() {
        info!(path = %path.display(), "model file not found; serving stub predictions");
        return ModelState::Unavailable {
            reason: format!("model file not found at {}", path.display()),
        };
    }

    let network = match Network::load_json(path) {
        Ok(n) => n,
        Err(e) => return unavailable(format!("error loading model from {}: {}", path.display(), e)),
    };

    if let Err(e) = network.validate() {
        return unavailable(format!("model at {} is malformed: {}", path.display(), e));
    }

    if network.input_size() != INPUT_LEN {
        return unavailable(format!(
            "model at {} expects {} inputs, images normalize to {}",
            path.display(), network.input_size(), INPUT_LEN
        ));
    }

    let meta = network.metadata.as_ref();
    match meta.and_then(|m| m.input_type.as_ref()) {
        None => {}
        Some(InputType::ImageRgb { width, height }) if *width == IMAGE_SIZE && *height == IMAGE_SIZE => {}
        Some(other) => {
            return unavailable(format!(
                "model at {} declares input {:?}, expected {}x{} RGB",
                path.display(), other, IMAGE_SIZE, IMAGE_SIZE
            ));
        }
    }

    if let Some(labels) = meta.and_then(|m| m.output_labels.as_ref()) {
        if labels.len() != network.output_size() {
            warn!(
                labels = labels.len(),
                outputs = network.output_size(),
                "model output labels do not match its output layer"
            );
        }
        debug!(labels = ?labels, "model declares output labels");
    }

    info!(
        path = %path.display(),
        layers = network.layers.len(),
        classes = network.output_size(),
        "model loaded"
    );
    ModelState::Loaded(Box::new(network))
}
