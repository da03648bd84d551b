//! Classifier adapter: turns a normalized image into a prediction, either by
//! running the loaded network or, when none is available, by serving a fixed
//! per-crop stub.

pub mod model_handle;
pub mod stub;

use crate::activation::activation::{softmax, ActivationFunction};
use crate::catalog::CropType;
use crate::error::{Error, Result};
use crate::network::Network;
use crate::preprocess::ImageTensor;

pub use model_handle::{ModelHandle, ModelState};
pub use stub::{stub_label, STUB_CONFIDENCE, STUB_NOTE};

/// Anything that maps an image tensor to a probability vector.
pub trait Classifier: Send + Sync {
    /// Returns one probability per class, summing to 1.
    fn predict(&self, tensor: &ImageTensor) -> Result<Vec<f64>>;
}

impl Classifier for Network {
    fn predict(&self, tensor: &ImageTensor) -> Result<Vec<f64>> {
        let input = tensor
            .item(0)
            .ok_or_else(|| Error::Model("empty input batch".into()))?;
        if input.len() != self.input_size() {
            return Err(Error::Model(format!(
                "input has {} values, model expects {}",
                input.len(),
                self.input_size()
            )));
        }

        let output = self.forward(input.to_vec());
        let already_normalized = matches!(
            self.layers.last().map(|l| &l.activator),
            Some(ActivationFunction::Softmax)
        );
        Ok(if already_normalized { output } else { softmax(&output) })
    }
}

/// What the adapter produced for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Arg-max of the model output; `index` still needs a label sequence.
    Model { index: usize, confidence: f64 },
    /// Fixed placeholder used while no model is loaded.
    Stub { label: &'static str, confidence: f64, note: &'static str },
}

/// Index and value of the largest finite probability.
pub fn argmax(probabilities: &[f64]) -> Option<(usize, f64)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
}

impl ModelHandle {
    /// Classifies `tensor`, loading the model on first use.
    ///
    /// A missing or unusable model is not an error: the stub for `crop` is
    /// returned instead. Errors only come from a loaded model failing.
    pub fn classify(&self, tensor: &ImageTensor, crop: &CropType) -> Result<Prediction> {
        match self.state() {
            ModelState::Loaded(classifier) => {
                let probabilities = classifier.predict(tensor)?;
                let (index, confidence) = argmax(&probabilities)
                    .ok_or_else(|| Error::Model("model produced no usable probabilities".into()))?;
                Ok(Prediction::Model { index, confidence: confidence.clamp(0.0, 1.0) })
            }
            ModelState::Unavailable { .. } => Ok(stub::stub_prediction(crop)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INPUT_LEN;
    use crate::layers::dense::Layer;
    use crate::math::matrix::Matrix;

    struct Fixed(Vec<f64>);

    impl Classifier for Fixed {
        fn predict(&self, _tensor: &ImageTensor) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    fn blank_tensor() -> ImageTensor {
        ImageTensor::new(vec![0.5; INPUT_LEN], [1, 224, 224, 3])
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f64::NAN, 0.3]), Some((1, 0.3)));
    }

    #[test]
    fn test_classify_loaded_takes_argmax() {
        let handle = ModelHandle::with_classifier(Fixed(vec![0.05, 0.15, 0.8]));
        let prediction = handle.classify(&blank_tensor(), &CropType::Potato).unwrap();
        assert_eq!(prediction, Prediction::Model { index: 2, confidence: 0.8 });
    }

    #[test]
    fn test_classify_unavailable_returns_stub() {
        let handle = ModelHandle::unavailable("no model in test");
        let prediction = handle.classify(&blank_tensor(), &CropType::Rice).unwrap();
        assert_eq!(
            prediction,
            Prediction::Stub { label: "Brown_spot", confidence: 0.85, note: STUB_NOTE }
        );
    }

    #[test]
    fn test_classify_empty_output_is_error() {
        let handle = ModelHandle::with_classifier(Fixed(vec![]));
        assert!(handle.classify(&blank_tensor(), &CropType::Tomato).is_err());
    }

    #[test]
    fn test_network_output_is_softmaxed_when_needed() {
        let mut biases = Matrix::zeros(1, 3);
        biases.data[0] = vec![0.0, 5.0, 1.0];
        let layer = Layer::new(Matrix::zeros(INPUT_LEN, 3), biases, ActivationFunction::Identity);
        let net = Network::new(vec![layer]);

        let probabilities = net.predict(&blank_tensor()).unwrap();
        let total: f64 = probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(argmax(&probabilities).unwrap().0, 1);
    }

    #[test]
    fn test_network_rejects_wrong_input_len() {
        let net = Network::new(vec![Layer::zeros(2, 10, ActivationFunction::Softmax)]);
        let err = net.predict(&blank_tensor()).unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }
}
