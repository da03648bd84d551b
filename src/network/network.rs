use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Network {
        Network { layers, metadata: None }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    /// Width of the input vector the first layer expects.
    pub fn input_size(&self) -> usize {
        self.layers.first().map(Layer::input_size).unwrap_or(0)
    }

    /// Number of output classes.
    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// Checks that the network is non-empty and that every layer's shape is
    /// internally consistent and chains onto the previous layer.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::Model("network has no layers".into()));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(problem) = layer.shape_error() {
                return Err(Error::Model(format!("layer {}: {}", i, problem)));
            }
            if i > 0 {
                let prev = self.layers[i - 1].size;
                if layer.input_size() != prev {
                    return Err(Error::Model(format!(
                        "layer {} expects {} inputs but layer {} produces {}",
                        i, layer.input_size(), i - 1, prev
                    )));
                }
            }
        }
        Ok(())
    }

    /// Forward pass. `input.len()` must equal `input_size()`.
    pub fn forward(&self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Serializes the network weights to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &Path) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::math::matrix::Matrix;

    fn two_layer() -> Network {
        let hidden = Layer::new(
            Matrix::from_data(vec![vec![1.0, -1.0], vec![1.0, 1.0]]),
            Matrix::row(vec![0.0, 0.0]),
            ActivationFunction::ReLU,
        );
        let out = Layer::new(
            Matrix::from_data(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]),
            Matrix::row(vec![0.0, 0.0, 0.0]),
            ActivationFunction::Softmax,
        );
        Network::new(vec![hidden, out])
    }

    #[test]
    fn test_forward_produces_distribution() {
        let net = two_layer();
        assert!(net.validate().is_ok());
        assert_eq!(net.input_size(), 2);
        assert_eq!(net.output_size(), 3);

        let out = net.forward(vec![1.0, 2.0]);
        let total: f64 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(out[0] > out[2]);
    }

    #[test]
    fn test_validate_rejects_empty() {
        let err = Network::new(vec![]).validate().unwrap_err();
        assert!(err.to_string().contains("no layers"));
    }

    #[test]
    fn test_validate_rejects_broken_chain() {
        let net = Network::new(vec![
            Layer::zeros(3, 2, ActivationFunction::ReLU),
            Layer::zeros(2, 4, ActivationFunction::Softmax),
        ]);
        let err = net.validate().unwrap_err();
        assert!(err.to_string().contains("layer 1 expects 4 inputs"));
    }

    #[test]
    fn test_json_round_trip_keeps_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let net = two_layer().with_metadata(ModelMetadata {
            description: Some("toy".into()),
            ..ModelMetadata::default()
        });
        net.save_json(&path).unwrap();

        let loaded = Network::load_json(&path).unwrap();
        assert_eq!(loaded.layers.len(), 2);
        assert_eq!(loaded.metadata.as_ref().unwrap().description.as_deref(), Some("toy"));
        assert_eq!(loaded.forward(vec![1.0, 2.0]), net.forward(vec![1.0, 2.0]));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Network::load_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
