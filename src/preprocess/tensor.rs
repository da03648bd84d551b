/// A dense `f64` tensor with a `[batch, height, width, channels]` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f64>,
    shape: [usize; 4],
}

impl ImageTensor {
    /// Panics if `data.len()` does not match the product of `shape`.
    pub fn new(data: Vec<f64>, shape: [usize; 4]) -> ImageTensor {
        assert_eq!(
            data.len(),
            shape.iter().product::<usize>(),
            "tensor data does not fill shape {:?}",
            shape
        );
        ImageTensor { data, shape }
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Flat view of batch item `index`, in HWC order.
    pub fn item(&self, index: usize) -> Option<&[f64]> {
        let len = self.shape[1] * self.shape[2] * self.shape[3];
        let start = index.checked_mul(len)?;
        self.data.get(start..start + len)
    }
}
