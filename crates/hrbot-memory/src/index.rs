use hrbot_core::{HrError, HrResult};

/// One hit from [`FlatL2Index::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion position of the vector (equals the roster position).
    pub position: usize,
    /// Squared Euclidean distance to the query. Smaller is closer.
    pub distance: f32,
}

/// Exact brute-force index over fixed-size vectors using squared L2 distance.
///
/// Suitable for small, static collections. Vectors are only ever appended;
/// there is no update or delete path.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatL2Index {
    /// Create an empty index for vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Append a vector; its position is the current length.
    pub fn add(&mut self, vector: Vec<f32>) -> HrResult<usize> {
        if vector.len() != self.dimension {
            return Err(HrError::Index(format!(
                "Vector has {} components, index expects {}",
                vector.len(),
                self.dimension
            )));
        }
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    /// Return up to `k` nearest vectors ordered by non-decreasing distance.
    ///
    /// Equal distances keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> HrResult<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(HrError::Index(format!(
                "Query has {} components, index expects {}",
                query.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, v)| Neighbor {
                position,
                distance: squared_l2(query, v),
            })
            .collect();

        // sort_by is stable, so ties stay in insertion order
        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(k);
        Ok(scored)
    }

    /// Vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
