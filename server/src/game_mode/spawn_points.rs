use tether_shared::Transform;

/// Candidate placements for respawning Pawns
pub struct SpawnPoints {
    points: Vec<Transform>,
    rng: fastrand::Rng,
}

impl SpawnPoints {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Spawn points with a fixed selection order, for reproducible sessions
    pub fn with_seed(seed: u64) -> Self {
        Self {
            points: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_points(points: Vec<Transform>) -> Self {
        Self {
            points,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn push(&mut self, point: Transform) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Transform] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pick one spawn point at random, `None` if there are none
    pub fn select(&self) -> Option<Transform> {
        if self.points.is_empty() {
            return None;
        }
        let index = self.rng.usize(..self.points.len());
        self.points.get(index).copied()
    }
}

impl Default for SpawnPoints {
    fn default() -> Self {
        Self::new()
    }
}
