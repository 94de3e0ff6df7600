//! Element id generation for builders that key their tree on short hex ids

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::constants::ELEMENTOR_ID_LEN;

/// Issues unique 7-digit lowercase hex ids, Elementor style.
///
/// A seeded generator yields the same id sequence for the same node order,
/// which keeps output reproducible in tests.
#[derive(Debug)]
pub struct ElementIdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl ElementIdGenerator {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    /// Next id, never repeating one already issued by this generator
    pub fn next_id(&mut self) -> String {
        let upper = 1u32 << (4 * ELEMENTOR_ID_LEN as u32);
        loop {
            let value = self.rng.random_range(0..upper);
            let id = format!("{value:0width$x}", width = ELEMENTOR_ID_LEN);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Number of ids issued so far
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}
