//! Test doubles shared by the sim unit tests

use std::collections::VecDeque;

use rand::RngCore;

/// Random source that replays a fixed list of `f32` draws, then always
/// returns values just below 1.0 (so no probability roll fires)
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: VecDeque<u32>,
    taken: usize,
}

impl ScriptedRng {
    pub fn from_draws(draws: &[f32]) -> Self {
        Self {
            // rand builds an f32 from the top 24 bits of one u32
            script: draws
                .iter()
                .map(|d| ((d.clamp(0.0, 0.999_999) * (1u32 << 24) as f32) as u32) << 8)
                .collect(),
            taken: 0,
        }
    }

    pub fn draws_taken(&self) -> usize {
        self.taken
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.taken += 1;
        self.script.pop_front().unwrap_or(u32::MAX)
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
