use crate::*;
pub use random::*;

mod random;

/// Strategy for producing a placed mine layout from a config.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}
