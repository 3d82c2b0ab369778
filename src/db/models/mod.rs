pub mod interaction;

pub use interaction::{Interaction, InteractionInput, InteractionKind, InteractionPatch};
