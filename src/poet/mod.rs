//! Poem analysis: pronunciation, syllables, rhyme schemes and poetry forms.
pub mod analysis;
pub mod dictionary;
pub mod error;
pub mod forms;
pub mod phonemes;
pub mod poem;
pub mod pronunciation;
pub mod scheme;
pub mod server;
