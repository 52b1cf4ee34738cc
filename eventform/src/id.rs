use nanoid::nanoid;

/// Canonical alphabet for eventform identifiers (no ambiguous glyphs).
const ENTITY_ID_ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
    'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];
/// Default entity id length.
const ENTITY_ID_LENGTH: usize = 20;
/// Length of the token suffixed onto cloned field ids.
const CLONE_TOKEN_LENGTH: usize = 8;

/// Generates a new entity identifier using the configured alphabet and length.
pub fn generate_entity_id() -> String {
    nanoid!(ENTITY_ID_LENGTH, ENTITY_ID_ALPHABET)
}

/// Source of fresh field identifiers and clone tokens.
///
/// Injected into the editor and catalog so id generation carries no wall-clock
/// dependence: two rapid calls never collide, and tests can replay command
/// sequences deterministically with [`SequentialIds`].
pub trait IdSource {
    /// A fresh id for a newly added field.
    fn field_id(&mut self) -> String;

    /// A short collision-resistant token suffixed onto cloned field ids.
    fn clone_token(&mut self) -> String;
}

/// Default nanoid-backed id source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NanoIds;

impl IdSource for NanoIds {
    fn field_id(&mut self) -> String {
        nanoid!(ENTITY_ID_LENGTH, ENTITY_ID_ALPHABET)
    }

    fn clone_token(&mut self) -> String {
        nanoid!(CLONE_TOKEN_LENGTH, ENTITY_ID_ALPHABET)
    }
}

/// Deterministic monotonic id source for tests and command replay.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

impl IdSource for SequentialIds {
    fn field_id(&mut self) -> String {
        format!("field{}", self.next())
    }

    fn clone_token(&mut self) -> String {
        format!("{:06}", self.next())
    }
}
