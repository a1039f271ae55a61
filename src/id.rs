use nanoid::nanoid;

/// Alphabet for Yatzia entity identifiers (no ambiguous glyphs, safe inside
/// colon-delimited Redis keys).
const ENTITY_ID_ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
    'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Default entity id length.
const ENTITY_ID_LENGTH: usize = 20;

/// Generates a new id for a post, comment, notification or report document.
///
/// User and community ids are not generated here: user ids come from the
/// identity provider, community ids are deterministic slugs (`team_{teamId}`
/// or `topic_{slug}`).
pub fn generate_entity_id() -> String {
    nanoid!(ENTITY_ID_LENGTH, ENTITY_ID_ALPHABET)
}
