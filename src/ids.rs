use rand::Rng;

/// Alphabet shared with the Agent Hub auth tables. Excludes visually
/// confusing characters (0/O, 1/l/I).
const SAFE_CHARS: &[u8] = b"23456789abcdefghjkmnpqrstuvwxyz";

/// Random character count for every entity id in this service.
const ID_LEN: usize = 10;

/// Generate an id of the form `{prefix}_{random}`.
///
/// Collisions are not checked; at 10 characters over a 32-symbol alphabet
/// the probability is accepted as negligible.
pub fn generate(prefix: &str, len: usize) -> String {
    let mut rng = rand::rng();
    let mut id = String::with_capacity(prefix.len() + 1 + len);
    id.push_str(prefix);
    id.push('_');
    for _ in 0..len {
        let idx = rng.random_range(0..SAFE_CHARS.len());
        id.push(SAFE_CHARS[idx] as char);
    }
    id
}

#[must_use]
pub fn staff_id() -> String {
    generate("staff", ID_LEN)
}

#[must_use]
pub fn user_id() -> String {
    generate("user", ID_LEN)
}

#[must_use]
pub fn agent_id() -> String {
    generate("agent", ID_LEN)
}

#[must_use]
pub fn token_id() -> String {
    generate("token", ID_LEN)
}

#[must_use]
pub fn token_user_id() -> String {
    generate("tokuser", ID_LEN)
}

#[must_use]
pub fn token_agent_id() -> String {
    generate("tokagent", ID_LEN)
}
