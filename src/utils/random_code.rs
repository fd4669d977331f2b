use rand::Rng;

/// Uppercase alphanumerics without the lookalikes 0/O and 1/I; session codes
/// get read out loud in classrooms.
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a random human-readable session code.
pub fn generate_session_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_session_code(6).len(), 6);
        assert_eq!(generate_session_code(8).len(), 8);
    }

    #[test]
    fn test_code_charset() {
        let code = generate_session_code(64);
        assert!(code.bytes().all(|b| CODE_CHARSET.contains(&b)));
        assert!(!code.contains('0'));
        assert!(!code.contains('O'));
    }
}
