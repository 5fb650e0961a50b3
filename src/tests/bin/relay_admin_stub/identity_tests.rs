use super::*;

#[test]
fn random_token_is_64_hex_chars_and_unique() {
    let a = random_token().expect("token a");
    let b = random_token().expect("token b");
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

#[test]
fn hash_secret_is_stable_and_does_not_echo_input() {
    let h = hash_secret("Admin123");
    assert_eq!(h, hash_secret("Admin123"));
    assert_ne!(h, hash_secret("admin123"));
    assert!(!h.contains("Admin123"));
}
