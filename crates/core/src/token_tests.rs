// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

use super::*;

#[test]
fn configured_token_is_kept_verbatim() {
    let token = ClientToken::new("123");
    assert_eq!(token.as_str(), "123");
    assert_eq!(token.to_string(), "123");
}

#[test]
fn generated_tokens_are_nonempty_and_distinct() {
    let a = ClientToken::generate();
    let b = ClientToken::generate();
    assert!(!a.as_str().is_empty());
    assert_ne!(a, b);
}
