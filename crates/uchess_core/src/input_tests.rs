use super::*;

#[test]
fn test_append_stops_at_capacity() {
    let mut input = InputBuffer::new();
    for c in "abcdefghijk".chars() {
        input.append(c);
    }
    assert_eq!(input.len(), 10);
    assert_eq!(input.text(), "abcdefghij");
}

#[test]
fn test_current_is_always_padded() {
    let mut input = InputBuffer::new();
    assert_eq!(input.current(), " ".repeat(MAX_LENGTH));

    input.append('e');
    input.append('4');
    assert_eq!(input.current(), "e4        ");
    assert_eq!(input.current().chars().count(), MAX_LENGTH);

    for c in "0123456789xyz".chars() {
        input.append(c);
    }
    assert_eq!(input.current().chars().count(), MAX_LENGTH);
}

#[test]
fn test_backspace_on_empty_is_noop() {
    let mut input = InputBuffer::new();
    input.backspace();
    assert!(input.is_empty());
    assert_eq!(input.current(), " ".repeat(MAX_LENGTH));
}

#[test]
fn test_backspace_removes_whole_multibyte_char() {
    let mut input = InputBuffer::new();
    input.append('N');
    input.append('♘');
    input.backspace();
    assert_eq!(input.text(), "N");

    // Multi-byte characters count once toward capacity
    input.clear();
    for _ in 0..12 {
        input.append('♕');
    }
    assert_eq!(input.len(), MAX_LENGTH);
    assert_eq!(input.current().chars().count(), MAX_LENGTH);
}

#[test]
fn test_clear() {
    let mut input = InputBuffer::new();
    input.append('x');
    input.clear();
    assert_eq!(input.text(), "");
}
