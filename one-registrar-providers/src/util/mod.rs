use std::any::Any;

/// Extracts the message of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.to_owned()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod test {
    use super::panic_message;

    #[test]
    fn test_panic_message() {
        let payload = std::panic::catch_unwind(|| panic!("ledger {}", "timeout")).unwrap_err();
        assert_eq!("ledger timeout", panic_message(payload.as_ref()));

        let payload = std::panic::catch_unwind(|| std::panic::panic_any(42)).unwrap_err();
        assert_eq!("unknown panic", panic_message(payload.as_ref()));
    }
}
