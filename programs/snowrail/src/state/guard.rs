use anchor_lang::prelude::*;

use crate::errors::SnowrailError;

/// Per-operation lock held in account state. A nested call into a guarded
/// operation while the flag is set fails immediately instead of queuing.
/// An aborted instruction rolls the flag back with the rest of its writes.
pub trait ReentrancyGuard {
    fn is_locked(&self) -> bool;

    fn set_locked(&mut self, locked: bool);

    fn enter(&mut self) -> Result<()> {
        require!(!self.is_locked(), SnowrailError::ReentrantCall);
        self.set_locked(true);
        Ok(())
    }

    fn release(&mut self) {
        self.set_locked(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag(bool);

    impl ReentrancyGuard for Flag {
        fn is_locked(&self) -> bool {
            self.0
        }

        fn set_locked(&mut self, locked: bool) {
            self.0 = locked;
        }
    }

    #[test]
    fn test_nested_enter_fails() {
        let mut flag = Flag(false);
        flag.enter().unwrap();
        assert_eq!(flag.enter().unwrap_err(), SnowrailError::ReentrantCall.into());

        flag.release();
        assert!(flag.enter().is_ok());
    }
}
