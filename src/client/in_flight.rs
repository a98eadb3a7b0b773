use std::sync::atomic::{AtomicBool, Ordering};

use super::error::DeskError;

/// Marks an action as waiting for the server. The flag is released on
/// drop, so an abandoned request never leaves the action disabled.
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, DeskError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DeskError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_busy_until_drop() {
        let flag = AtomicBool::new(false);
        let guard = InFlight::acquire(&flag).unwrap();
        assert!(matches!(InFlight::acquire(&flag), Err(DeskError::Busy)));

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlight::acquire(&flag).is_ok());
    }
}
