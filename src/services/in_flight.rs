use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ClientError;

/// "Sending"/"generating" flag. At most one request per component.
#[derive(Debug, Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    /// Claim the flag, or fail with `Busy` if a request is already running.
    /// The flag is released when the returned guard drops.
    pub fn begin(&self) -> Result<InFlightGuard<'_>, ClientError> {
        if self.0.swap(true, Ordering::AcqRel) {
            return Err(ClientError::Busy);
        }
        Ok(InFlightGuard(&self.0))
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
