use tokio::task::JoinHandle;

/// Guard for a running session change listener.
///
/// The subscription is released when the guard is dropped or cancelled.
#[derive(Debug)]
pub struct SessionListener {
    handle: JoinHandle<()>,
}

impl SessionListener {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    /// False once the provider closed its feed or the listener was cancelled.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for SessionListener {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
