/// Lifecycle of one fetched resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, strum_macros::Display)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one fetch of a resource. Only the latest ticket may resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Status, last good data and last error of a single resource.
///
/// Data survives a later failure or reload so the plot keeps showing
/// something while the overlay reports the problem.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    status: FetchStatus,
    data: Option<T>,
    error: Option<String>,
    latest: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
            latest: 0,
        }
    }
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the resource as loading and hand out the ticket for this fetch.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.status = FetchStatus::Loading;
        Ticket(self.latest)
    }

    /// Apply a finished fetch. Returns `false` (and changes nothing) when a
    /// newer fetch has started since `ticket` was issued.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, String>) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.status = FetchStatus::Ready;
            }
            Err(message) => {
                self.error = Some(message);
                self.status = FetchStatus::Failed;
            }
        }
        true
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
