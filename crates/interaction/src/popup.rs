/// Token identifying one on-demand detail fetch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DetailRequest(u64);

/// What the popup currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupContent<T> {
    Loading,
    Ready(T),
    /// The fetch failed; the popup keeps its primary navigation action and
    /// shows a "no data" fallback.
    Unavailable,
}

/// Detail popup lifecycle.
///
/// Opening hands out a monotonic request token and a `Loading` state; the
/// host kicks off the fetch and reports back with the token. A resolution
/// whose token is no longer current (popup closed or replaced meanwhile) is
/// silently ignored; late fetches must never throw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPopup<T> {
    next_request: u64,
    open: Option<(DetailRequest, PopupContent<T>)>,
}

impl<T> DetailPopup<T> {
    pub fn new() -> Self {
        Self {
            next_request: 0,
            open: None,
        }
    }

    /// Opens (or replaces) the popup in the loading state.
    pub fn open(&mut self) -> DetailRequest {
        let request = DetailRequest(self.next_request);
        self.next_request += 1;
        self.open = Some((request, PopupContent::Loading));
        request
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn content(&self) -> Option<&PopupContent<T>> {
        self.open.as_ref().map(|(_, content)| content)
    }

    /// Replaces the loading content in place. Returns `false` when the
    /// fetch was superseded.
    pub fn resolve(&mut self, request: DetailRequest, data: T) -> bool {
        match &mut self.open {
            Some((current, content)) if *current == request => {
                *content = PopupContent::Ready(data);
                true
            }
            _ => false,
        }
    }

    /// Marks the fetch as failed. Returns `false` when superseded.
    pub fn fail(&mut self, request: DetailRequest) -> bool {
        match &mut self.open {
            Some((current, content)) if *current == request => {
                *content = PopupContent::Unavailable;
                true
            }
            _ => false,
        }
    }

    /// Closes the popup; any in-flight fetch resolves into the void.
    pub fn close(&mut self) {
        self.open = None;
    }
}
