use crate::announcement::Announcement;
use crate::error::FetchError;
use std::future::Future;
use std::pin::Pin;

pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Announcement>, FetchError>> + Send + 'a>>;

/// Remote supplier of the currently active announcement.
///
/// `Ok(None)` means nothing is active right now and is a valid answer;
/// `Err` is reserved for failed fetches.
pub trait AnnouncementSource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch_active_announcement(&self) -> FetchFuture<'_>;
}
