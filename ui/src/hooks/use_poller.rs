use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use api::poll_guard::PollGuard;
use dioxus::prelude::*;

use crate::compat;

/// How long to wait before re-checking a disabled poller.
const IDLE_RECHECK: Duration = Duration::from_secs(1);

/// Runs `poll` every `every()` while the calling component is mounted.
///
/// `every` is re-read before each tick; returning `None` pauses polling.
/// A tick that comes due while the previous poll is still running is
/// skipped.
pub fn use_poller<E, F, Fut>(name: &'static str, every: E, poll: F)
where
    E: Fn() -> Option<Duration> + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let guard = use_hook(|| PollGuard::new(name));
    let every = use_hook(|| Rc::new(every));
    let poll = use_hook(|| Rc::new(poll));

    // the future is dropped with the component, which stops the timer
    use_future(move || {
        let guard = guard.clone();
        let every = every.clone();
        let poll = poll.clone();
        async move {
            loop {
                let Some(period) = every() else {
                    compat::sleep(IDLE_RECHECK).await;
                    continue;
                };
                compat::sleep(period).await;
                // settings may have changed while sleeping
                if every().is_none() {
                    continue;
                }
                if let Some(permit) = guard.try_begin() {
                    let fut = poll();
                    spawn(async move {
                        fut.await;
                        drop(permit);
                    });
                }
            }
        }
    });
}
